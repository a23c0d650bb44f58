/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Random initial PKA velocities for cascade simulations

use super::errors::{Result, SamplingError};
use super::triangle::SphericalTriangle;
use crate::utils::{constants, speed_from_energy, Vector3D};
use rand::Rng;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One initial condition for a cascade run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionSample {
    /// Half length of the simulation box, in lattice units
    pub half_length: i64,
    /// Velocity in Angstrom/ps
    pub velocity: Vector3D,
}

/// Draws speed-scaled directions uniformly over a spherical triangle
#[derive(Debug, Clone)]
pub struct DirectionSampler {
    pub triangle: SphericalTriangle,
    /// Mass of the recoiling atom in kg
    pub mass_kg: f64,
}

impl Default for DirectionSampler {
    fn default() -> Self {
        Self {
            triangle: SphericalTriangle::default(),
            mass_kg: constants::TUNGSTEN_MASS_KG,
        }
    }
}

impl DirectionSampler {
    pub fn new(triangle: SphericalTriangle, mass_kg: f64) -> Self {
        Self { triangle, mass_kg }
    }

    /// Speed in Angstrom/ps for a kinetic energy in keV
    pub fn speed(&self, energy_kev: f64) -> f64 {
        speed_from_energy(energy_kev, self.mass_kg)
    }

    /// Draw `count` initial velocities
    ///
    /// # Arguments
    ///
    /// * `count` - Number of samples, must be positive
    /// * `half_length` - Half length of the simulation box, must be positive
    /// * `energy_kev` - PKA kinetic energy in keV, must be positive
    /// * `rng` - Random generator; the only state shared between samples
    pub fn sample<R: Rng + ?Sized>(
        &self,
        count: usize,
        half_length: i64,
        energy_kev: f64,
        rng: &mut R,
    ) -> Result<Vec<DirectionSample>> {
        if count == 0 {
            return Err(SamplingError::InvalidCount(count));
        }
        if half_length <= 0 {
            return Err(SamplingError::InvalidBoxLength(half_length));
        }
        if !(energy_kev > 0.0 && energy_kev.is_finite()) {
            return Err(SamplingError::InvalidEnergy(energy_kev));
        }
        if !(self.mass_kg > 0.0) {
            return Err(SamplingError::InvalidParameter(format!(
                "mass must be positive, got {}",
                self.mass_kg
            )));
        }

        let speed = self.speed(energy_kev);
        let samples = (0..count)
            .map(|_| DirectionSample {
                half_length,
                velocity: self.triangle.sample(rng) * speed,
            })
            .collect();
        Ok(samples)
    }
}

/// Write samples as `%d %.4f %.4f %.4f` rows
pub fn write_velocities<W: Write>(writer: &mut W, samples: &[DirectionSample]) -> Result<()> {
    for sample in samples {
        writeln!(
            writer,
            "{} {:.4} {:.4} {:.4}",
            sample.half_length, sample.velocity.x, sample.velocity.y, sample.velocity.z
        )?;
    }
    Ok(())
}

/// Write samples to a file, see [`write_velocities`]
pub fn save_velocities<P: AsRef<Path>>(path: P, samples: &[DirectionSample]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_velocities(&mut writer, samples)?;
    writer.flush()?;
    Ok(())
}
