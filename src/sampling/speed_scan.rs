/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Speed grid for tuning the ZBL splice of the interatomic potential
//!
//! Low-energy dimer collisions are run for every combination of energy and
//! inner splice radius; the outer radius sits a fixed `delta` further out.

use super::errors::{Result, SamplingError};
use crate::utils::{constants, speed_from_energy};
use std::io::Write;

/// Energies of the scan in eV
pub const SCAN_ENERGIES_EV: [f64; 4] = [30.0, 40.0, 50.0, 60.0];

/// One row of the scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedScanRow {
    pub energy_kev: f64,
    /// Speed in Angstrom/ps
    pub speed: f64,
    pub r_inner: f64,
    pub r_outer: f64,
}

/// Build the scan for inner radii 0.5, 0.6, ..., 1.4 Angstrom
pub fn speed_scan(delta: f64) -> Result<Vec<SpeedScanRow>> {
    if !delta.is_finite() || delta <= 0.0 {
        return Err(SamplingError::InvalidParameter(format!(
            "splice width must be positive, got {}",
            delta
        )));
    }

    let radii: Vec<f64> = (0..10).map(|i| 0.5 + 0.1 * i as f64).collect();
    let mut rows = Vec::with_capacity(SCAN_ENERGIES_EV.len() * radii.len());
    for energy_ev in SCAN_ENERGIES_EV {
        let energy_kev = energy_ev / 1000.0;
        let speed = speed_from_energy(energy_kev, constants::TUNGSTEN_MASS_KG);
        for &r in &radii {
            rows.push(SpeedScanRow {
                energy_kev,
                speed,
                r_inner: r,
                r_outer: r + delta,
            });
        }
    }
    Ok(rows)
}

/// Write the scan as `%.4f %.4f %.4f %.4f` rows
pub fn write_speed_scan<W: Write>(writer: &mut W, rows: &[SpeedScanRow]) -> Result<()> {
    for row in rows {
        writeln!(
            writer,
            "{:.4} {:.4} {:.4} {:.4}",
            row.energy_kev, row.speed, row.r_inner, row.r_outer
        )?;
    }
    Ok(())
}
