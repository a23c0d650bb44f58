/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Damage energy of a primary knock-on atom
//!
//! Only part of a PKA's energy goes into nuclear collisions; the rest is
//! lost to electrons. The Lindhard partition with the Robinson fit gives the
//! damage energy `T / (1 + k·g(ε))`, which is the energy an MD cascade
//! without electronic stopping should be started with.

use crate::utils::{constants, ev_to_kev, kev_to_ev};
use std::f64::consts::PI;

/// Projectile and target of a self-ion cascade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageEnergyModel {
    /// Atomic mass
    pub mass: f64,
    /// Atomic number
    pub atomic_number: f64,
}

impl Default for DamageEnergyModel {
    fn default() -> Self {
        Self::tungsten()
    }
}

impl DamageEnergyModel {
    pub fn tungsten() -> Self {
        Self {
            mass: constants::TUNGSTEN_ATOMIC_MASS,
            atomic_number: constants::TUNGSTEN_ATOMIC_NUMBER,
        }
    }

    /// Lindhard electronic stopping constant k
    pub fn k(&self) -> f64 {
        let z = self.atomic_number;
        0.1337 * z.powf(1.0 / 6.0) * (z / self.mass).sqrt()
    }

    /// Screening radius in 1/eV (natural units)
    pub fn screening_radius(&self) -> f64 {
        let z23 = self.atomic_number.powf(2.0 / 3.0);
        (9.0 * PI * PI / 128.0).powf(1.0 / 3.0) * 2.6817268e-4 * (z23 + z23).powf(-0.5)
    }

    /// Reduced energy ε for a PKA energy in eV
    pub fn reduced_energy(&self, energy_ev: f64) -> f64 {
        let z = self.atomic_number;
        let a = self.screening_radius();
        (self.mass * energy_ev / (self.mass + self.mass)) * a / (z * z * 8.5424546e-2_f64.powi(2))
    }

    /// Damage energy in eV for a PKA energy in eV
    pub fn damage_energy(&self, energy_ev: f64) -> f64 {
        let eps = self.reduced_energy(energy_ev);
        let g = 3.4008 * eps.powf(1.0 / 6.0) + 0.40244 * eps.powf(0.75) + eps;
        energy_ev / (1.0 + self.k() * g)
    }

    /// Damage energy in keV for a PKA energy in keV
    pub fn damage_energy_kev(&self, energy_kev: f64) -> f64 {
        ev_to_kev(self.damage_energy(kev_to_ev(energy_kev)))
    }
}
