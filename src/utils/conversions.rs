/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Unit conversion utilities

use super::constants;

/// Convert energy from keV to joules
pub fn kev_to_joule(kev: f64) -> f64 {
    kev * 1000.0 * constants::EV_TO_JOULE
}

/// Convert energy from eV to keV
pub fn ev_to_kev(ev: f64) -> f64 {
    ev / 1000.0
}

/// Convert energy from keV to eV
pub fn kev_to_ev(kev: f64) -> f64 {
    kev * 1000.0
}

/// Speed in Angstrom/ps of a particle of `mass_kg` carrying `energy_kev`
///
/// Non-relativistic: v = sqrt(2E/m).
pub fn speed_from_energy(energy_kev: f64, mass_kg: f64) -> f64 {
    (2.0 * kev_to_joule(energy_kev) / mass_kg).sqrt() * constants::MPS_TO_ANGSTROM_PER_PS
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_conversions() {
        let kev = 1.5;
        assert_relative_eq!(ev_to_kev(kev_to_ev(kev)), kev, epsilon = 1e-12);
        assert_relative_eq!(kev_to_joule(1.0), 1.602e-16, epsilon = 1e-26);
    }

    #[test]
    fn test_speed_of_tungsten_atom() {
        // 0.1 keV tungsten atom: sqrt(2 * 1.602e-17 / 3.0527348e-25) / 100
        let v = speed_from_energy(0.1, constants::TUNGSTEN_MASS_KG);
        assert_relative_eq!(v, 102.4476, epsilon = 1e-3);
    }
}
