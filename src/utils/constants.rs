/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Physical constants used in the irradiation analyses

/// Elementary charge, used as the eV to joule factor
pub const EV_TO_JOULE: f64 = 1.602e-19;

/// Mass of a tungsten atom in kg
pub const TUNGSTEN_MASS_KG: f64 = 3.0527348e-25;

/// Standard atomic weight of tungsten
pub const TUNGSTEN_ATOMIC_MASS: f64 = 183.84;

/// Atomic number of tungsten
pub const TUNGSTEN_ATOMIC_NUMBER: f64 = 74.0;

/// BCC tungsten lattice parameter in Angstroms
pub const TUNGSTEN_LATTICE_PARAMETER: f64 = 3.1658;

/// Conversion from m/s to Angstrom/ps
pub const MPS_TO_ANGSTROM_PER_PS: f64 = 1.0e-2;
