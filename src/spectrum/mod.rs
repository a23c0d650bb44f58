/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! PKA energy spectra
//!
//! Recoil energies from SRIM collision logs are binned into logarithmic
//! intervals; the resulting table is the PKA spectrum that weights the MD
//! cascade results of each energy.

pub mod binner;
pub mod bins;
pub mod collision;
pub mod damage;
pub mod errors;
pub mod pka_table;

pub use binner::{SpectrumBin, SpectrumBinner, SpectrumTable};
pub use bins::LogBins;
pub use collision::{parse_collision_log, read_collision_log, CollisionLog};
pub use damage::DamageEnergyModel;
pub use errors::{Result, SpectrumError};
pub use pka_table::{PkaInterval, PkaSpectrum};
