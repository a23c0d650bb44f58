/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! # irradiation-rs
//!
//! Post-processing tools for displacement-cascade studies of tungsten.
//!
//! The crate covers the pipeline around molecular-dynamics cascade runs:
//! sampling initial PKA velocities, turning per-trial defect dumps into
//! cluster-size frequency tables, binning SRIM recoil energies into a PKA
//! spectrum, and weighting the frequency tables by that spectrum into a
//! cluster production distribution.

pub mod cli;
pub mod config;
pub mod defects;
pub mod plot;
pub mod sampling;
pub mod spectrum;
pub mod utils;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
