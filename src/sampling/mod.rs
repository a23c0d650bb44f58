/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Initial conditions for cascade simulations
//!
//! The PKA of every cascade run starts with a random direction drawn
//! uniformly over the irreducible spherical triangle of the BCC lattice,
//! at the speed that corresponds to its kinetic energy. The random generator
//! is always passed in explicitly so that a seed fully determines the output.

pub mod directions;
pub mod errors;
pub mod speed_scan;
pub mod triangle;

pub use directions::{save_velocities, write_velocities, DirectionSample, DirectionSampler};
pub use errors::{Result, SamplingError};
pub use speed_scan::{speed_scan, write_speed_scan, SpeedScanRow};
pub use triangle::SphericalTriangle;

/// Seed used for the published cascade runs
pub const DEFAULT_SEED: u64 = 173257393;

/// Number of cascade runs per PKA energy
pub const DEFAULT_SAMPLE_COUNT: usize = 30;
