/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Utility functions shared by the irradiation analyses
//!
//! Physical constants, unit conversions, the `Vector3D` type and
//! whitespace table I/O.

pub mod constants;
pub mod conversions;
pub mod errors;
pub mod table;
pub mod vector;

pub use conversions::{ev_to_kev, kev_to_ev, kev_to_joule, speed_from_energy};
pub use errors::{Result, UtilsError};
pub use table::{format_shortest, parse_table, read_table};
pub use vector::Vector3D;
