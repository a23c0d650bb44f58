/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the sampling module

use std::io;
use thiserror::Error;

/// Errors that can occur while generating initial velocities
#[derive(Error, Debug)]
pub enum SamplingError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Invalid sample count: {0}")]
    InvalidCount(usize),

    #[error("Invalid kinetic energy: {0} keV")]
    InvalidEnergy(f64),

    #[error("Invalid box half-length: {0}")]
    InvalidBoxLength(i64),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for sampling operations
pub type Result<T> = std::result::Result<T, SamplingError>;
