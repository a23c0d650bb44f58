/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the spectrum module

use crate::utils::UtilsError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or binning energy spectra
#[derive(Error, Debug)]
pub enum SpectrumError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Table error: {0}")]
    TableError(#[from] UtilsError),

    #[error("File does not exist: {0}")]
    MissingFile(PathBuf),

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Invalid bins: {0}")]
    InvalidBins(String),

    #[error("Invalid spectrum table: {0}")]
    InvalidTable(String),

    #[error("Empty spectrum: {0}")]
    Empty(String),
}

/// Result type for spectrum operations
pub type Result<T> = std::result::Result<T, SpectrumError>;
