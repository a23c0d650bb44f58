/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the utils module

use std::io;
use thiserror::Error;

/// Errors that can occur while reading or writing whitespace tables
#[derive(Error, Debug)]
pub enum UtilsError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// A field could not be parsed as a number
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Rows of a table have differing column counts
    #[error("Invalid table: {0}")]
    InvalidTable(String),
}

/// A specialized Result type for utils operations
pub type Result<T> = std::result::Result<T, UtilsError>;
