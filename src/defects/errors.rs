/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the defects module

use crate::spectrum::SpectrumError;
use crate::utils::UtilsError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during defect and cluster analysis
#[derive(Error, Debug)]
pub enum DefectError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Table error: {0}")]
    TableError(#[from] UtilsError),

    #[error("Spectrum error: {0}")]
    SpectrumError(#[from] SpectrumError),

    #[error("File does not exist: {0}")]
    MissingFile(PathBuf),

    #[error("Invalid dump file: {0}")]
    InvalidDump(String),

    #[error("Dump file has no '{0}' column")]
    MissingColumn(String),

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Invalid table: {0}")]
    InvalidTable(String),

    #[error("No effective trials out of {0}")]
    NoEffectiveTrials(usize),

    #[error("No data: {0}")]
    NoData(String),
}

/// Result type for defect operations
pub type Result<T> = std::result::Result<T, DefectError>;
