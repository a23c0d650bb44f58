/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for analysis configuration

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
