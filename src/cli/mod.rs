/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Command Line Interface (CLI) module
//!
//! Every analysis is a separate binary taking a few positional arguments.
//! The argument types and the work behind each binary live here so that the
//! binaries themselves stay a few lines long.

pub mod commands;

pub use commands::*;

use crate::config::AnalysisConfig;
use anyhow::Context;

/// Initialize `env_logger`, showing info messages unless `RUST_LOG` says otherwise
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Load the analysis configuration from `IRRADIATION_CONFIG` or defaults
pub fn load_config() -> anyhow::Result<AnalysisConfig> {
    AnalysisConfig::load().context("failed to load analysis configuration")
}
