/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the plot module

use thiserror::Error;

/// Errors that can occur while drawing a chart
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Nothing to plot: {0}")]
    NoData(String),

    #[error("Drawing error: {0}")]
    Drawing(String),
}

/// Result type for plot operations
pub type Result<T> = std::result::Result<T, PlotError>;
