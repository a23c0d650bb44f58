/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Whitespace-separated numeric tables
//!
//! Every analysis in this crate exchanges data through plain text tables:
//! one row per line, columns separated by whitespace, optional header lines
//! at the top and `#` comment lines anywhere. Downstream scripts read these
//! tables positionally, so readers here are lenient about spacing but strict
//! about the number of columns.

use super::errors::{Result, UtilsError};
use ndarray::Array2;
use std::fs;
use std::path::Path;

/// Parse a numeric table from text
///
/// # Arguments
///
/// * `content` - Table text
/// * `skip_header` - Number of leading non-blank lines to ignore
///
/// # Returns
///
/// An `rows × columns` array. A table with no data rows has shape `(0, 0)`.
pub fn parse_table(content: &str, skip_header: usize) -> Result<Array2<f64>> {
    let mut values = Vec::new();
    let mut columns: Option<usize> = None;
    let mut rows = 0;
    let mut skipped = 0;

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if skipped < skip_header {
            skipped += 1;
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        let mut count = 0;
        for field in line.split_whitespace() {
            let value = field.parse::<f64>().map_err(|e| UtilsError::ParseError {
                line: index + 1,
                message: format!("'{}': {}", field, e),
            })?;
            values.push(value);
            count += 1;
        }

        match columns {
            None => columns = Some(count),
            Some(expected) if expected != count => {
                return Err(UtilsError::InvalidTable(format!(
                    "line {} has {} columns, expected {}",
                    index + 1,
                    count,
                    expected
                )));
            }
            _ => {}
        }
        rows += 1;
    }

    let columns = columns.unwrap_or(0);
    Array2::from_shape_vec((rows, columns), values)
        .map_err(|e| UtilsError::InvalidTable(e.to_string()))
}

/// Read a numeric table from a file
pub fn read_table<P: AsRef<Path>>(path: P, skip_header: usize) -> Result<Array2<f64>> {
    let content = fs::read_to_string(path)?;
    parse_table(&content, skip_header)
}

/// Shortest round-trip formatting of a float
///
/// Integral values keep a trailing `.0`, so `0` prints as `0.0`.
pub fn format_shortest(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
