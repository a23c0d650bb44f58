/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Tabulated PKA energy spectra
//!
//! Columns: lower limit, upper limit and mean energy of each interval (keV),
//! proportion of PKAs in the interval and its variance. The first line is a
//! header.

use super::binner::SpectrumTable;
use super::errors::{Result, SpectrumError};
use crate::utils::read_table;
use std::path::Path;

/// One energy interval of a PKA spectrum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PkaInterval {
    pub low: f64,
    pub high: f64,
    pub mean: f64,
    pub proportion: f64,
    pub variance: f64,
}

/// PKA spectrum with intervals sorted by lower limit
#[derive(Debug, Clone, PartialEq)]
pub struct PkaSpectrum {
    intervals: Vec<PkaInterval>,
}

impl PkaSpectrum {
    pub fn new(mut intervals: Vec<PkaInterval>) -> Result<Self> {
        if intervals.is_empty() {
            return Err(SpectrumError::Empty("PKA spectrum has no intervals".to_string()));
        }
        if let Some(bad) = intervals.iter().find(|i| !(i.low < i.high)) {
            return Err(SpectrumError::InvalidTable(format!(
                "interval [{}, {}) is empty",
                bad.low, bad.high
            )));
        }
        intervals.sort_by(|a, b| a.low.total_cmp(&b.low));
        Ok(Self { intervals })
    }

    /// Build from a binned recoil spectrum
    pub fn from_table(table: &SpectrumTable) -> Result<Self> {
        Self::new(
            table
                .bins
                .iter()
                .map(|b| PkaInterval {
                    low: b.left,
                    high: b.right,
                    mean: b.median,
                    proportion: b.proportion,
                    variance: b.variance,
                })
                .collect(),
        )
    }

    /// Read a spectrum file with one header line
    ///
    /// A four-column table without variances is accepted; variances are
    /// then zero.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SpectrumError::MissingFile(path.to_path_buf()));
        }
        let table = read_table(path, 1)?;
        if table.nrows() == 0 {
            return Err(SpectrumError::Empty(path.display().to_string()));
        }
        if table.ncols() < 4 {
            return Err(SpectrumError::InvalidTable(format!(
                "expected at least 4 columns, found {}",
                table.ncols()
            )));
        }
        let has_variance = table.ncols() >= 5;
        Self::new(
            table
                .rows()
                .into_iter()
                .map(|row| PkaInterval {
                    low: row[0],
                    high: row[1],
                    mean: row[2],
                    proportion: row[3],
                    variance: if has_variance { row[4] } else { 0.0 },
                })
                .collect(),
        )
    }

    pub fn intervals(&self) -> &[PkaInterval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Mean energies of all intervals in keV
    pub fn mean_energies(&self) -> Vec<f64> {
        self.intervals.iter().map(|i| i.mean).collect()
    }

    /// Index of the interval with `low <= energy < high`
    ///
    /// Energies at or above the upper limit of the last interval belong to
    /// the last interval. Energies below the first interval or inside a gap
    /// between intervals belong to none.
    pub fn locate(&self, energy: f64) -> Option<usize> {
        let last = self.intervals.len() - 1;
        if energy >= self.intervals[last].high {
            return Some(last);
        }
        let candidates = self.intervals.partition_point(|i| i.low <= energy);
        if candidates == 0 {
            return None;
        }
        let index = candidates - 1;
        (energy < self.intervals[index].high).then_some(index)
    }

    /// Proportion and variance of the interval containing `energy`
    pub fn proportion(&self, energy: f64) -> (f64, f64) {
        self.locate(energy)
            .map(|i| (self.intervals[i].proportion, self.intervals[i].variance))
            .unwrap_or((0.0, 0.0))
    }
}
