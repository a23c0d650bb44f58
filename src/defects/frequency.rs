/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Cluster-size frequency tables
//!
//! Each cascade trial yields a list of cluster sizes. The aggregator turns
//! the trials into the mean number of clusters of each size per trial and
//! the trial-to-trial variance of that number. Only effective trials
//! (those that passed the boundary check) enter the denominator.

use super::errors::{DefectError, Result};
use crate::utils::parse_table;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Normalization of the variance column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceMode {
    /// Variance of the per-trial count, E[n²] - E[n]²
    #[default]
    PerTrial,
    /// Variance of the mean, i.e. the per-trial variance divided by the
    /// number of effective trials
    OfMean,
}

/// Mean and variance of the count of one cluster size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyEntry {
    pub size: usize,
    pub mean: f64,
    pub variance: Option<f64>,
}

/// Cluster size → (mean count per trial, variance), sorted by size
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrequencyTable {
    pub entries: Vec<FrequencyEntry>,
    /// Number of trials the table was averaged over, if known
    pub effective_trials: Option<usize>,
}

impl FrequencyTable {
    pub fn mean(&self, size: usize) -> f64 {
        self.entry(size).map_or(0.0, |e| e.mean)
    }

    pub fn entry(&self, size: usize) -> Option<&FrequencyEntry> {
        self.entries
            .binary_search_by_key(&size, |e| e.size)
            .ok()
            .map(|i| &self.entries[i])
    }

    /// Whether every entry carries a variance
    pub fn has_variance(&self) -> bool {
        self.entries.iter().all(|e| e.variance.is_some())
    }

    /// Mean number of point defects per trial, Σ size·mean
    pub fn total_point_defects(&self) -> f64 {
        self.entries.iter().map(|e| e.size as f64 * e.mean).sum()
    }

    /// Write the table
    ///
    /// With variance: `# Size Number Variance` header and `%d %.4f %.4f`
    /// rows. Without: bare `%d %.4f` rows.
    pub fn write<W: Write>(&self, writer: &mut W, include_variance: bool) -> Result<()> {
        if include_variance {
            writeln!(writer, "# Size Number Variance")?;
            for e in &self.entries {
                writeln!(
                    writer,
                    "{} {:.4} {:.4}",
                    e.size,
                    e.mean,
                    e.variance.unwrap_or(0.0)
                )?;
            }
        } else {
            for e in &self.entries {
                writeln!(writer, "{} {:.4}", e.size, e.mean)?;
            }
        }
        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P, include_variance: bool) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(&mut writer, include_variance)?;
        writer.flush()?;
        Ok(())
    }

    /// Parse a table written by [`FrequencyTable::write`]
    ///
    /// An empty input stands for a trial set without defects and yields the
    /// single entry `1 0`. Size-0 rows are dropped.
    pub fn parse(content: &str) -> Result<Self> {
        let table = parse_table(content, 0)?;
        if table.nrows() == 0 {
            return Ok(Self {
                entries: vec![FrequencyEntry {
                    size: 1,
                    mean: 0.0,
                    variance: None,
                }],
                effective_trials: None,
            });
        }
        let columns = table.ncols();
        if !(2..=3).contains(&columns) {
            return Err(DefectError::InvalidTable(format!(
                "frequency table needs 2 or 3 columns, found {}",
                columns
            )));
        }

        let mut entries = Vec::with_capacity(table.nrows());
        for row in table.rows() {
            if row[0] < 0.0 || row[0].fract() != 0.0 {
                return Err(DefectError::InvalidTable(format!(
                    "cluster size must be a non-negative integer, got {}",
                    row[0]
                )));
            }
            let size = row[0] as usize;
            if size == 0 {
                continue;
            }
            entries.push(FrequencyEntry {
                size,
                mean: row[1],
                variance: if columns == 3 { Some(row[2]) } else { None },
            });
        }
        entries.sort_by_key(|e| e.size);
        Ok(Self {
            entries,
            effective_trials: None,
        })
    }

    /// Read a frequency table file; a missing file is an error
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DefectError::MissingFile(path.to_path_buf()));
        }
        Self::parse(&fs::read_to_string(path)?)
    }
}

/// Running sums of count and squared count per cluster size
#[derive(Debug, Clone, Default)]
pub struct ClusterFrequencyAggregator {
    sums: BTreeMap<usize, (f64, f64)>,
    effective_trials: usize,
    skipped_trials: usize,
    variance_mode: VarianceMode,
}

impl ClusterFrequencyAggregator {
    pub fn new(variance_mode: VarianceMode) -> Self {
        Self {
            variance_mode,
            ..Self::default()
        }
    }

    /// Add one effective trial
    ///
    /// Size 0 is ignored. Sizes absent from the trial count as zero for it.
    pub fn add_trial(&mut self, cluster_sizes: &[usize]) {
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for &size in cluster_sizes.iter().filter(|&&s| s > 0) {
            *counts.entry(size).or_insert(0) += 1;
        }
        for (size, count) in counts {
            let count = count as f64;
            let sum = self.sums.entry(size).or_insert((0.0, 0.0));
            sum.0 += count;
            sum.1 += count * count;
        }
        self.effective_trials += 1;
    }

    /// Record a trial that failed the boundary check
    pub fn skip_trial(&mut self) {
        self.skipped_trials += 1;
    }

    /// Add or skip a trial depending on its validity
    pub fn record(&mut self, cluster_sizes: &[usize], valid: bool) {
        if valid {
            self.add_trial(cluster_sizes);
        } else {
            self.skip_trial();
        }
    }

    pub fn effective_trials(&self) -> usize {
        self.effective_trials
    }

    pub fn skipped_trials(&self) -> usize {
        self.skipped_trials
    }

    /// Normalize the sums over the effective trials
    pub fn finish(&self) -> Result<FrequencyTable> {
        if self.effective_trials == 0 {
            return Err(DefectError::NoEffectiveTrials(self.skipped_trials));
        }
        let n = self.effective_trials as f64;
        let entries = self
            .sums
            .iter()
            .map(|(&size, &(sum, sum_sq))| {
                let mean = sum / n;
                let variance = (sum_sq / n - mean * mean).max(0.0);
                let variance = match self.variance_mode {
                    VarianceMode::PerTrial => variance,
                    VarianceMode::OfMean => variance / n,
                };
                FrequencyEntry {
                    size,
                    mean,
                    variance: Some(variance),
                }
            })
            .collect();
        Ok(FrequencyTable {
            entries,
            effective_trials: Some(self.effective_trials),
        })
    }
}
