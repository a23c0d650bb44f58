/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Cluster production distribution over a PKA spectrum
//!
//! MD cascades are run at a handful of PKA energies. Each energy stands for
//! the spectrum interval it falls in, sharing the interval's proportion with
//! the other simulated energies of that interval. The weighted cluster
//! frequencies are normalized per point defect.

use super::errors::{DefectError, Result};
use super::frequency::FrequencyTable;
use crate::spectrum::PkaSpectrum;
use crate::utils::read_table;
use log::{info, warn};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Values below this are treated as absent
pub const PRODUCTION_THRESHOLD: f64 = 1.0e-10;

/// Number of clusters of one size per point defect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductionEntry {
    pub size: usize,
    pub number: f64,
    pub std: Option<f64>,
}

/// Cluster production distribution, sorted by size
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductionDistribution {
    pub entries: Vec<ProductionEntry>,
    /// Weighted mean number of point defects used as the normalization
    pub point_defects: f64,
}

/// MD results for one PKA energy
#[derive(Debug, Clone)]
pub struct EnergyResult {
    /// PKA energy in keV used to look up the spectrum interval
    pub pka_energy: f64,
    pub table: FrequencyTable,
}

impl ProductionDistribution {
    /// Write with a `Size   Number   Std` header and `%d %.8f [%.8f]` rows
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "Size   Number   Std")?;
        for e in &self.entries {
            match e.std {
                Some(std) => writeln!(writer, "{} {:.8} {:.8}", e.size, e.number, std)?,
                None => writeln!(writer, "{} {:.8}", e.size, e.number)?,
            }
        }
        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Read a distribution written by [`ProductionDistribution::write`]
    ///
    /// The normalization is not stored in the file; `point_defects` is
    /// recomputed as Σ size·number.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DefectError::MissingFile(path.to_path_buf()));
        }
        let table = read_table(path, 1)?;
        if table.nrows() > 0 && !(2..=3).contains(&table.ncols()) {
            return Err(DefectError::InvalidTable(format!(
                "production table needs 2 or 3 columns, found {}",
                table.ncols()
            )));
        }
        let mut entries = Vec::with_capacity(table.nrows());
        for row in table.rows() {
            if !(row[0] >= 0.0) || row[0].fract() != 0.0 {
                return Err(DefectError::InvalidTable(format!(
                    "cluster size must be a non-negative integer, got {}",
                    row[0]
                )));
            }
            entries.push(ProductionEntry {
                size: row[0] as usize,
                number: row[1],
                std: if row.len() == 3 { Some(row[2]) } else { None },
            });
        }
        let point_defects = entries.iter().map(|e| e.size as f64 * e.number).sum();
        Ok(Self {
            entries,
            point_defects,
        })
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.size).collect()
    }

    pub fn numbers(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.number).collect()
    }
}

/// Weight per-energy cluster frequencies by a PKA spectrum
///
/// # Arguments
///
/// * `spectrum` - PKA spectrum with proportions and variances
/// * `results` - Frequency table of every simulated PKA energy
/// * `trim_ratio` - If set and variances are available, cut the table at
///   the first size whose value/std falls below this ratio
///
/// # Returns
///
/// The production distribution per point defect. A standard deviation is
/// propagated when every input table carries variances.
pub fn production_distribution(
    spectrum: &PkaSpectrum,
    results: &[EnergyResult],
    trim_ratio: Option<f64>,
) -> Result<ProductionDistribution> {
    let mut counts = vec![0usize; spectrum.len()];
    for r in results {
        if let Some(bin) = spectrum.locate(r.pka_energy) {
            counts[bin] += 1;
        }
    }

    let with_std = results.iter().all(|r| r.table.has_variance());
    let mut accumulate: BTreeMap<usize, f64> = BTreeMap::new();
    let mut variance: BTreeMap<usize, f64> = BTreeMap::new();

    for r in results {
        let bin = match spectrum.locate(r.pka_energy) {
            Some(bin) => bin,
            None => {
                warn!(
                    "PKA energy {} keV lies outside the spectrum, ignored",
                    r.pka_energy
                );
                continue;
            }
        };
        let interval = spectrum.intervals()[bin];
        let (p, p_var) = (interval.proportion, interval.variance);
        let count = counts[bin] as f64;

        for e in &r.table.entries {
            *accumulate.entry(e.size).or_insert(0.0) += e.mean * p / count;
            if with_std {
                let (n, n_var) = (e.mean, e.variance.unwrap_or(0.0));
                let v = ((p_var + p * p) * (n_var + n * n) - (n * p).powi(2)) / (count * count);
                *variance.entry(e.size).or_insert(0.0) += v;
            }
        }
    }

    let max_size = match accumulate.keys().next_back() {
        Some(&m) => m,
        None => return Err(DefectError::NoData("no cluster data to combine".to_string())),
    };

    // dense over 1..=max_size
    let values: Vec<f64> = (1..=max_size)
        .map(|s| accumulate.get(&s).copied().unwrap_or(0.0))
        .collect();
    let variances: Vec<f64> = (1..=max_size)
        .map(|s| variance.get(&s).copied().unwrap_or(0.0))
        .collect();
    let mut total: f64 = values
        .iter()
        .enumerate()
        .map(|(i, v)| (i + 1) as f64 * v)
        .sum();

    let mut end = values.len();
    if let (Some(ratio), true) = (trim_ratio, with_std) {
        if let Some(cut) = (0..values.len()).find(|&i| {
            values[i] > PRODUCTION_THRESHOLD
                && variances[i] > 0.0
                && values[i] / variances[i].sqrt() < ratio
        }) {
            end = cut;
            for i in end..values.len() {
                total -= (i + 1) as f64 * values[i];
            }
            info!("production table trimmed at size {}", end + 1);
        }
    }

    if !(total > 0.0) {
        return Err(DefectError::NoData(
            "cluster data contain no point defects".to_string(),
        ));
    }

    let entries = (0..end)
        .filter(|&i| values[i] > PRODUCTION_THRESHOLD)
        .map(|i| ProductionEntry {
            size: i + 1,
            number: values[i] / total,
            std: with_std.then(|| variances[i].max(0.0).sqrt() / total),
        })
        .collect();

    Ok(ProductionDistribution {
        entries,
        point_defects: total,
    })
}

/// Mean number of point defects of every simulated energy
pub fn point_defects_by_energy(results: &[EnergyResult]) -> Vec<(f64, f64)> {
    results
        .iter()
        .map(|r| (r.pka_energy, r.table.total_point_defects()))
        .collect()
}
