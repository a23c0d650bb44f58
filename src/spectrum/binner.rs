/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Recoil-energy spectrum binning
//!
//! Proportions are taken over all recoils, including those that fall
//! outside every bin, so they sum to one only for a fully covered input.

use super::bins::LogBins;
use super::errors::Result;
use crate::utils::format_shortest;
use ndarray::Array1;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One row of a binned spectrum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumBin {
    pub left: f64,
    pub right: f64,
    pub median: f64,
    pub proportion: f64,
    /// Binomial variance of the proportion, p(1 - p)/total
    pub variance: f64,
}

/// Binned spectrum
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumTable {
    pub bins: Vec<SpectrumBin>,
    /// Number of energies binned, inside the bins or not
    pub total: usize,
}

impl SpectrumTable {
    pub fn proportions(&self) -> Vec<f64> {
        self.bins.iter().map(|b| b.proportion).collect()
    }

    /// Sum of all proportions; 1.0 when every energy fell into a bin
    pub fn total_proportion(&self) -> f64 {
        self.bins.iter().map(|b| b.proportion).sum()
    }

    /// Write the table with a `Left[keV]  right[keV]  median[keV]  Prop  Variance` header
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "Left[keV]  right[keV]  median[keV]  Prop  Variance")?;
        for bin in &self.bins {
            writeln!(
                writer,
                "{:.4} {:.4} {:.4} {} {}",
                bin.left,
                bin.right,
                bin.median,
                format_shortest(bin.proportion),
                format_shortest(bin.variance)
            )?;
        }
        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Bins energies into fixed logarithmic bins
#[derive(Debug, Clone)]
pub struct SpectrumBinner {
    bins: LogBins,
    /// Factor applied to edges and medians in the output (e.g. eV → keV)
    output_scale: f64,
}

impl SpectrumBinner {
    pub fn new(bins: LogBins) -> Self {
        Self {
            bins,
            output_scale: 1.0,
        }
    }

    /// Report edges and medians multiplied by `scale`
    pub fn with_output_scale(mut self, scale: f64) -> Self {
        self.output_scale = scale;
        self
    }

    pub fn bins(&self) -> &LogBins {
        &self.bins
    }

    /// Count of energies per bin
    pub fn counts<I: IntoIterator<Item = f64>>(&self, energies: I) -> (Array1<f64>, usize) {
        let mut counts = Array1::<f64>::zeros(self.bins.len());
        let mut total = 0;
        for energy in energies {
            total += 1;
            if let Some(bin) = self.bins.locate(energy) {
                counts[bin] += 1.0;
            }
        }
        (counts, total)
    }

    /// Bin energies into proportions with their binomial variances
    ///
    /// An empty input gives zero proportions and variances.
    pub fn bin<I: IntoIterator<Item = f64>>(&self, energies: I) -> SpectrumTable {
        let (counts, total) = self.counts(energies);
        let n = total.max(1) as f64;
        let proportion = counts / n;
        let variance = proportion.mapv(|p| p * (1.0 - p) / n);

        let bins = (0..self.bins.len())
            .map(|i| SpectrumBin {
                left: self.bins.left(i) * self.output_scale,
                right: self.bins.right(i) * self.output_scale,
                median: self.bins.median(i) * self.output_scale,
                proportion: proportion[i],
                variance: variance[i],
            })
            .collect();
        SpectrumTable { bins, total }
    }
}
