/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Cluster production rates at an experimental dose rate

use super::production::{ProductionDistribution, PRODUCTION_THRESHOLD};
use std::fmt;

/// Production per point defect multiplied by a point-defect production rate
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledProduction {
    /// (cluster size, rate) for every size with a non-negligible rate
    pub rows: Vec<(usize, f64)>,
    /// Σ size·rate
    pub total_point_defects: f64,
}

/// Scale a production distribution by `factor`
///
/// For 150 keV self-ions at 0.0125 dpa/s the factor is 7.9e8 point defects
/// per µm³·s.
pub fn scale_production(distribution: &ProductionDistribution, factor: f64) -> ScaledProduction {
    let rows: Vec<(usize, f64)> = distribution
        .entries
        .iter()
        .map(|e| (e.size, e.number * factor))
        .filter(|&(_, rate)| rate > PRODUCTION_THRESHOLD)
        .collect();
    let total_point_defects = rows.iter().map(|&(s, r)| s as f64 * r).sum();
    ScaledProduction {
        rows,
        total_point_defects,
    }
}

impl fmt::Display for ScaledProduction {
    /// Sizes and truncated integer rates as bracketed lists, then the total
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sizes: Vec<String> = self.rows.iter().map(|(s, _)| s.to_string()).collect();
        let rates: Vec<String> = self
            .rows
            .iter()
            .map(|(_, r)| (r.trunc() as i64).to_string())
            .collect();
        writeln!(f, "size   #/um^3s")?;
        writeln!(f, "[{}]", sizes.join(" "))?;
        writeln!(f, "[{}]", rates.join(" "))?;
        write!(f, "Total point defects: {}", self.total_point_defects)
    }
}
