/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Logarithmically spaced energy bins

use super::errors::{Result, SpectrumError};

/// Sorted bin edges; bin `i` covers `(edges[i], edges[i + 1]]`
#[derive(Debug, Clone, PartialEq)]
pub struct LogBins {
    edges: Vec<f64>,
    medians: Vec<f64>,
}

impl LogBins {
    /// Bins from explicit edges, with geometric-mean medians
    pub fn from_edges(edges: Vec<f64>) -> Result<Self> {
        if edges.len() < 2 {
            return Err(SpectrumError::InvalidBins(
                "at least two edges are required".to_string(),
            ));
        }
        if edges.iter().any(|e| !e.is_finite() || *e <= 0.0) {
            return Err(SpectrumError::InvalidBins(
                "edges must be finite and positive".to_string(),
            ));
        }
        if edges.windows(2).any(|w| w[0] >= w[1]) {
            return Err(SpectrumError::InvalidBins(
                "edges must be strictly increasing".to_string(),
            ));
        }
        let medians = edges.windows(2).map(|w| (w[0] * w[1]).sqrt()).collect();
        Ok(Self { edges, medians })
    }

    /// Bins centred on the decimal exponents `start, start + step, ... < end`
    ///
    /// Bin `k` spans `10^(x_k - step/2)` to `10^(x_k + step/2)` with median
    /// `10^x_k`. Adjacent bins share one edge value.
    pub fn centered(start: f64, end: f64, step: f64) -> Result<Self> {
        if !(step > 0.0) || !start.is_finite() || !end.is_finite() || end <= start {
            return Err(SpectrumError::InvalidBins(format!(
                "invalid exponent range {}..{} step {}",
                start, end, step
            )));
        }
        Ok(Self::build_centered(start, end, step))
    }

    /// Default SRIM recoil bins in eV: exponents 2 to 6 in steps of 0.2
    pub fn srim_default() -> Self {
        Self::build_centered(2.0, 6.0, 0.2)
    }

    fn build_centered(start: f64, end: f64, step: f64) -> Self {
        // same count as numpy.arange(start, end, step)
        let count = ((end - start) / step).ceil() as usize;
        let exponent = |k: usize| start + k as f64 * step;
        let edges = (0..=count)
            .map(|k| 10f64.powf(exponent(k) - step / 2.0))
            .collect();
        let medians = (0..count).map(|k| 10f64.powf(exponent(k))).collect();
        Self { edges, medians }
    }

    pub fn len(&self) -> usize {
        self.medians.len()
    }

    pub fn is_empty(&self) -> bool {
        self.medians.is_empty()
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn left(&self, bin: usize) -> f64 {
        self.edges[bin]
    }

    pub fn right(&self, bin: usize) -> f64 {
        self.edges[bin + 1]
    }

    pub fn median(&self, bin: usize) -> f64 {
        self.medians[bin]
    }

    /// Bin containing `value`, found by binary search over the edges
    ///
    /// Returns `None` for values at or below the first edge, above the last
    /// edge, or NaN.
    pub fn locate(&self, value: f64) -> Option<usize> {
        if value.is_nan() {
            return None;
        }
        let below = self.edges.partition_point(|&e| e < value);
        if below == 0 || below > self.len() {
            None
        } else {
            Some(below - 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_srim_default_layout() {
        let bins = LogBins::srim_default();
        assert_eq!(bins.len(), 20);
        assert_relative_eq!(bins.left(0), 10f64.powf(1.9), max_relative = 1e-12);
        assert_relative_eq!(bins.median(0), 100.0, max_relative = 1e-12);
        assert_relative_eq!(bins.right(19), 10f64.powf(5.9), max_relative = 1e-9);
        assert_relative_eq!(bins.median(19), 10f64.powf(5.8), max_relative = 1e-9);
    }

    #[test]
    fn test_locate_is_right_inclusive() {
        let bins = LogBins::from_edges(vec![1.0, 10.0, 100.0]).unwrap();
        assert_eq!(bins.locate(1.0), None);
        assert_eq!(bins.locate(1.5), Some(0));
        assert_eq!(bins.locate(10.0), Some(0));
        assert_eq!(bins.locate(10.5), Some(1));
        assert_eq!(bins.locate(100.0), Some(1));
        assert_eq!(bins.locate(100.1), None);
        assert_eq!(bins.locate(f64::NAN), None);
    }

    #[test]
    fn test_invalid_edges() {
        assert!(LogBins::from_edges(vec![1.0]).is_err());
        assert!(LogBins::from_edges(vec![1.0, 1.0]).is_err());
        assert!(LogBins::from_edges(vec![0.0, 1.0]).is_err());
        assert!(LogBins::centered(2.0, 1.0, 0.1).is_err());
    }
}
