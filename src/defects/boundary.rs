/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Boundary-validity policies for cascade trials
//!
//! A cascade whose damage reaches the periodic boundary interacts with its
//! own image and biases the cluster statistics, so such trials are dropped.
//! Two criteria have been used over the course of the study and both are
//! kept as named policies. Coordinates are compared in lattice units against
//! `L - margin`, where `L` is the box half-length.

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

/// Criterion deciding whether a set of defect sites stays clear of the box boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Invalid when the bounding region of all sites, rounded up to whole
    /// lattice units, exceeds `L - margin` along any axis
    Extent { margin: f64 },
    /// Invalid when at least `min_sites` sites have at least `min_axes`
    /// coordinates beyond `L - margin`
    CornerSites {
        margin: f64,
        min_axes: usize,
        min_sites: usize,
    },
}

impl BoundaryPolicy {
    /// The margin below the box half-length, in lattice units
    pub fn margin(&self) -> f64 {
        match *self {
            BoundaryPolicy::Extent { margin } => margin,
            BoundaryPolicy::CornerSites { margin, .. } => margin,
        }
    }

    /// Check an `N × 3` array of positions (Angstroms)
    ///
    /// # Arguments
    ///
    /// * `positions` - Defect-site positions, box centred on the origin
    /// * `lattice_parameter` - Lattice parameter in Angstroms
    /// * `box_half_length` - Box half-length in lattice units
    ///
    /// # Returns
    ///
    /// `true` when the sites stay within the margin. An empty set is valid.
    pub fn is_valid(
        &self,
        positions: &Array2<f64>,
        lattice_parameter: f64,
        box_half_length: f64,
    ) -> bool {
        if positions.nrows() == 0 {
            return true;
        }
        let limit = box_half_length - self.margin();
        let scaled = positions.mapv(|c| (c / lattice_parameter).abs());

        match *self {
            BoundaryPolicy::Extent { .. } => {
                let reach = scaled.fold(0.0_f64, |acc, &v| acc.max(v)).ceil();
                reach <= limit
            }
            BoundaryPolicy::CornerSites {
                min_axes, min_sites, ..
            } => {
                let outside = scaled
                    .map_axis(Axis(1), |row| row.iter().filter(|&&v| v > limit).count())
                    .iter()
                    .filter(|&&axes| axes >= min_axes)
                    .count();
                outside < min_sites
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    const A: f64 = 3.1658;

    #[test]
    fn test_extent_policy() {
        let policy = BoundaryPolicy::Extent { margin: 1.0 };
        // 8.5 lattice units rounds up to 9 = 10 - 1
        let inside = array![[8.5 * A, 0.0, -2.0 * A]];
        assert!(policy.is_valid(&inside, A, 10.0));
        // 9.2 rounds up to 10 > 9
        let outside = array![[0.0, -9.2 * A, 0.0]];
        assert!(!policy.is_valid(&outside, A, 10.0));
    }

    #[test]
    fn test_corner_policy_needs_all_axes() {
        let policy = BoundaryPolicy::CornerSites {
            margin: 2.0,
            min_axes: 3,
            min_sites: 1,
        };
        // two coordinates beyond 8 lattice units is not enough
        let edge = array![[8.5 * A, 8.5 * A, 0.0]];
        assert!(policy.is_valid(&edge, A, 10.0));
        let corner = array![[8.5 * A, -8.5 * A, 8.1 * A]];
        assert!(!policy.is_valid(&corner, A, 10.0));
    }

    #[test]
    fn test_corner_policy_site_threshold() {
        let policy = BoundaryPolicy::CornerSites {
            margin: 1.0,
            min_axes: 1,
            min_sites: 3,
        };
        let two = array![[9.5 * A, 0.0, 0.0], [0.0, 9.5 * A, 0.0], [0.0, 0.0, 0.0]];
        assert!(policy.is_valid(&two, A, 10.0));
        let three = array![[9.5 * A, 0.0, 0.0], [0.0, 9.5 * A, 0.0], [0.0, 0.0, -9.5 * A]];
        assert!(!policy.is_valid(&three, A, 10.0));
    }

    #[test]
    fn test_empty_is_valid() {
        let policy = BoundaryPolicy::Extent { margin: 1.0 };
        assert!(policy.is_valid(&Array2::zeros((0, 3)), A, 1.0));
    }
}
