/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Per-trial cluster analysis of one cascade run

use super::boundary::BoundaryPolicy;
use super::dump::{DefectDump, DefectKind};
use log::debug;

/// Cluster sizes from per-site cluster IDs
///
/// Equivalent to a bincount of the IDs with the "no cluster" bin (ID 0)
/// removed. IDs that never occur produce no entry.
pub fn cluster_sizes(cluster_ids: &[usize]) -> Vec<usize> {
    let max_id = match cluster_ids.iter().max() {
        Some(&m) => m,
        None => return Vec::new(),
    };
    let mut counts = vec![0usize; max_id + 1];
    for &id in cluster_ids {
        counts[id] += 1;
    }
    counts.into_iter().skip(1).filter(|&c| c > 0).collect()
}

/// Result of analysing one defect kind in one trial
#[derive(Debug, Clone, PartialEq)]
pub struct KindOutcome {
    pub kind: DefectKind,
    pub site_count: usize,
    pub cluster_sizes: Vec<usize>,
    /// Whether the defects stay clear of the box boundary
    pub valid: bool,
}

/// Result of analysing one trial for both defect kinds
#[derive(Debug, Clone, PartialEq)]
pub struct TrialOutcome {
    pub vacancies: KindOutcome,
    pub interstitials: KindOutcome,
}

impl TrialOutcome {
    /// A trial counts only if both defect kinds are valid
    pub fn is_effective(&self) -> bool {
        self.vacancies.valid && self.interstitials.valid
    }
}

/// Analyses defect dumps of cascade trials
#[derive(Debug, Clone)]
pub struct TrialAnalyzer {
    pub lattice_parameter: f64,
    /// Box half-length in lattice units
    pub box_half_length: f64,
    pub vacancy_policy: BoundaryPolicy,
    pub interstitial_policy: BoundaryPolicy,
}

impl TrialAnalyzer {
    pub fn policy(&self, kind: DefectKind) -> &BoundaryPolicy {
        match kind {
            DefectKind::Vacancy => &self.vacancy_policy,
            DefectKind::Interstitial => &self.interstitial_policy,
        }
    }

    pub fn analyze_kind(&self, dump: &DefectDump, kind: DefectKind) -> KindOutcome {
        let positions = dump.positions(kind);
        let valid =
            self.policy(kind)
                .is_valid(&positions, self.lattice_parameter, self.box_half_length);
        let sizes = cluster_sizes(&dump.cluster_ids(kind));
        debug!(
            "{:?}: {} sites in {} clusters",
            kind,
            positions.nrows(),
            sizes.len()
        );
        KindOutcome {
            kind,
            site_count: positions.nrows(),
            cluster_sizes: sizes,
            valid,
        }
    }

    pub fn analyze(&self, dump: &DefectDump) -> TrialOutcome {
        TrialOutcome {
            vacancies: self.analyze_kind(dump, DefectKind::Vacancy),
            interstitials: self.analyze_kind(dump, DefectKind::Interstitial),
        }
    }
}
