/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Defect and cluster statistics of cascade simulations
//!
//! The pipeline runs from defect-site dumps of individual cascade trials,
//! through cluster-size frequency tables per PKA energy, to the cluster
//! production distribution over a whole PKA spectrum.

pub mod boundary;
pub mod dump;
pub mod errors;
pub mod frequency;
pub mod production;
pub mod scaling;
pub mod trial;

pub use boundary::BoundaryPolicy;
pub use dump::{
    parse_dump, parse_dump_with, read_dump, read_dump_with, ClusterColumns, DefectDump, DefectKind,
    DefectSite,
};
pub use errors::{DefectError, Result};
pub use frequency::{ClusterFrequencyAggregator, FrequencyEntry, FrequencyTable, VarianceMode};
pub use production::{
    point_defects_by_energy, production_distribution, EnergyResult, ProductionDistribution,
    ProductionEntry,
};
pub use scaling::{scale_production, ScaledProduction};
pub use trial::{cluster_sizes, KindOutcome, TrialAnalyzer, TrialOutcome};
