/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Configuration of the analyses
//!
//! The study's parameters changed between campaigns (boundary margins,
//! variance columns, trial counts). They are collected here as named
//! settings with the values of the latest campaign as defaults. A JSON file
//! named by the `IRRADIATION_CONFIG` environment variable overrides any
//! subset of them.

pub mod errors;

pub use errors::{ConfigError, Result};

use crate::defects::{BoundaryPolicy, ClusterColumns, DefectKind, TrialAnalyzer, VarianceMode};
use crate::sampling::{DEFAULT_SAMPLE_COUNT, DEFAULT_SEED};
use crate::utils::constants;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the path of a JSON configuration file
pub const CONFIG_ENV_VAR: &str = "IRRADIATION_CONFIG";

/// Settings of the initial-velocity generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub seed: u64,
    pub count: usize,
    pub output: PathBuf,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            count: DEFAULT_SAMPLE_COUNT,
            output: PathBuf::from("velocities.txt"),
        }
    }
}

/// Settings of the per-energy cluster analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Lattice parameter in Angstroms
    pub lattice_parameter: f64,
    /// Number of cascade trials per energy
    pub trials: usize,
    /// Trial dump file name; `{}` is replaced by the trial index
    pub trial_template: String,
    /// Dump column with the vacancy cluster IDs
    pub vacancy_cluster_column: String,
    /// Dump column with the interstitial cluster IDs
    pub interstitial_cluster_column: String,
    pub vacancy_policy: BoundaryPolicy,
    pub interstitial_policy: BoundaryPolicy,
    /// Write the variance column
    pub include_variance: bool,
    pub variance_mode: VarianceMode,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            lattice_parameter: constants::TUNGSTEN_LATTICE_PARAMETER,
            trials: 30,
            trial_template: "defects_{}.dump".to_string(),
            vacancy_cluster_column: "Cluster".to_string(),
            interstitial_cluster_column: "Cluster".to_string(),
            vacancy_policy: BoundaryPolicy::CornerSites {
                margin: 2.0,
                min_axes: 3,
                min_sites: 1,
            },
            interstitial_policy: BoundaryPolicy::CornerSites {
                margin: 1.0,
                min_axes: 3,
                min_sites: 1,
            },
            include_variance: true,
            variance_mode: VarianceMode::PerTrial,
        }
    }
}

impl ClusterConfig {
    /// File name of trial `index`
    pub fn trial_file(&self, index: usize) -> String {
        self.trial_template.replace("{}", &index.to_string())
    }

    /// Output file name for one defect kind, e.g. `vcluster_frequency.txt`
    pub fn frequency_file(&self, kind: DefectKind) -> String {
        format!("{}cluster_frequency.txt", kind.prefix())
    }

    pub fn cluster_columns(&self) -> ClusterColumns {
        ClusterColumns {
            vacancy: self.vacancy_cluster_column.clone(),
            interstitial: self.interstitial_cluster_column.clone(),
        }
    }

    pub fn analyzer(&self, box_half_length: f64) -> TrialAnalyzer {
        TrialAnalyzer {
            lattice_parameter: self.lattice_parameter,
            box_half_length,
            vacancy_policy: self.vacancy_policy,
            interstitial_policy: self.interstitial_policy,
        }
    }
}

/// Settings of the recoil spectrum binning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectrumConfig {
    /// Decimal exponent of the first bin centre (energies in eV)
    pub start_exponent: f64,
    /// Exclusive upper end of the bin-centre exponents
    pub end_exponent: f64,
    pub step: f64,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            start_exponent: 2.0,
            end_exponent: 6.0,
            step: 0.2,
        }
    }
}

/// Settings of the production distribution and its scaling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionConfig {
    /// Cut the distribution where value/std falls below this ratio
    pub trim_ratio: Option<f64>,
    /// Point defects per µm³·s used to turn the distribution into rates
    pub scaling_factor: f64,
}

impl Default for ProductionConfig {
    fn default() -> Self {
        Self {
            trim_ratio: None,
            scaling_factor: 7.9e8,
        }
    }
}

/// All analysis settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub sampling: SamplingConfig,
    pub clusters: ClusterConfig,
    pub spectrum: SpectrumConfig,
    pub production: ProductionConfig,
}

impl AnalysisConfig {
    /// Parse a JSON configuration; missing fields take default values
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load from `IRRADIATION_CONFIG` if set, otherwise use defaults
    pub fn load() -> Result<Self> {
        match env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_file(PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.clusters.lattice_parameter > 0.0) {
            return Err(ConfigError::InvalidParameter(format!(
                "lattice_parameter must be positive, got {}",
                self.clusters.lattice_parameter
            )));
        }
        if !self.clusters.trial_template.contains("{}") {
            return Err(ConfigError::InvalidParameter(format!(
                "trial_template '{}' has no {{}} placeholder",
                self.clusters.trial_template
            )));
        }
        if self.clusters.vacancy_cluster_column.trim().is_empty()
            || self.clusters.interstitial_cluster_column.trim().is_empty()
        {
            return Err(ConfigError::InvalidParameter(
                "cluster column names must not be empty".to_string(),
            ));
        }
        if self.sampling.count == 0 {
            return Err(ConfigError::InvalidParameter(
                "sampling count must be positive".to_string(),
            ));
        }
        if !(self.spectrum.step > 0.0) || self.spectrum.end_exponent <= self.spectrum.start_exponent
        {
            return Err(ConfigError::InvalidParameter(
                "spectrum exponents must increase with a positive step".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_override() {
        let json = r#"{
            "clusters": {
                "trials": 20,
                "include_variance": false,
                "vacancy_policy": { "type": "extent", "margin": 1.0 }
            }
        }"#;
        let config = AnalysisConfig::from_json(json).unwrap();
        assert_eq!(config.clusters.trials, 20);
        assert!(!config.clusters.include_variance);
        assert_eq!(
            config.clusters.vacancy_policy,
            BoundaryPolicy::Extent { margin: 1.0 }
        );
        assert_eq!(config.clusters.lattice_parameter, 3.1658);
        assert_eq!(config.sampling.seed, DEFAULT_SEED);
    }

    #[test]
    fn test_json_round_trip() {
        let config = AnalysisConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed = AnalysisConfig::from_json(&json).unwrap();
        assert_eq!(parsed.clusters.vacancy_policy, config.clusters.vacancy_policy);
        assert_eq!(parsed.clusters.variance_mode, VarianceMode::PerTrial);
        assert_eq!(parsed.production.trim_ratio, None);
        assert_relative_eq!(parsed.clusters.lattice_parameter, 3.1658, epsilon = 1e-12);
        assert_relative_eq!(parsed.production.scaling_factor, 7.9e8, max_relative = 1e-12);
    }

    #[test]
    fn test_invalid_values() {
        let json = r#"{ "clusters": { "trial_template": "dump.data" } }"#;
        assert!(matches!(
            AnalysisConfig::from_json(json),
            Err(ConfigError::InvalidParameter(_))
        ));
        assert!(matches!(
            AnalysisConfig::from_json("{ not json"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_trial_file_name() {
        let config = ClusterConfig::default();
        assert_eq!(config.trial_file(7), "defects_7.dump");
        assert_eq!(
            config.frequency_file(DefectKind::Interstitial),
            "icluster_frequency.txt"
        );
    }

    #[test]
    fn test_cluster_columns() {
        let columns = ClusterConfig::default().cluster_columns();
        assert!(columns.is_shared());
        assert_eq!(columns.vacancy, "Cluster");

        let json = r#"{
            "clusters": {
                "vacancy_cluster_column": "VCluster",
                "interstitial_cluster_column": "ICluster"
            }
        }"#;
        let columns = AnalysisConfig::from_json(json).unwrap().clusters.cluster_columns();
        assert!(!columns.is_shared());
        assert_eq!(columns.vacancy, "VCluster");
        assert_eq!(columns.interstitial, "ICluster");

        let json = r#"{ "clusters": { "vacancy_cluster_column": " " } }"#;
        assert!(matches!(
            AnalysisConfig::from_json(json),
            Err(ConfigError::InvalidParameter(_))
        ));
    }
}
