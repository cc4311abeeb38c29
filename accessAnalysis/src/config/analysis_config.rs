use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::config::constants::DEFAULT_STREAMING_THRESHOLD;
use crate::core::accessibility::NeighborPolicy;
use crate::core::distance::{DistanceFormula, DistanceUnit};
use crate::core::error::DistanceError;
use crate::data::address::{default_rules, SubstitutionRule};
use crate::utils::logging::{self, DataLoadType, OperationCategory};

#[derive(Debug)]
pub enum ConfigLoadError {
    IoError(std::io::Error),
    Json(serde_json::Error),
}

impl From<std::io::Error> for ConfigLoadError {
    fn from(err: std::io::Error) -> Self {
        ConfigLoadError::IoError(err)
    }
}

impl From<serde_json::Error> for ConfigLoadError {
    fn from(err: serde_json::Error) -> Self {
        ConfigLoadError::Json(err)
    }
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigLoadError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigLoadError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for ConfigLoadError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub formula: DistanceFormula,
    pub unit: DistanceUnit,
    pub radius_override: Option<f64>,  // Sphere radius in `unit`, replaces the earth radius
    pub neighbor_policy: NeighborPolicy,
    pub parallel: bool,
    pub streaming_threshold: usize,    // Point count above which the matrix is not materialized
    pub force_streaming: bool,
    pub address_rules: Vec<SubstitutionRule>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            formula: DistanceFormula::Haversine,
            unit: DistanceUnit::Miles,
            radius_override: None,
            neighbor_policy: NeighborPolicy::KeepCoincident,
            parallel: true,
            streaming_threshold: DEFAULT_STREAMING_THRESHOLD,
            force_streaming: false,
            address_rules: default_rules(),
        }
    }
}

impl AnalysisConfig {
    /// Reads a JSON config; missing fields take their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let _timing = logging::start_timing("load_config",
            OperationCategory::DataLoad { subcategory: DataLoadType::Config });

        let contents = fs::read_to_string(path)?;
        let config: AnalysisConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn radius(&self) -> Result<f64, DistanceError> {
        let radius = self.radius_override.unwrap_or_else(|| self.unit.earth_radius());
        crate::core::distance::validate_radius(radius)?;
        Ok(radius)
    }

    pub fn use_streaming(&self, points: usize) -> bool {
        self.force_streaming || points > self.streaming_threshold
    }
}
