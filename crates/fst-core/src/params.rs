//! Tunable parameters for cutset separation.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, FstError};

/// Tolerance below which an LP weight counts as zero (and within which of one
/// it counts as one).
pub const FUZZ: f64 = 0.000001;

/// Component count above which exhaustive cut enumeration is skipped.
pub const DEFAULT_MAX_CUTSET_ENUMERATE_COMPS: usize = 11;

/// JSON or YAML configurable separation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeparationParams {
    /// Maximum number of connected components for which every bipartition is
    /// enumerated. Larger counts fall back to one cut per component.
    #[serde(default = "default_max_cutset_enumerate_comps")]
    pub max_cutset_enumerate_comps: usize,
    /// Numerical tolerance used for "weight present" and "flow below one" tests.
    #[serde(default = "default_fuzz")]
    pub fuzz: f64,
}

fn default_max_cutset_enumerate_comps() -> usize {
    DEFAULT_MAX_CUTSET_ENUMERATE_COMPS
}

fn default_fuzz() -> f64 {
    FUZZ
}

impl Default for SeparationParams {
    fn default() -> Self {
        Self {
            max_cutset_enumerate_comps: default_max_cutset_enumerate_comps(),
            fuzz: default_fuzz(),
        }
    }
}

impl SeparationParams {
    /// Sets the enumeration threshold.
    pub fn with_max_enumerate_comps(mut self, comps: usize) -> Self {
        self.max_cutset_enumerate_comps = comps;
        self
    }

    /// Parses parameters from JSON.
    pub fn from_json(json: &str) -> Result<Self, FstError> {
        let params: Self = serde_json::from_str(json)
            .map_err(|err| FstError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
        params.validate()?;
        Ok(params)
    }

    /// Parses parameters from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, FstError> {
        let params: Self = serde_yaml::from_str(yaml)
            .map_err(|err| FstError::Serde(ErrorInfo::new("deserialize-yaml", err.to_string())))?;
        params.validate()?;
        Ok(params)
    }

    /// Checks that the tolerance is usable.
    pub fn validate(&self) -> Result<(), FstError> {
        if !self.fuzz.is_finite() || self.fuzz <= 0.0 || self.fuzz >= 0.5 {
            return Err(FstError::Config(
                ErrorInfo::new("invalid-fuzz", "tolerance must lie in (0, 0.5)")
                    .with_context("fuzz", self.fuzz)
                    .with_hint("omit `fuzz` to use the default of 1e-6"),
            ));
        }
        Ok(())
    }
}
