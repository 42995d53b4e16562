use std::{fmt, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::solve::error::SolveError;

const DEFAULT_SOLVE_CONFIG_YAML: &str = include_str!("../../config/solve.default.yaml");

/// Convergence parameters shared by every solver entry point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveConfig {
    /// Discount factor in `[0, 1]`. `1.0` is undiscounted and only sound for
    /// models where every policy eventually reaches a terminal state.
    pub gamma: f64,
    /// Convergence threshold on the maximum per-state value change.
    pub theta: f64,
    /// Optional sweep cap for the fixed-point loops. `None` keeps the loops
    /// unbounded; non-terminating inputs then iterate forever.
    pub max_sweeps: Option<usize>,
}

impl Default for SolveConfig {
    fn default() -> Self {
        SolveConfig {
            gamma: 1.0,
            theta: 1e-10,
            max_sweeps: None,
        }
    }
}

impl SolveConfig {
    /// Parse a solve config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SolveConfigError> {
        let config: SolveConfig = serde_yaml::from_str(yaml).map_err(SolveConfigError::Yaml)?;
        config
            .validate()
            .map_err(|err| SolveConfigError::Invalid(err.to_string()))?;
        Ok(config)
    }

    /// Parse a solve config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, SolveConfigError> {
        let yaml = fs::read_to_string(path).map_err(SolveConfigError::Io)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_SOLVE_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, SolveConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    /// Check gamma and theta bounds.
    pub fn validate(&self) -> Result<(), SolveError> {
        if !self.gamma.is_finite() || !(0.0..=1.0).contains(&self.gamma) {
            return Err(SolveError::InvalidGamma { value: self.gamma });
        }
        if !self.theta.is_finite() || self.theta <= 0.0 {
            return Err(SolveError::InvalidTheta { value: self.theta });
        }
        Ok(())
    }

    /// Return whether `sweeps` has exhausted the configured cap.
    pub(crate) fn cap_reached(&self, sweeps: usize) -> bool {
        matches!(self.max_sweeps, Some(cap) if sweeps >= cap)
    }
}

/// Error type for loading and validating `SolveConfig`.
#[derive(Debug)]
pub enum SolveConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Invalid(String),
}

impl fmt::Display for SolveConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveConfigError::Io(err) => write!(f, "failed to read config file: {err}"),
            SolveConfigError::Yaml(err) => write!(f, "failed to parse config YAML: {err}"),
            SolveConfigError::Invalid(err) => write!(f, "invalid solve config: {err}"),
        }
    }
}

impl std::error::Error for SolveConfigError {}
