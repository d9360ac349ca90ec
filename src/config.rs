//! Configuration loading for DharaNav

use std::path::Path;

use serde::Deserialize;

use crate::error::{NavError, Result};

/// Navigation engine configuration
#[derive(Clone, Debug, Deserialize)]
pub struct NavConfig {
    /// Time budget for one hop in seconds (default: 3600).
    ///
    /// Each edge cost assumes the vehicle covers the hop distance in
    /// this many seconds; shorter timesteps demand higher ground speed
    /// and therefore more propulsion against the same current.
    #[serde(default = "default_timestep_secs")]
    pub timestep_secs: f64,

    /// Worker threads for graph rebuilds (default: 0 = auto).
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            timestep_secs: default_timestep_secs(),
            workers: default_workers(),
        }
    }
}

// Default value functions
fn default_timestep_secs() -> f64 {
    3600.0
}
fn default_workers() -> usize {
    0
}

impl NavConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NavError::Config(format!("Failed to read config file: {}", e)))?;
        let config: NavConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject non-finite or non-positive timesteps.
    pub fn validate(&self) -> Result<()> {
        if !self.timestep_secs.is_finite() || self.timestep_secs <= 0.0 {
            return Err(NavError::Config(format!(
                "timestep_secs must be positive and finite, got {}",
                self.timestep_secs
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NavConfig::default();
        assert_eq!(config.timestep_secs, 3600.0);
        assert_eq!(config.workers, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let config: NavConfig = toml::from_str(
            r#"
            timestep_secs = 900.0
            workers = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.timestep_secs, 900.0);
        assert_eq!(config.workers, 4);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: NavConfig = toml::from_str("timestep_secs = 600.0").unwrap();
        assert_eq!(config.timestep_secs, 600.0);
        assert_eq!(config.workers, 0);
    }

    #[test]
    fn test_bad_timestep_rejected() {
        for timestep in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = NavConfig {
                timestep_secs: timestep,
                workers: 0,
            };
            assert!(matches!(config.validate(), Err(NavError::Config(_))));
        }
    }
}
