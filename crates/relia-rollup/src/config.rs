//! Configuration for rollup runs

use relia_predict::PredictionConfig;
use serde::{Deserialize, Serialize};

/// Configuration for the tree aggregator
///
/// # Examples
///
/// ```
/// use relia_rollup::RollupConfig;
///
/// let config = RollupConfig::default();
/// assert!(config.derate);
///
/// // Skip the overstress analysis, rates in failures/hour
/// let config = RollupConfig::rates_only();
/// assert!(!config.derate);
/// assert_eq!(config.prediction.hr_multiplier, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollupConfig {
    /// Unit multiplier, logistics reference duration and derating limits
    #[serde(default)]
    pub prediction: PredictionConfig,

    /// Run the overstress analysis on every part
    /// Default: true
    #[serde(default = "default_derate")]
    pub derate: bool,
}

fn default_derate() -> bool {
    true
}

impl Default for RollupConfig {
    fn default() -> Self {
        Self {
            prediction: PredictionConfig::default(),
            derate: default_derate(),
        }
    }
}

impl RollupConfig {
    /// Hazard rates only: no derating, rates entered in failures/hour
    pub fn rates_only() -> Self {
        Self {
            prediction: PredictionConfig::per_hour(),
            derate: false,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.prediction.validate()
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RollupConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.prediction.hr_multiplier, 1_000_000.0);
    }

    #[test]
    fn test_toml_sections() {
        let toml_str = r#"
            derate = false

            [prediction]
            hr_multiplier = 1000.0
        "#;
        let config = RollupConfig::from_toml(toml_str).unwrap();
        assert!(!config.derate);
        assert_eq!(config.prediction.hr_multiplier, 1000.0);
        assert_eq!(config.prediction.stress_limits.len(), 10);
    }

    #[test]
    fn test_roundtrip() {
        let config = RollupConfig::rates_only();
        let parsed = RollupConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_invalid_prediction_config() {
        let mut config = RollupConfig::default();
        config.prediction.logistics_reference_hours = -1.0;
        assert!(config.validate().is_err());
    }
}
