//! Configuration for prediction runs
//!
//! The unit multiplier and the per-category derating limit table are owned
//! by the caller and passed in.

use serde::{Deserialize, Serialize};

/// Stress whose limit is being looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StressKind {
    /// Operating/rated current
    Current,
    /// Operating/rated power
    Power,
    /// Operating/rated voltage
    Voltage,
    /// Minimum margin between rated maximum and operating temperature (°C)
    TemperatureMargin,
    /// Maximum operating temperature (°C)
    MaxTemperature,
}

impl StressKind {
    fn offset(&self) -> usize {
        match self {
            StressKind::Current => 0,
            StressKind::Power => 2,
            StressKind::Voltage => 4,
            StressKind::TemperatureMargin => 6,
            StressKind::MaxTemperature => 8,
        }
    }
}

/// Derating limits for one component category
///
/// `limits` holds ten values in harsh/mild pairs: current, power, voltage,
/// temperature margin, maximum temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressLimits {
    /// Component category ID
    pub category_id: u8,
    /// Harsh/mild pairs
    pub limits: [f64; 10],
}

impl StressLimits {
    /// Limit for a stress in a harsh or mild environment
    pub fn threshold(&self, stress: StressKind, harsh: bool) -> f64 {
        let index = stress.offset() + if harsh { 0 } else { 1 };
        self.limits[index]
    }
}

fn limits(category_id: u8, limits: [f64; 10]) -> StressLimits {
    StressLimits { category_id, limits }
}

/// Configuration consumed by every prediction stage
///
/// # Examples
///
/// ```
/// use relia_predict::PredictionConfig;
///
/// let config = PredictionConfig::default();
/// assert_eq!(config.hr_multiplier, 1_000_000.0);
/// assert!(config.limits_for(7).is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    /// Hazard rate unit multiplier (failures per this many hours)
    /// Default: 1,000,000
    pub hr_multiplier: f64,

    /// Duration for logistics reliability (hours)
    /// Default: 1,000,000
    pub logistics_reference_hours: f64,

    /// Derating limits, one entry per category
    pub stress_limits: Vec<StressLimits>,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            hr_multiplier: 1_000_000.0,
            logistics_reference_hours: 1_000_000.0,
            stress_limits: vec![
                limits(1, [0.8, 0.9, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 125.0, 125.0]),
                limits(2, [1.0, 1.0, 0.7, 0.9, 1.0, 1.0, 0.0, 0.0, 125.0, 125.0]),
                limits(3, [1.0, 1.0, 0.5, 0.9, 1.0, 1.0, 0.0, 0.0, 125.0, 125.0]),
                limits(4, [1.0, 1.0, 1.0, 1.0, 0.6, 0.9, 10.0, 0.0, 125.0, 125.0]),
                limits(5, [0.6, 0.9, 1.0, 1.0, 0.5, 0.9, 15.0, 0.0, 125.0, 125.0]),
                limits(6, [0.75, 0.9, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 125.0, 125.0]),
                limits(7, [0.75, 0.9, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 125.0, 125.0]),
                limits(8, [0.7, 0.9, 1.0, 1.0, 0.7, 0.9, 25.0, 0.0, 125.0, 125.0]),
                limits(9, [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 125.0, 125.0]),
                limits(10, [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 125.0, 125.0]),
            ],
        }
    }
}

impl PredictionConfig {
    /// Same limits, hazard rates entered and reported in failures per hour
    pub fn per_hour() -> Self {
        Self {
            hr_multiplier: 1.0,
            ..Self::default()
        }
    }

    /// Derating limits for a category
    pub fn limits_for(&self, category_id: u8) -> Option<&StressLimits> {
        self.stress_limits
            .iter()
            .find(|entry| entry.category_id == category_id)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.hr_multiplier.is_finite() && self.hr_multiplier > 0.0) {
            return Err("hr_multiplier must be a positive number".to_string());
        }
        if !(self.logistics_reference_hours.is_finite() && self.logistics_reference_hours > 0.0) {
            return Err("logistics_reference_hours must be a positive number".to_string());
        }
        for (index, entry) in self.stress_limits.iter().enumerate() {
            if entry.limits.iter().any(|value| !value.is_finite()) {
                return Err(format!(
                    "stress limits for category {} contain a non-finite value",
                    entry.category_id
                ));
            }
            if self.stress_limits[..index]
                .iter()
                .any(|other| other.category_id == entry.category_id)
            {
                return Err(format!(
                    "stress limits for category {} are listed twice",
                    entry.category_id
                ));
            }
        }
        Ok(())
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
