//! Relia Predict
//!
//! Per-item reliability calculations for a single hardware item.
//!
//! The predictor provides:
//! - Stress ratios (operating over rated current, power and voltage)
//! - Derating (overstress) analysis against category limit tables
//! - MIL-HDBK-217F hazard rate models, parts count and part stress
//! - Dormant hazard rates
//! - Logistics and mission hazard rates, MTBF, reliability and variances
//! - Cost and part-count metrics
//!
//! Every stage takes a read-only record and returns an updated copy, so a
//! failed stage never leaves an item half-written.
//!
//! # Examples
//!
//! ```
//! use relia_domain::ComponentAttributes;
//! use relia_predict::{calculate_hazard_rate, calculate_reliability_metrics, PredictionConfig};
//!
//! let config = PredictionConfig::default();
//! let mut switch = ComponentAttributes::new_part(1, 7, 1);
//! switch.environment_active_id = 1;
//! switch.quality_id = 1;
//!
//! let switch = calculate_hazard_rate(&switch, &config).unwrap();
//! let switch = calculate_reliability_metrics(&switch, &config).unwrap();
//! assert!(switch.mtbf_mission > 0.0);
//! ```

#![warn(missing_docs)]

mod config;
mod derating;
mod dormancy;
mod error;
pub mod hazard_rate;
mod metrics;
mod stress;

pub use config::{PredictionConfig, StressKind, StressLimits};
pub use derating::{check_limits, check_overstress, derate, DeratingResult};
pub use dormancy::{dormancy_factor, dormant_hazard_rate};
pub use error::PredictError;
pub use hazard_rate::{calculate_hazard_rate, model_for, predict, supported_models, HazardRateModel, Prediction};
pub use metrics::{
    adjust_hazard_rate, calculate_cost_metrics, calculate_reliability_metrics,
    resolve_active_hazard_rate,
};
pub use stress::{calculate_stress_ratio, calculate_stress_ratios, has_stress_ratios, StressOutcome};
