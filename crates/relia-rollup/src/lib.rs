//! Relia Rollup
//!
//! Whole-system reliability rollup and the single-item calculation flow.
//!
//! # Overview
//!
//! - **Item pipeline**: stress ratios → derating → hazard rate model →
//!   dormancy → reliability metrics → cost metrics, each stage returning a
//!   new record so a failure leaves the stored item untouched
//! - **Tree aggregation**: children before parents, six running totals
//!   (active, dormant and software hazard rate, cost, part count, power)
//!   folded into every ancestor
//! - **Single-item requests**: fetch from a [`HardwareStore`], calculate,
//!   persist, and signal a [`CalculationObserver`]
//! - **Metrics**: per-run counters for parts, assemblies and failures
//!
//! # Aggregation rules
//!
//! | Node | Calculated from | Contributes upward |
//! |------|-----------------|--------------------|
//! | Part | its own inputs | its totals plus any children's |
//! | Assembly | its children's totals | its own (overwritten) totals |
//! | Failed node | stored values kept | its stored totals |
//! | Node without attributes | not calculated | its children's totals |
//!
//! Assemblies are overwritten on every run, so repeating a rollup without
//! changing any part gives identical results.
//!
//! # Usage
//!
//! ```
//! use relia_domain::{ComponentAttributes, HardwareTree, NodeId};
//! use relia_rollup::{RollupConfig, TreeAggregator};
//!
//! let mut tree = HardwareTree::new(NodeId::new(0));
//! tree.set_attributes(NodeId::new(0), ComponentAttributes::new_assembly(0, "Radar")).unwrap();
//! let mut resistor = ComponentAttributes::new_part(1, 3, 1);
//! resistor.hazard_rate_type_id = 2;
//! resistor.hazard_rate_specified = 0.0025;
//! tree.insert(NodeId::new(1), NodeId::new(0), Some(resistor)).unwrap();
//!
//! let mut aggregator = TreeAggregator::new(RollupConfig::rates_only());
//! let report = aggregator.calculate_all(&mut tree);
//! println!("{}", aggregator.metrics().summary());
//! assert_eq!(report.totals.total_part_count, 1);
//! ```
//!
//! # Configuration
//!
//! ```toml
//! derate = true
//!
//! [prediction]
//! hr_multiplier = 1000000.0
//! logistics_reference_hours = 1000000.0
//! ```
//!
//! [`HardwareStore`]: relia_domain::HardwareStore
//! [`CalculationObserver`]: relia_domain::CalculationObserver

#![warn(missing_docs)]

mod aggregator;
mod config;
mod error;
mod metrics;
mod pipeline;
mod service;
mod totals;

pub use aggregator::{RollupReport, TreeAggregator};
pub use config::RollupConfig;
pub use error::RollupError;
pub use metrics::RollupMetrics;
pub use pipeline::{calculate_assembly, calculate_item, calculate_part, ItemResult};
pub use service::{calculate_hardware, derate_hardware};
pub use totals::RollupTotals;
