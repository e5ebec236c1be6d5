//! Relia Domain Layer
//!
//! This crate contains the value types shared by every Relia crate: the
//! hardware hierarchy, the flat component attribute record that flows
//! through the prediction pipeline, allocation records, Physics of Failure
//! and hazard analysis records, and the collaborator traits used to reach
//! the (excluded) persistence layer.
//!
//! ## Key Concepts
//!
//! - **Hardware tree**: a single-parent, multi-child arena of nodes keyed by
//!   [`NodeId`]; the root represents the system
//! - **Component attributes**: one flat record per hardware item holding
//!   selectors, operating/rated stresses and computed outputs
//! - **Allocation record**: per-node parameters for goal apportionment
//! - **Calculation failure**: structured `(kind, node, metric, message)`
//!   result surfaced instead of panics
//!
//! ## Architecture
//!
//! - No logic that touches SQL, widgets or message buses
//! - Only `serde` as an external dependency, so records can be exchanged
//!   with whatever persists them
//! - Trait definitions for all external interactions live in [`traits`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod allocation;
pub mod attributes;
pub mod category;
pub mod environment;
pub mod failure;
pub mod hazard;
pub mod hierarchy;
pub mod pof;
pub mod traits;

// Re-exports for convenience
pub use allocation::{AllocationMethod, AllocationRecord, GoalMeasure};
pub use attributes::{ComponentAttributes, CostType, HazardRateType, PredictionMethod};
pub use category::Category;
pub use environment::{DormantEnvironment, Environment};
pub use failure::{CalculationFailure, FailureKind};
pub use hazard::{HazardAnalysis, HazardError, Probability, Severity};
pub use hierarchy::{HardwareNode, HardwareTree, NodeId, TreeError};
pub use pof::{Mechanism, OperatingLoad, OperatingStress, PhysicsOfFailure, PofError, TestMethod};
pub use traits::{CalculationObserver, HardwareStore, NullObserver};
