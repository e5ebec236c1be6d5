//! Relia Allocate
//!
//! Apportions a parent's reliability or hazard rate goal over its immediate
//! children.
//!
//! The allocator provides:
//! - Goal derivation from whichever of reliability, hazard rate or MTBF was
//!   entered
//! - Equal apportionment, AGREE, ARINC and Feasibility-Of-Objectives
//! - All-or-nothing write-back of a batch of child records
//!
//! # Examples
//!
//! ```
//! use relia_allocate::{allocate, AllocationChild, AllocationContext, ArincReference};
//! use relia_domain::{AllocationMethod, AllocationRecord, NodeId};
//!
//! let context = AllocationContext {
//!     method: AllocationMethod::Arinc,
//!     mission_time: 100.0,
//!     reliability_goal: 1.0,
//!     hazard_rate_goal: 0.001,
//!     arinc_reference: ArincReference::SiblingTotal,
//! };
//! let children = [
//!     AllocationChild { id: NodeId::new(2), record: AllocationRecord::new(2), hazard_rate_active: 1e-5 },
//!     AllocationChild { id: NodeId::new(3), record: AllocationRecord::new(3), hazard_rate_active: 3e-5 },
//! ];
//! let records = allocate(&context, &children).unwrap();
//! assert!((records[1].hazard_rate_alloc - 0.00075).abs() < 1e-12);
//! ```

#![warn(missing_docs)]

mod engine;
mod error;
mod goals;

pub use engine::{allocate, AllocationChild, AllocationContext, Allocator, ArincReference, FOO_MAX_RATING};
pub use error::AllocationError;
pub use goals::{allocation_goal, calculate_goals};
