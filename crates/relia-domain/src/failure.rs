//! Structured calculation failures
//!
//! Every failure surfaced to a caller carries its kind, the offending node
//! and the metric that failed, never a raw panic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Failure taxonomy shared by every calculation stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// Missing or out-of-range selector (category, subcategory, quality, environment)
    InvalidInput,
    /// Division by zero, overflow, or zero cumulative allocation weight
    ArithmeticFailure,
    /// The requested node has no attributes yet
    MissingCollaboratorData,
    /// Parent/child reference to a nonexistent node, or a cycle
    TreeStructureViolation,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::InvalidInput => "invalid input",
            FailureKind::ArithmeticFailure => "arithmetic failure",
            FailureKind::MissingCollaboratorData => "missing collaborator data",
            FailureKind::TreeStructureViolation => "tree structure violation",
        };
        write!(f, "{}", name)
    }
}

/// A failure tagged to the node and metric that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationFailure {
    /// Failure kind
    pub kind: FailureKind,
    /// Offending hardware item
    pub hardware_id: u32,
    /// Metric or stage that failed (`hazard_rate_active`, `current_ratio`, ...)
    pub metric: String,
    /// Human-readable detail
    pub message: String,
}

impl CalculationFailure {
    /// Create a new failure record
    pub fn new(
        kind: FailureKind,
        hardware_id: u32,
        metric: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            hardware_id,
            metric: metric.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for CalculationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hardware {} [{}]: {} ({})",
            self.hardware_id, self.metric, self.message, self.kind
        )
    }
}

impl std::error::Error for CalculationFailure {}
