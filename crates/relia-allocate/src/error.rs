//! Allocation error types

use relia_domain::{FailureKind, NodeId, TreeError};
use thiserror::Error;

/// Errors that abort one allocation batch
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AllocationError {
    /// Missing method, goal or out-of-range input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Zero cumulative weight, zero rate, or a non-finite target
    #[error("Arithmetic error: {0}")]
    Arithmetic(String),

    /// A child has no attribute record to weight by
    #[error("Missing data: node {0} has no attributes")]
    MissingAttributes(NodeId),

    /// Parent or child is not in the tree
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),
}

impl AllocationError {
    /// Failure taxonomy entry for this error
    pub fn kind(&self) -> FailureKind {
        match self {
            AllocationError::InvalidInput(_) => FailureKind::InvalidInput,
            AllocationError::Arithmetic(_) => FailureKind::ArithmeticFailure,
            AllocationError::MissingAttributes(_) => FailureKind::MissingCollaboratorData,
            AllocationError::Tree(_) => FailureKind::TreeStructureViolation,
        }
    }
}
