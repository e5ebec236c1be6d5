//! Error types for rollup operations

use relia_domain::{CalculationFailure, FailureKind, NodeId};
use thiserror::Error;

/// Errors that can occur while calculating a single hardware item
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RollupError {
    /// Storage layer error
    #[error("Storage error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The node has no attribute record yet
    #[error("Missing data: node {0} has no attributes")]
    MissingAttributes(NodeId),

    /// A calculation stage failed; nothing was persisted
    #[error("Calculation error: {0}")]
    Calculation(CalculationFailure),
}

impl RollupError {
    /// Failure taxonomy entry for this error
    pub fn kind(&self) -> FailureKind {
        match self {
            RollupError::Store(_) => FailureKind::MissingCollaboratorData,
            RollupError::Config(_) => FailureKind::InvalidInput,
            RollupError::MissingAttributes(_) => FailureKind::MissingCollaboratorData,
            RollupError::Calculation(failure) => failure.kind,
        }
    }
}

impl From<CalculationFailure> for RollupError {
    fn from(failure: CalculationFailure) -> Self {
        RollupError::Calculation(failure)
    }
}
