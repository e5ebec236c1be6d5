//! Error types for prediction operations

use relia_domain::{CalculationFailure, FailureKind};
use thiserror::Error;

/// Errors that can occur while predicting a single item
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    /// Missing or out-of-range selector or input value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Division by zero, overflow, or a non-finite result
    #[error("Arithmetic error in {metric}: {detail}")]
    Arithmetic {
        /// Metric being computed
        metric: String,
        /// What went wrong
        detail: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PredictError {
    /// Shorthand for [`PredictError::InvalidInput`]
    pub fn invalid(message: impl Into<String>) -> Self {
        PredictError::InvalidInput(message.into())
    }

    /// Shorthand for [`PredictError::Arithmetic`]
    pub fn arithmetic(metric: impl Into<String>, detail: impl Into<String>) -> Self {
        PredictError::Arithmetic {
            metric: metric.into(),
            detail: detail.into(),
        }
    }

    /// Failure taxonomy entry for this error
    pub fn kind(&self) -> FailureKind {
        match self {
            PredictError::InvalidInput(_) | PredictError::Config(_) => FailureKind::InvalidInput,
            PredictError::Arithmetic { .. } => FailureKind::ArithmeticFailure,
        }
    }

    /// Tag the error with the node it came from
    ///
    /// `stage` names the metric when the error itself does not carry one.
    pub fn into_failure(self, hardware_id: u32, stage: &str) -> CalculationFailure {
        let kind = self.kind();
        let metric = match &self {
            PredictError::Arithmetic { metric, .. } => metric.clone(),
            _ => stage.to_string(),
        };
        CalculationFailure::new(kind, hardware_id, metric, self.to_string())
    }
}
