//! Error types for the CLI application.

use relia_domain::{CalculationFailure, HazardError, TreeError};
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML writing error
    #[error("TOML writing error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    /// The system file describes an invalid tree
    #[error("Hierarchy error: {0}")]
    Tree(#[from] TreeError),

    /// Allocation failed; nothing was written
    #[error("Allocation error: {0}")]
    Allocation(#[from] relia_allocate::AllocationError),

    /// Single-item calculation failed
    #[error("Calculation error: {0}")]
    Rollup(#[from] relia_rollup::RollupError),

    /// Unknown hazard probability or severity
    #[error("Hazard analysis error: {0}")]
    Hazard(#[from] HazardError),

    /// A calculation failure surfaced directly
    #[error("Calculation error: {0}")]
    Calculation(CalculationFailure),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
