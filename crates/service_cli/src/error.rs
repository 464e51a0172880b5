//! CLI error types.

use pricer_core::types::PricingError;
use pricer_models::models::CorrelationError;
use thiserror::Error;

/// Errors surfaced by `optval` commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse request: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid correlation matrix: {0}")]
    Correlation(#[from] CorrelationError),

    #[error("Pricing failed: {0}")]
    Pricing(#[from] PricingError),

    #[error("Self-check failed: expected {expected}, got {got}")]
    CheckFailed { expected: f64, got: f64 },
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
