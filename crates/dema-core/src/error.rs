//! Error types for streaming anomaly scoring
//!
//! Provides a unified error type for all dema-stream crates.

use thiserror::Error;

/// Core error type for stream construction and configuration
#[derive(Error, Debug)]
pub enum Error {
    /// A numeric parameter outside its required domain
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A required configuration key is absent
    #[error("Missing configuration key: {0}")]
    MissingConfigurationKey(String),

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration document
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a parameter that must be strictly positive
    pub fn not_positive(name: &str, value: impl std::fmt::Display) -> Self {
        Self::InvalidConfiguration(format!("{name} must be positive, got {value}"))
    }

    /// Create an error for a parameter outside a half-open or closed range
    pub fn out_of_range(name: &str, value: f64, range: &str) -> Self {
        Self::InvalidConfiguration(format!("{name} must be in {range}, got {value}"))
    }

    /// Create an error for NaN/Inf parameters
    pub fn non_finite(name: &str) -> Self {
        Self::InvalidConfiguration(format!("{name} must be finite"))
    }

    /// Whether this error came from the configuration layer rather than IO
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfiguration(_) | Self::MissingConfigurationKey(_)
        )
    }
}
