//! # Error Types
//!
//! Structured error types for quote_core. A calculation run degrades to a
//! lower-confidence estimate wherever it can, so very little can actually
//! fail: missing input data, invalid pricing parameters, and malformed
//! configuration files.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::errors::{QuoteError, QuoteResult};
//!
//! fn validate_labor_rate(rate: f64) -> QuoteResult<()> {
//!     if rate <= 0.0 {
//!         return Err(QuoteError::invalid_input(
//!             "labor_rate_eur_hr",
//!             rate.to_string(),
//!             "Labor rate must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for quote_core operations
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Structured error type for quote operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum QuoteError {
    /// Neither the geometry nor the document extractor produced usable data
    #[error("No usable input data provided: {reason}")]
    NoInputData { reason: String },

    /// An input value is invalid (out of range, wrong sign, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A pricing parameter file could not be read or parsed
    #[error("Configuration error in '{source_name}': {reason}")]
    Config { source_name: String, reason: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl QuoteError {
    /// Create a NoInputData error
    pub fn no_input_data(reason: impl Into<String>) -> Self {
        QuoteError::NoInputData {
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        QuoteError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a Config error
    pub fn config(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        QuoteError::Config {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            QuoteError::NoInputData { .. } => "NO_INPUT_DATA",
            QuoteError::InvalidInput { .. } => "INVALID_INPUT",
            QuoteError::Config { .. } => "CONFIG_ERROR",
            QuoteError::SerializationError { .. } => "SERIALIZATION_ERROR",
            QuoteError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(err: serde_json::Error) -> Self {
        QuoteError::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = QuoteError::invalid_input("labor_rate_eur_hr", "-5", "Labor rate must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: QuoteError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(QuoteError::no_input_data("empty").error_code(), "NO_INPUT_DATA");
        assert_eq!(QuoteError::config("params.toml", "bad").error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_from_serde_json() {
        let err: QuoteError = serde_json::from_str::<f64>("not json").unwrap_err().into();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
