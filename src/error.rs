//! Error types for the quote costing engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while costing shifts and quotes.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the quote costing engine.
///
/// All fallible operations in the engine return this error type. Costing
/// functions only ever fail with [`EngineError::Validation`]; the other
/// variants come from loading or resolving rate configuration.
///
/// # Example
///
/// ```
/// use quote_engine::error::EngineError;
///
/// let error = EngineError::validation("level", "must be between 1 and 5, got 7");
/// assert_eq!(
///     error.to_string(),
///     "Validation error on 'level': must be between 1 and 5, got 7"
/// );
/// assert!(error.is_validation());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No rate configuration is effective on the requested date.
    #[error("No rate configuration effective on {date}")]
    RateNotFound {
        /// The date for which rates were requested.
        date: NaiveDate,
    },

    /// Input was malformed or out of range.
    #[error("Validation error on '{field}': {message}")]
    Validation {
        /// The input field that failed validation.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

impl EngineError {
    /// Creates a [`EngineError::Validation`] for the given field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true if this error was caused by invalid caller input.
    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Validation { .. })
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
