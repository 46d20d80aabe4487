//! Error handling for LaserBox
//!
//! Errors raised while parsing lengths and unit labels.

use thiserror::Error;

/// Unit parsing and conversion errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// The unit label is not recognised
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    /// A numeric part of a length could not be parsed
    #[error("Invalid number '{input}': {reason}")]
    InvalidNumber {
        /// The offending text.
        input: String,
        /// Why parsing failed.
        reason: String,
    },

    /// A fraction had a zero denominator
    #[error("Division by zero in '{0}'")]
    DivisionByZero(String),

    /// A fraction was not of the form `a/b`
    #[error("Invalid fraction format: {0}")]
    InvalidFraction(String),
}

/// Result type for unit operations
pub type UnitResult<T> = std::result::Result<T, UnitError>;
