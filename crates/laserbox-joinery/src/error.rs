//! Error types for the joinery crate.
//!
//! Parameter validation failures come from the dimension deriver; sink
//! failures come from whatever document receives the panels and are passed
//! through untouched.

use std::io;
use thiserror::Error;

/// Errors that can occur while generating a box.
#[derive(Error, Debug)]
pub enum JoineryError {
    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// The document sink refused a panel.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Errors related to box parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A value that must be strictly positive was zero or negative.
    #[error("'{name}' must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    /// The walls leave no room inside the box along one axis.
    #[error("Invalid dimensions: inside {axis} is {inside} after subtracting walls of {thickness}")]
    InvalidDimensions {
        axis: &'static str,
        inside: f64,
        thickness: f64,
    },
}

/// Errors raised by a document sink.
#[derive(Error, Debug)]
pub enum SinkError {
    /// The sink rejected the panel.
    #[error("Document rejected panel '{label}': {reason}")]
    Rejected { label: String, reason: String },

    /// I/O error while writing the document.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for joinery operations.
pub type JoineryResult<T> = Result<T, JoineryError>;
