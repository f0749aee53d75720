//! Core error types for the BudgetPal application.
//!
//! This module defines storage-agnostic error types. Errors raised by the
//! hosted backend (HTTP status codes, transport failures) are converted to
//! these types by the adapter crate.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Backend credentials are missing or still set to placeholder values.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{0}")]
    Remote(#[from] RemoteError),

    #[error("Not authenticated: {0}")]
    Unauthorized(String),

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    /// A conditional update lost the race against another writer.
    #[error("Concurrent modification: {0}")]
    ConcurrentModification(String),

    #[error("{0}")]
    NotImplemented(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Failure of a call to the hosted backend.
///
/// `operation` is a short user-facing label such as `"add expense"`; the
/// rendered message reads "failed to add expense: ...".
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("failed to {operation}: request failed: {message}")]
    RequestFailed { operation: String, message: String },

    #[error("failed to {operation}: backend rejected the request ({status}): {message}")]
    Rejected {
        operation: String,
        status: u16,
        message: String,
    },

    #[error("failed to {operation}: invalid response: {message}")]
    InvalidResponse { operation: String, message: String },
}

impl RemoteError {
    pub fn operation(&self) -> &str {
        match self {
            RemoteError::RequestFailed { operation, .. }
            | RemoteError::Rejected { operation, .. }
            | RemoteError::InvalidResponse { operation, .. } => operation,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("'{field}' must be greater than zero")]
    NonPositiveAmount { field: String },

    #[error("Unsupported income frequency '{0}'")]
    UnsupportedFrequency(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

impl ValidationError {
    pub fn non_positive(field: &str) -> Self {
        ValidationError::NonPositiveAmount {
            field: field.to_string(),
        }
    }
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Unexpected(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
