//! Error types for the contact application.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::ValidationError;
use crate::models::FieldError;
use thiserror::Error;

/// Errors raised by the contact store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A unique index rejected the write
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// Any other failure of the storage backend
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Errors surfaced by the contact service.
#[derive(Error, Debug)]
pub enum ContactError {
    /// One or more input fields failed validation
    #[error("Validation failed")]
    Validation(Vec<ValidationError>),

    /// A uniqueness invariant would be violated
    #[error("{0}")]
    Conflict(String),

    /// No contact exists with the requested ID
    #[error("{0}")]
    NotFound(String),

    /// Unrecognised storage failure, passed through unchanged
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ContactError {
    /// Build the standard not-found error for an ID.
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        ContactError::NotFound(format!("Contact with ID {} not found", id))
    }
}

/// Errors that can occur when talking to the contact API over HTTP.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The API rejected the write as a duplicate
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The API rejected the request body
    #[error("Invalid request: {message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ContactError
pub type ContactResult<T> = Result<T, ContactError>;

/// Convenience type alias for Results with ClientError
pub type ClientResult<T> = Result<T, ClientError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
