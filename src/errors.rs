/*!
 * Error types for the lingopress application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to a chat-completion provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Network-level failure before an HTTP status was obtained
    #[error("API request failed: {0}")]
    Transport(String),

    /// Non-2xx HTTP status from the provider
    #[error("API responded with error: {status} - {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Error message from the provider, or the raw body if none was present
        message: String,
    },

    /// Response JSON did not contain the expected completion field
    #[error("Unexpected API response format: {0}")]
    ResponseFormat(String),
}

/// Errors that can occur at the content storage boundary
#[derive(Error, Debug)]
pub enum StoreError {
    /// No content exists under the given identifier
    #[error("Content {0} not found")]
    NotFound(u64),

    /// Underlying file I/O failure
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted data could not be read or written as JSON
    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A field key that no field definition maps to
    #[error("Unknown field key: {0}")]
    UnknownField(String),

    /// A write payload that does not match the field's record shape
    #[error("Invalid payload for field '{field}': {reason}")]
    InvalidPayload {
        /// Public field name
        field: String,
        /// What was wrong with the payload
        reason: String,
    },
}

/// Errors that abort a translation run before any per-language work
#[derive(Error, Debug)]
pub enum TranslateError {
    /// API key missing from the configuration
    #[error("API key not configured")]
    MissingCredentials,

    /// Content missing, or still an unsaved draft
    #[error("Invalid source content or content not saved yet: {0}")]
    InvalidSource(u64),

    /// Error from the storage layer
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the content store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Error from translation orchestration
    #[error("Translation error: {0}")]
    Translation(#[from] TranslateError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
