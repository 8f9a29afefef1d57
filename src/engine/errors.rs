//! # Query Engine Errors

use thiserror::Error;

use crate::validation::ValidationError;

/// Result type for query engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Query engine transport errors.
///
/// A query the engine rejects is not an `EngineError`; it is reported as
/// `Introspection::Rejected`.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Undecodable response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Timed out after {waited_secs}s waiting for the query engine: {last_error}")]
    NotReady { waited_secs: u64, last_error: String },
}

impl From<EngineError> for ValidationError {
    fn from(e: EngineError) -> Self {
        ValidationError::EngineUnavailable(e.to_string())
    }
}
