//! Usability probe for user-authored sub-schemas
//!
//! A sub-schema is usable when it compiles and validating `{}` against it
//! either succeeds or fails with an ordinary validation error.
//!
//! Known limitation: the probe only exercises the empty object. A schema
//! that accepts `{}` but is broken for other inputs passes the probe.

use serde_json::{Map, Value};
use thiserror::Error;

/// Outcome of probing a sub-schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The sub-schema itself is malformed (fatal)
    #[error("schema failed to compile: {0}")]
    SchemaCompileError(String),

    /// The sub-schema compiled but rejected the empty object (expected, discarded)
    #[error("empty object rejected: {0}")]
    SchemaValidationError(String),
}

impl ProbeError {
    /// Returns whether the probe found a malformed schema
    pub fn is_fatal(&self) -> bool {
        matches!(self, ProbeError::SchemaCompileError(_))
    }
}

/// Compiles `schema` and validates the empty object against it.
pub fn probe(schema: &Value) -> Result<(), ProbeError> {
    let validator = jsonschema::validator_for(schema)
        .map_err(|e| ProbeError::SchemaCompileError(e.to_string()))?;

    let empty = Value::Object(Map::new());
    let first_error = validator.iter_errors(&empty).next().map(|e| e.to_string());

    match first_error {
        Some(message) => Err(ProbeError::SchemaValidationError(message)),
        None => Ok(()),
    }
}

/// Runs the probe, discarding ordinary validation failures.
///
/// Returns the compile error message when the schema is malformed.
pub fn ensure_usable(schema: &Value) -> Result<(), String> {
    match probe(schema) {
        Ok(()) | Err(ProbeError::SchemaValidationError(_)) => Ok(()),
        Err(ProbeError::SchemaCompileError(message)) => Err(message),
    }
}
