//! Validation error taxonomy
//!
//! Error codes:
//! - RE_SCHEMA_VIOLATION
//! - RE_INVARIANT_VIOLATION
//! - RE_DUPLICATE_NAME
//! - RE_NAME_MISMATCH
//! - RE_INVALID_PARAM_SCHEMA
//! - RE_INVALID_BODY_SCHEMA
//! - RE_QUERY_SYNTAX_ERROR
//! - RE_BIND_VAR_MISMATCH
//! - RE_DEFINITION_LOAD
//! - RE_ENGINE_UNAVAILABLE
//! - RE_INTERNAL
//!
//! Every error is fatal for the run. Nothing is retried.

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use crate::definitions::DefinitionKind;

/// Stable codes for each validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorCode {
    /// Definition does not match its meta-schema
    SchemaViolation,
    /// Graph-domain required-field rule broken
    InvariantViolation,
    /// Name collision within a definition kind
    DuplicateName,
    /// Filename and `name` disagree
    NameMismatch,
    /// Parameter sub-schema is malformed or not an object schema
    InvalidParamSchema,
    /// Collection body sub-schema is malformed
    InvalidBodySchema,
    /// Query engine rejected the query text
    QuerySyntaxError,
    /// Declared parameters and used bind variables disagree
    BindVarMismatch,
    /// Definition file could not be read or parsed
    DefinitionLoad,
    /// Query engine could not be reached
    EngineUnavailable,
    /// Fixed meta-schemas failed to compile
    Internal,
}

impl ValidationErrorCode {
    /// Returns the string code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SchemaViolation => "RE_SCHEMA_VIOLATION",
            Self::InvariantViolation => "RE_INVARIANT_VIOLATION",
            Self::DuplicateName => "RE_DUPLICATE_NAME",
            Self::NameMismatch => "RE_NAME_MISMATCH",
            Self::InvalidParamSchema => "RE_INVALID_PARAM_SCHEMA",
            Self::InvalidBodySchema => "RE_INVALID_BODY_SCHEMA",
            Self::QuerySyntaxError => "RE_QUERY_SYNTAX_ERROR",
            Self::BindVarMismatch => "RE_BIND_VAR_MISMATCH",
            Self::DefinitionLoad => "RE_DEFINITION_LOAD",
            Self::EngineUnavailable => "RE_ENGINE_UNAVAILABLE",
            Self::Internal => "RE_INTERNAL",
        }
    }
}

impl fmt::Display for ValidationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Required-field rules for collection schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantRule {
    /// Body schema must have `type: object`
    ObjectType,
    /// Edge collections require `_from` and `_to`
    EdgeEndpoints,
    /// Time-travel edge collections require `from` and `to`
    DeltaEdgeEndpoints,
    /// Vertex collections require `_key`
    VertexKey,
    /// Time-travel vertex collections require `id`
    DeltaVertexId,
}

impl InvariantRule {
    /// Fields the rule demands in the body schema's `required` list.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            InvariantRule::ObjectType => &[],
            InvariantRule::EdgeEndpoints => &["_from", "_to"],
            InvariantRule::DeltaEdgeEndpoints => &["from", "to"],
            InvariantRule::VertexKey => &["_key"],
            InvariantRule::DeltaVertexId => &["id"],
        }
    }

    /// Human-readable statement of the rule
    pub fn describe(&self) -> &'static str {
        match self {
            InvariantRule::ObjectType => "Schemas must be an object",
            InvariantRule::EdgeEndpoints => {
                "Edge schemas must require \"_from\" and \"_to\" attributes"
            }
            InvariantRule::DeltaEdgeEndpoints => {
                "Time-travel edge schemas must require \"from\" and \"to\" attributes"
            }
            InvariantRule::VertexKey => "Vertex schemas must require the \"_key\" attribute",
            InvariantRule::DeltaVertexId => {
                "Time-travel vertex schemas must require the \"id\" attribute"
            }
        }
    }
}

impl fmt::Display for InvariantRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Fatal validation failure with full context.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Definition {path} does not match its meta-schema at '{}': {message}", .property.as_deref().unwrap_or("$root"))]
    SchemaViolation {
        path: String,
        property: Option<String>,
        message: String,
    },

    #[error("{rule} in {path}")]
    InvariantViolation { path: String, rule: InvariantRule },

    #[error("Duplicate {} named {name}", .kind.plural())]
    DuplicateName { kind: DefinitionKind, name: String },

    #[error("Name key should match filename: {name} vs {filename}")]
    NameMismatch { name: String, filename: String },

    #[error("Params schema in {path} is invalid: {reason}")]
    InvalidParamSchema { path: String, reason: String },

    #[error("Unable to load schema in {path}: {reason}")]
    InvalidBodySchema { path: String, reason: String },

    #[error("Query in {path} rejected by engine: {message}")]
    QuerySyntaxError { path: String, message: String },

    #[error(
        "Bind vars are invalid in {path}.\n  Extra vars in query: {}.\n  Extra params in schema: {}",
        format_names(.extra_in_query),
        format_names(.extra_in_schema)
    )]
    BindVarMismatch {
        path: String,
        extra_in_query: BTreeSet<String>,
        extra_in_schema: BTreeSet<String>,
    },

    #[error("Failed to load definition {path}: {reason}")]
    DefinitionLoad { path: String, reason: String },

    #[error("Query engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ValidationError {
    /// Returns the error code
    pub fn code(&self) -> ValidationErrorCode {
        match self {
            ValidationError::SchemaViolation { .. } => ValidationErrorCode::SchemaViolation,
            ValidationError::InvariantViolation { .. } => ValidationErrorCode::InvariantViolation,
            ValidationError::DuplicateName { .. } => ValidationErrorCode::DuplicateName,
            ValidationError::NameMismatch { .. } => ValidationErrorCode::NameMismatch,
            ValidationError::InvalidParamSchema { .. } => ValidationErrorCode::InvalidParamSchema,
            ValidationError::InvalidBodySchema { .. } => ValidationErrorCode::InvalidBodySchema,
            ValidationError::QuerySyntaxError { .. } => ValidationErrorCode::QuerySyntaxError,
            ValidationError::BindVarMismatch { .. } => ValidationErrorCode::BindVarMismatch,
            ValidationError::DefinitionLoad { .. } => ValidationErrorCode::DefinitionLoad,
            ValidationError::EngineUnavailable(_) => ValidationErrorCode::EngineUnavailable,
            ValidationError::Internal(_) => ValidationErrorCode::Internal,
        }
    }

    /// Create a definition load error
    pub fn load(path: impl Into<String>, reason: impl fmt::Display) -> Self {
        ValidationError::DefinitionLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Renders a name set as `{a, b}`; the empty set renders as `{}`.
fn format_names(names: &BTreeSet<String>) -> String {
    let joined: Vec<&str> = names.iter().map(String::as_str).collect();
    format!("{{{}}}", joined.join(", "))
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_codes_are_stable() {
        let err = ValidationError::NameMismatch {
            name: "a".into(),
            filename: "b".into(),
        };
        assert_eq!(err.code().as_str(), "RE_NAME_MISMATCH");
        assert_eq!(
            ValidationError::EngineUnavailable("down".into()).code(),
            ValidationErrorCode::EngineUnavailable
        );
    }

    #[test]
    fn test_bind_var_mismatch_reports_both_directions() {
        let err = ValidationError::BindVarMismatch {
            path: "stored_queries/q.yaml".into(),
            extra_in_query: names(&["c"]),
            extra_in_schema: names(&["b", "a"]),
        };
        let display = err.to_string();
        assert!(display.contains("Extra vars in query: {c}."));
        assert!(display.contains("Extra params in schema: {a, b}"));
    }

    #[test]
    fn test_empty_name_set_display() {
        assert_eq!(format_names(&BTreeSet::new()), "{}");
    }

    #[test]
    fn test_invariant_message_includes_path() {
        let err = ValidationError::InvariantViolation {
            path: "schemas/taxon.yaml".into(),
            rule: InvariantRule::VertexKey,
        };
        let display = err.to_string();
        assert!(display.contains("_key"));
        assert!(display.ends_with("schemas/taxon.yaml"));
    }

    #[test]
    fn test_duplicate_name_message() {
        let err = ValidationError::DuplicateName {
            kind: DefinitionKind::View,
            name: "taxon_search".into(),
        };
        assert_eq!(err.to_string(), "Duplicate views named taxon_search");
    }

    #[test]
    fn test_rule_required_fields() {
        assert_eq!(InvariantRule::EdgeEndpoints.required_fields(), &["_from", "_to"]);
        assert_eq!(InvariantRule::DeltaVertexId.required_fields(), &["id"]);
        assert!(InvariantRule::ObjectType.required_fields().is_empty());
    }
}
