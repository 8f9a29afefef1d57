//! Stored query checker
//!
//! Cross-validates two independently authored artifacts: the parameter
//! schema (a JSON schema whose top-level properties are the declared bind
//! variables) and the query text (whose bind variables only the query engine
//! can extract).
//!
//! The declared set must equal the used set exactly. Both directions of a
//! mismatch are reported together.

use std::collections::BTreeSet;

use super::context::ValidationContext;
use super::errors::{ValidationError, ValidationResult};
use crate::definitions::{DefinitionKind, RawDefinition, StoredQueryDef};
use crate::engine::{Introspection, QueryEngine};
use crate::meta_schema::{ensure_usable, MetaSchemaValidator};
use crate::observability::Event;

/// Symmetric difference between declared parameters and used bind variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindVarDiff {
    /// Used by the query but not declared in the schema
    pub extra_in_query: BTreeSet<String>,
    /// Declared in the schema but not used by the query
    pub extra_in_schema: BTreeSet<String>,
}

impl BindVarDiff {
    /// Computes the difference between `declared` and `used`.
    pub fn compute(declared: &BTreeSet<String>, used: &BTreeSet<String>) -> Self {
        Self {
            extra_in_query: used.difference(declared).cloned().collect(),
            extra_in_schema: declared.difference(used).cloned().collect(),
        }
    }

    /// Returns whether the two sets agree.
    pub fn is_empty(&self) -> bool {
        self.extra_in_query.is_empty() && self.extra_in_schema.is_empty()
    }
}

/// Checks stored query definitions against their parameter contracts.
pub struct StoredQueryChecker<'a, E: QueryEngine + ?Sized> {
    meta: &'a MetaSchemaValidator,
    engine: &'a E,
}

impl<'a, E: QueryEngine + ?Sized> StoredQueryChecker<'a, E> {
    /// Creates a checker using `engine` for bind-variable extraction.
    pub fn new(meta: &'a MetaSchemaValidator, engine: &'a E) -> Self {
        Self { meta, engine }
    }

    /// Checks one stored query definition.
    ///
    /// # Errors
    ///
    /// - `SchemaViolation` if the definition shape is wrong
    /// - `NameMismatch` if `name` differs from the file stem
    /// - `DuplicateName` if another query in this run has the same name
    /// - `InvalidParamSchema` if `params` does not compile or is not an object schema
    /// - `QuerySyntaxError` if the engine rejects the query text
    /// - `BindVarMismatch` if declared and used bind variables differ
    /// - `EngineUnavailable` if the engine cannot be reached
    pub fn check(
        &self,
        raw: &RawDefinition,
        ctx: &mut ValidationContext,
    ) -> ValidationResult<StoredQueryDef> {
        debug_assert_eq!(raw.kind, DefinitionKind::StoredQuery);

        self.meta.validate(raw)?;
        let def: StoredQueryDef = raw.parse()?;

        if def.name != raw.file_stem {
            return Err(ValidationError::NameMismatch {
                name: def.name.clone(),
                filename: raw.file_stem.clone(),
            });
        }

        ctx.claim_name(DefinitionKind::StoredQuery, &def.name)?;

        if let Some(params) = def.param_schema() {
            ensure_usable(params).map_err(|reason| ValidationError::InvalidParamSchema {
                path: raw.path.clone(),
                reason,
            })?;

            if params.get("type").and_then(|t| t.as_str()) != Some("object") {
                return Err(ValidationError::InvalidParamSchema {
                    path: raw.path.clone(),
                    reason: "Params schema must have type 'object'".into(),
                });
            }
        }

        let used = match self.engine.introspect(&def.submission_text())? {
            Introspection::Parsed { bind_vars } => bind_vars,
            Introspection::Rejected { message } => {
                return Err(ValidationError::QuerySyntaxError {
                    path: raw.path.clone(),
                    message,
                });
            }
        };

        tracing::debug!(
            event = %Event::QueryIntrospected,
            run_id = %ctx.run_id(),
            query = %def.name,
            bind_vars = used.len()
        );

        let diff = BindVarDiff::compute(&def.declared_params(), &used);
        if !diff.is_empty() {
            return Err(ValidationError::BindVarMismatch {
                path: raw.path.clone(),
                extra_in_query: diff.extra_in_query,
                extra_in_schema: diff.extra_in_schema,
            });
        }

        Ok(def)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineResult;
    use serde_json::{json, Value};
    use std::cell::RefCell;

    /// Engine that reports a fixed reply and records submitted text.
    struct FixedEngine {
        reply: Introspection,
        submitted: RefCell<Vec<String>>,
    }

    impl FixedEngine {
        fn parsed(vars: &[&str]) -> Self {
            Self {
                reply: Introspection::Parsed {
                    bind_vars: set(vars),
                },
                submitted: RefCell::new(Vec::new()),
            }
        }

        fn rejected(message: &str) -> Self {
            Self {
                reply: Introspection::Rejected {
                    message: message.into(),
                },
                submitted: RefCell::new(Vec::new()),
            }
        }
    }

    impl QueryEngine for FixedEngine {
        fn introspect(&self, query: &str) -> EngineResult<Introspection> {
            self.submitted.borrow_mut().push(query.to_string());
            Ok(self.reply.clone())
        }
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn raw(stem: &str, document: Value) -> RawDefinition {
        RawDefinition {
            kind: DefinitionKind::StoredQuery,
            path: format!("stored_queries/{}.yaml", stem),
            file_stem: stem.into(),
            document,
        }
    }

    fn check(engine: &FixedEngine, raw_def: &RawDefinition) -> ValidationResult<StoredQueryDef> {
        let meta = MetaSchemaValidator::new().unwrap();
        let mut ctx = ValidationContext::new();
        StoredQueryChecker::new(&meta, engine).check(raw_def, &mut ctx)
    }

    #[test]
    fn test_diff_is_symmetric() {
        let diff = BindVarDiff::compute(&set(&["a", "b"]), &set(&["a", "c"]));
        assert_eq!(diff.extra_in_query, set(&["c"]));
        assert_eq!(diff.extra_in_schema, set(&["b"]));
        assert!(BindVarDiff::compute(&set(&["a"]), &set(&["a"])).is_empty());
    }

    #[test]
    fn test_matching_params_pass() {
        let engine = FixedEngine::parsed(&["key"]);
        let def = raw(
            "fetch_taxon",
            json!({
                "name": "fetch_taxon",
                "query_prefix": "WITH ncbi_taxon",
                "query": "RETURN DOCUMENT(ncbi_taxon, @key)",
                "params": {"type": "object", "properties": {"key": {"type": "string"}}}
            }),
        );

        assert!(check(&engine, &def).is_ok());
        assert_eq!(
            engine.submitted.borrow()[0],
            "WITH ncbi_taxon RETURN DOCUMENT(ncbi_taxon, @key)"
        );
    }

    #[test]
    fn test_name_mismatch() {
        let engine = FixedEngine::parsed(&[]);
        let def = raw("list_all", json!({"name": "list", "query": "RETURN 1"}));

        let err = check(&engine, &def).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NameMismatch {
                name: "list".into(),
                filename: "list_all".into()
            }
        );
        assert!(engine.submitted.borrow().is_empty());
    }

    #[test]
    fn test_params_must_be_object_type() {
        let engine = FixedEngine::parsed(&[]);
        let def = raw(
            "q",
            json!({"name": "q", "query": "RETURN 1", "params": {"type": "array"}}),
        );

        let err = check(&engine, &def).unwrap_err();
        assert_eq!(err.code().as_str(), "RE_INVALID_PARAM_SCHEMA");
    }

    #[test]
    fn test_malformed_params_schema() {
        let engine = FixedEngine::parsed(&[]);
        let def = raw(
            "q",
            json!({"name": "q", "query": "RETURN 1", "params": {"type": "object", "properties": 3}}),
        );

        let err = check(&engine, &def).unwrap_err();
        assert_eq!(err.code().as_str(), "RE_INVALID_PARAM_SCHEMA");
    }

    #[test]
    fn test_engine_rejection_is_verbatim() {
        let engine = FixedEngine::rejected("syntax error, unexpected end of query string");
        let def = raw("q", json!({"name": "q", "query": "FOR x IN"}));

        match check(&engine, &def).unwrap_err() {
            ValidationError::QuerySyntaxError { message, .. } => {
                assert_eq!(message, "syntax error, unexpected end of query string")
            }
            other => panic!("expected QuerySyntaxError, got {:?}", other),
        }
    }

    #[test]
    fn test_mismatch_reports_both_sides() {
        let engine = FixedEngine::parsed(&["a", "c"]);
        let def = raw(
            "q",
            json!({
                "name": "q",
                "query": "RETURN [@a, @c]",
                "params": {"type": "object", "properties": {"a": {}, "b": {}}}
            }),
        );

        match check(&engine, &def).unwrap_err() {
            ValidationError::BindVarMismatch {
                extra_in_query,
                extra_in_schema,
                ..
            } => {
                assert_eq!(extra_in_query, set(&["c"]));
                assert_eq!(extra_in_schema, set(&["b"]));
            }
            other => panic!("expected BindVarMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_no_params_but_query_uses_var() {
        let engine = FixedEngine::parsed(&["limit"]);
        let def = raw("q", json!({"name": "q", "query": "FOR x IN c LIMIT @limit RETURN x"}));

        match check(&engine, &def).unwrap_err() {
            ValidationError::BindVarMismatch {
                extra_in_query,
                extra_in_schema,
                ..
            } => {
                assert_eq!(extra_in_query, set(&["limit"]));
                assert!(extra_in_schema.is_empty());
            }
            other => panic!("expected BindVarMismatch, got {:?}", other),
        }
    }
}
