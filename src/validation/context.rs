//! Per-run validation context
//!
//! Holds the duplicate-name accumulators, one set per definition kind.
//! A context lives for exactly one run and is never persisted.

use std::collections::HashSet;

use uuid::Uuid;

use super::errors::{ValidationError, ValidationResult};
use crate::definitions::DefinitionKind;

/// State shared by the checkers for the duration of one run.
#[derive(Debug)]
pub struct ValidationContext {
    run_id: Uuid,
    schema_names: HashSet<String>,
    query_names: HashSet<String>,
    view_names: HashSet<String>,
}

impl ValidationContext {
    /// Creates a fresh context with a new run ID.
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            schema_names: HashSet::new(),
            query_names: HashSet::new(),
            view_names: HashSet::new(),
        }
    }

    /// Returns the run ID attached to log records.
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    fn names(&self, kind: DefinitionKind) -> &HashSet<String> {
        match kind {
            DefinitionKind::CollectionSchema => &self.schema_names,
            DefinitionKind::StoredQuery => &self.query_names,
            DefinitionKind::View => &self.view_names,
        }
    }

    fn names_mut(&mut self, kind: DefinitionKind) -> &mut HashSet<String> {
        match kind {
            DefinitionKind::CollectionSchema => &mut self.schema_names,
            DefinitionKind::StoredQuery => &mut self.query_names,
            DefinitionKind::View => &mut self.view_names,
        }
    }

    /// Records `name` for `kind`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if the name was already claimed for this kind
    /// in this run. Matching is exact and case-sensitive.
    pub fn claim_name(&mut self, kind: DefinitionKind, name: &str) -> ValidationResult<()> {
        if !self.names_mut(kind).insert(name.to_string()) {
            return Err(ValidationError::DuplicateName {
                kind,
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Number of names claimed for `kind`.
    pub fn claimed_count(&self, kind: DefinitionKind) -> usize {
        self.names(kind).len()
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new()
    }
}
