//! Shared fixtures for integration tests
//!
//! - `ScanningEngine`: fake query engine that extracts `@name` / `@@name`
//!   tokens and rejects any text containing `RETRN`
//! - `ArtifactTree`: temporary artifact root with helpers to add files

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use re_validate::engine::{EngineResult, Introspection, QueryEngine};
use regex::Regex;
use tempfile::TempDir;

/// Fake engine that needs no database.
#[derive(Default)]
pub struct ScanningEngine {
    pub submitted: RefCell<Vec<String>>,
}

impl ScanningEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QueryEngine for ScanningEngine {
    fn introspect(&self, query: &str) -> EngineResult<Introspection> {
        self.submitted.borrow_mut().push(query.to_string());

        if query.contains("RETRN") {
            return Ok(Introspection::Rejected {
                message: "syntax error, unexpected identifier near 'RETRN'".to_string(),
            });
        }

        Ok(Introspection::Parsed {
            bind_vars: scan_bind_vars(query),
        })
    }
}

/// Collects bind variable names the way the engine reports them:
/// `@key` as `key`, `@@coll` as `@coll`.
pub fn scan_bind_vars(query: &str) -> BTreeSet<String> {
    let pattern = Regex::new(r"@@?[A-Za-z0-9_]+").unwrap();
    pattern
        .find_iter(query)
        .map(|m| m.as_str()[1..].to_string())
        .collect()
}

/// Temporary artifact root.
pub struct ArtifactTree {
    dir: TempDir,
}

impl ArtifactTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, rel: &str, content: &str) -> &Self {
        let path = self.dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        self
    }

    pub fn vertex(&self, rel: &str, name: &str, required: &[&str]) -> &Self {
        self.write(rel, &collection_yaml(name, "vertex", false, required))
    }

    pub fn edge(&self, rel: &str, name: &str, required: &[&str]) -> &Self {
        self.write(rel, &collection_yaml(name, "edge", false, required))
    }

    pub fn view(&self, rel: &str, name: &str) -> &Self {
        self.write(
            rel,
            &format!(r#"{{"name": "{}", "type": "arangosearch", "links": {{}}}}"#, name),
        )
    }
}

pub fn collection_yaml(name: &str, kind: &str, delta: bool, required: &[&str]) -> String {
    let required: Vec<String> = required.iter().map(|r| format!("\"{}\"", r)).collect();
    format!(
        "name: {}\ntype: {}\ndelta: {}\nschema:\n  type: object\n  required: [{}]\n  properties:\n    name:\n      type: string\n",
        name,
        kind,
        delta,
        required.join(", ")
    )
}

pub fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}
