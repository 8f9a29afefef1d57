//! Definition loader for reading artifact files from disk
//!
//! Layout under the artifact root:
//! - schemas/**/*.yaml
//! - stored_queries/**/*.yaml
//! - views/**/*.json
//!
//! Files are enumerated in lexicographic order so that error reports are
//! reproducible. A missing family directory holds zero definitions.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;
use walkdir::WalkDir;

use super::types::DefinitionKind;
use crate::validation::{ValidationError, ValidationResult};

/// A definition file parsed into a generic document, before any checks.
#[derive(Debug, Clone)]
pub struct RawDefinition {
    /// Kind of definition
    pub kind: DefinitionKind,
    /// Path relative to the artifact root (full path if outside it)
    pub path: String,
    /// File name without extension
    pub file_stem: String,
    /// Parsed document
    pub document: Value,
}

impl RawDefinition {
    /// Deserializes the document into a typed record.
    ///
    /// Only call after the meta-schema check has passed.
    pub fn parse<T: DeserializeOwned>(&self) -> ValidationResult<T> {
        serde_json::from_value(self.document.clone()).map_err(|e| {
            ValidationError::SchemaViolation {
                path: self.path.clone(),
                property: None,
                message: e.to_string(),
            }
        })
    }
}

/// Reads definition files from an artifact root.
pub struct DefinitionLoader {
    root: PathBuf,
}

impl DefinitionLoader {
    /// Creates a loader for the given artifact root.
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Returns the artifact root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the family directory for a kind.
    pub fn family_dir(&self, kind: DefinitionKind) -> PathBuf {
        self.root.join(kind.directory())
    }

    /// Lists every file of the given kind, recursively, in sorted path order.
    pub fn enumerate(&self, kind: DefinitionKind) -> ValidationResult<Vec<PathBuf>> {
        let dir = self.family_dir(kind);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(&dir).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|e| ValidationError::load(dir.display().to_string(), e))?;

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != kind.extension()) {
                continue;
            }

            paths.push(path.to_path_buf());
        }

        paths.sort();
        Ok(paths)
    }

    /// Loads a single definition file into a generic document.
    pub fn load(&self, kind: DefinitionKind, path: &Path) -> ValidationResult<RawDefinition> {
        let display = self.display_path(path);

        let content =
            fs::read_to_string(path).map_err(|e| ValidationError::load(display.as_str(), e))?;

        let document: Value = match kind.extension() {
            "json" => serde_json::from_str(&content)
                .map_err(|e| ValidationError::load(display.as_str(), format!("Invalid JSON: {}", e)))?,
            _ => serde_yaml::from_str(&content)
                .map_err(|e| ValidationError::load(display.as_str(), format!("Invalid YAML: {}", e)))?,
        };

        let file_stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(RawDefinition {
            kind,
            path: display,
            file_stem,
            document,
        })
    }

    /// Renders a path relative to the artifact root.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}
