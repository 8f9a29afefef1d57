//! Definition record types
//!
//! Three kinds of definitions live in the artifact store:
//! - collection schemas: vertex or edge document contracts
//! - stored queries: named, parameterized query templates
//! - views: search-index view definitions
//!
//! Records are read-only snapshots of one file for the duration of a run.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;

/// Kind of definition, which also fixes its family directory and file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    /// Vertex or edge collection schema (`schemas/**/*.yaml`)
    CollectionSchema,
    /// Stored query template (`stored_queries/**/*.yaml`)
    StoredQuery,
    /// Search view (`views/**/*.json`)
    View,
}

impl DefinitionKind {
    /// All kinds, in the order a run validates them
    pub const ALL: [DefinitionKind; 3] = [
        DefinitionKind::CollectionSchema,
        DefinitionKind::StoredQuery,
        DefinitionKind::View,
    ];

    /// Family directory under the artifact root
    pub fn directory(&self) -> &'static str {
        match self {
            DefinitionKind::CollectionSchema => "schemas",
            DefinitionKind::StoredQuery => "stored_queries",
            DefinitionKind::View => "views",
        }
    }

    /// File extension of the family
    pub fn extension(&self) -> &'static str {
        match self {
            DefinitionKind::CollectionSchema | DefinitionKind::StoredQuery => "yaml",
            DefinitionKind::View => "json",
        }
    }

    /// Returns the kind name for log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            DefinitionKind::CollectionSchema => "collection_schema",
            DefinitionKind::StoredQuery => "stored_query",
            DefinitionKind::View => "view",
        }
    }

    /// Plural noun used in duplicate-name messages
    pub fn plural(&self) -> &'static str {
        match self {
            DefinitionKind::CollectionSchema => "schemas",
            DefinitionKind::StoredQuery => "queries",
            DefinitionKind::View => "views",
        }
    }
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Graph collection kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    /// Document collection
    Vertex,
    /// Edge collection linking two vertices
    Edge,
}

/// Collection schema definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSchemaDef {
    /// Collection name, lowercase and underscores
    pub name: String,
    /// Vertex or edge
    #[serde(rename = "type")]
    pub kind: CollectionKind,
    /// Time-travel (versioned) variant
    #[serde(rename = "delta", default)]
    pub is_delta: bool,
    /// Document body contract (a JSON schema)
    #[serde(rename = "schema")]
    pub body_schema: Value,
}

impl CollectionSchemaDef {
    /// Top-level `type` keyword of the body schema, if it is a string
    pub fn body_type(&self) -> Option<&str> {
        self.body_schema.get("type").and_then(Value::as_str)
    }

    /// Names listed in the body schema's `required` array
    pub fn required_fields(&self) -> BTreeSet<&str> {
        self.body_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// Stored query definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredQueryDef {
    /// Query name; must equal the file stem
    pub name: String,
    /// Query source text
    #[serde(rename = "query")]
    pub query_text: String,
    /// Text submitted ahead of the query (shared `WITH` clauses etc.)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_prefix: Option<String>,
    /// Parameter contract (a JSON schema); top-level properties are bind variables
    #[serde(rename = "params", default, skip_serializing_if = "Option::is_none")]
    pub param_schema: Option<Value>,
}

impl StoredQueryDef {
    /// Parameter schema, treating an empty object the same as an absent one.
    pub fn param_schema(&self) -> Option<&Value> {
        self.param_schema
            .as_ref()
            .filter(|schema| schema.as_object().map_or(true, |obj| !obj.is_empty()))
    }

    /// Full text submitted to the query engine: prefix, a space, then the query.
    pub fn submission_text(&self) -> String {
        format!(
            "{} {}",
            self.query_prefix.as_deref().unwrap_or(""),
            self.query_text
        )
    }

    /// Declared bind-variable names (top-level property names of the parameter schema)
    pub fn declared_params(&self) -> BTreeSet<String> {
        self.param_schema()
            .and_then(|schema| schema.get("properties"))
            .and_then(Value::as_object)
            .map(|props| props.keys().cloned().collect())
            .unwrap_or_default()
    }
}

/// Supported search-engine view backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    /// ArangoSearch view
    Arangosearch,
}

/// View definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewDef {
    /// View name; must equal the file stem
    pub name: String,
    /// Backend type
    #[serde(rename = "type")]
    pub view_type: ViewType,
    /// Backend-specific settings, passed through untouched
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_schema_from_wire_keys() {
        let def: CollectionSchemaDef = serde_json::from_value(json!({
            "name": "ncbi_taxon",
            "type": "vertex",
            "delta": true,
            "schema": {"type": "object", "required": ["id", "scientific_name"]}
        }))
        .unwrap();

        assert_eq!(def.kind, CollectionKind::Vertex);
        assert!(def.is_delta);
        assert_eq!(def.body_type(), Some("object"));
        assert!(def.required_fields().contains("id"));
    }

    #[test]
    fn test_delta_defaults_to_false() {
        let def: CollectionSchemaDef = serde_json::from_value(json!({
            "name": "ws_object",
            "type": "edge",
            "schema": {"type": "object"}
        }))
        .unwrap();

        assert!(!def.is_delta);
        assert!(def.required_fields().is_empty());
    }

    #[test]
    fn test_submission_text_joins_prefix() {
        let def: StoredQueryDef = serde_json::from_value(json!({
            "name": "taxon_lineage",
            "query_prefix": "WITH ncbi_taxon",
            "query": "FOR t IN ncbi_taxon RETURN t"
        }))
        .unwrap();

        assert_eq!(
            def.submission_text(),
            "WITH ncbi_taxon FOR t IN ncbi_taxon RETURN t"
        );
    }

    #[test]
    fn test_submission_text_without_prefix() {
        let def: StoredQueryDef = serde_json::from_value(json!({
            "name": "list",
            "query": "RETURN 1"
        }))
        .unwrap();

        assert_eq!(def.submission_text(), " RETURN 1");
    }

    #[test]
    fn test_declared_params() {
        let def: StoredQueryDef = serde_json::from_value(json!({
            "name": "q",
            "query": "RETURN @a",
            "params": {"type": "object", "properties": {"a": {}, "b": {}}}
        }))
        .unwrap();

        let declared: Vec<_> = def.declared_params().into_iter().collect();
        assert_eq!(declared, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_empty_params_treated_as_absent() {
        let def: StoredQueryDef = serde_json::from_value(json!({
            "name": "q",
            "query": "RETURN 1",
            "params": {}
        }))
        .unwrap();

        assert!(def.param_schema().is_none());
        assert!(def.declared_params().is_empty());
    }

    #[test]
    fn test_view_keeps_extra_properties() {
        let def: ViewDef = serde_json::from_value(json!({
            "name": "taxon_search",
            "type": "arangosearch",
            "links": {"ncbi_taxon": {"fields": {}}}
        }))
        .unwrap();

        assert_eq!(def.view_type, ViewType::Arangosearch);
        assert!(def.properties.contains_key("links"));
    }

    #[test]
    fn test_kind_layout() {
        assert_eq!(DefinitionKind::CollectionSchema.directory(), "schemas");
        assert_eq!(DefinitionKind::StoredQuery.extension(), "yaml");
        assert_eq!(DefinitionKind::View.extension(), "json");
    }
}
