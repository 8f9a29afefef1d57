//! Fixed meta-schemas for each definition kind

use serde_json::{json, Value};

use crate::definitions::DefinitionKind;

/// Collection and view names: lowercase letters and underscores.
pub const NAME_PATTERN: &str = "^[a-z_]+$";

/// Meta-schema for vertex and edge collection schemas.
pub fn collection_schema() -> Value {
    json!({
        "type": "object",
        "required": ["name", "type", "schema"],
        "properties": {
            "name": {
                "title": "Collection name",
                "type": "string",
                "pattern": NAME_PATTERN
            },
            "type": {
                "type": "string",
                "enum": ["vertex", "edge"]
            },
            "delta": {"type": "boolean"},
            "schema": {"type": "object"}
        }
    })
}

/// Meta-schema for stored queries.
pub fn stored_query() -> Value {
    json!({
        "type": "object",
        "required": ["query", "name"],
        "properties": {
            "name": {"type": "string"},
            "params": {"type": "object"},
            "query_prefix": {"type": "string"},
            "query": {"type": "string"}
        }
    })
}

/// Meta-schema for search views.
pub fn view() -> Value {
    json!({
        "type": "object",
        "required": ["name", "type"],
        "properties": {
            "name": {
                "title": "View name",
                "type": "string",
                "pattern": NAME_PATTERN
            },
            "type": {
                "type": "string",
                "enum": ["arangosearch"]
            }
        }
    })
}

/// Returns the meta-schema for a kind.
pub fn for_kind(kind: DefinitionKind) -> Value {
    match kind {
        DefinitionKind::CollectionSchema => collection_schema(),
        DefinitionKind::StoredQuery => stored_query(),
        DefinitionKind::View => view(),
    }
}
