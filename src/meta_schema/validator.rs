//! Meta-schema validator for definition shapes
//!
//! Checks a definition document (not its payload) against the fixed
//! meta-schema for its kind. A violation names the offending top-level
//! property: the first missing required key, or the first key whose value
//! fails its own sub-schema.

use serde_json::Value;

use super::schemas;
use crate::definitions::{DefinitionKind, RawDefinition};
use crate::validation::{ValidationError, ValidationResult};

/// A compiled meta-schema for one definition kind.
pub struct MetaSchema {
    validator: jsonschema::Validator,
    required: Vec<String>,
    properties: Vec<(String, jsonschema::Validator)>,
}

impl MetaSchema {
    /// Compiles the meta-schema for a kind.
    pub fn compile(kind: DefinitionKind) -> ValidationResult<Self> {
        let schema = schemas::for_kind(kind);
        let validator = compile(kind, &schema)?;

        let required = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let mut properties = Vec::new();
        if let Some(props) = schema.get("properties").and_then(Value::as_object) {
            for (name, sub_schema) in props {
                properties.push((name.clone(), compile(kind, sub_schema)?));
            }
        }

        Ok(Self {
            validator,
            required,
            properties,
        })
    }

    /// Validates a document, returning the offending property and message on failure.
    pub fn check(&self, document: &Value) -> Result<(), (Option<String>, String)> {
        let message = match self.validator.iter_errors(document).next() {
            Some(error) => error.to_string(),
            None => return Ok(()),
        };

        let Some(obj) = document.as_object() else {
            return Err((None, message));
        };

        if let Some(missing) = self.required.iter().find(|key| !obj.contains_key(*key)) {
            return Err((Some(missing.clone()), message));
        }

        let offending = self.properties.iter().find_map(|(name, validator)| {
            obj.get(name)
                .filter(|value| !validator.is_valid(value))
                .map(|_| name.clone())
        });

        Err((offending, message))
    }
}

fn compile(kind: DefinitionKind, schema: &Value) -> ValidationResult<jsonschema::Validator> {
    jsonschema::validator_for(schema).map_err(|e| {
        ValidationError::Internal(format!("{} meta-schema failed to compile: {}", kind, e))
    })
}

/// Meta-schema validator holding one compiled meta-schema per kind.
pub struct MetaSchemaValidator {
    collection_schema: MetaSchema,
    stored_query: MetaSchema,
    view: MetaSchema,
}

impl MetaSchemaValidator {
    /// Compiles all meta-schemas.
    pub fn new() -> ValidationResult<Self> {
        Ok(Self {
            collection_schema: MetaSchema::compile(DefinitionKind::CollectionSchema)?,
            stored_query: MetaSchema::compile(DefinitionKind::StoredQuery)?,
            view: MetaSchema::compile(DefinitionKind::View)?,
        })
    }

    /// Returns the meta-schema for a kind.
    pub fn meta_schema(&self, kind: DefinitionKind) -> &MetaSchema {
        match kind {
            DefinitionKind::CollectionSchema => &self.collection_schema,
            DefinitionKind::StoredQuery => &self.stored_query,
            DefinitionKind::View => &self.view,
        }
    }

    /// Validates a raw definition against the meta-schema for its kind.
    ///
    /// # Errors
    ///
    /// Returns `SchemaViolation` naming the offending property.
    pub fn validate(&self, raw: &RawDefinition) -> ValidationResult<()> {
        self.meta_schema(raw.kind)
            .check(&raw.document)
            .map_err(|(property, message)| ValidationError::SchemaViolation {
                path: raw.path.clone(),
                property,
                message,
            })
    }
}
