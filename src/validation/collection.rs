//! Collection schema checker
//!
//! Check order per definition:
//! 1. meta-schema shape
//! 2. duplicate name
//! 3. body sub-schema usability probe
//! 4. body `type` is `object`
//! 5. kind-specific required fields
//!
//! | kind   | delta | body must require |
//! |--------|-------|-------------------|
//! | edge   | no    | `_from`, `_to`    |
//! | edge   | yes   | `from`, `to`      |
//! | vertex | no    | `_key`            |
//! | vertex | yes   | `id`              |

use super::context::ValidationContext;
use super::errors::{InvariantRule, ValidationError, ValidationResult};
use crate::definitions::{CollectionKind, CollectionSchemaDef, DefinitionKind, RawDefinition};
use crate::meta_schema::{ensure_usable, MetaSchemaValidator};

/// Returns the required-field rule for a collection kind and variant.
pub fn required_field_rule(kind: CollectionKind, is_delta: bool) -> InvariantRule {
    match (kind, is_delta) {
        (CollectionKind::Edge, false) => InvariantRule::EdgeEndpoints,
        (CollectionKind::Edge, true) => InvariantRule::DeltaEdgeEndpoints,
        (CollectionKind::Vertex, false) => InvariantRule::VertexKey,
        (CollectionKind::Vertex, true) => InvariantRule::DeltaVertexId,
    }
}

/// Applies graph-domain invariants to collection schemas.
pub struct CollectionSchemaChecker<'a> {
    meta: &'a MetaSchemaValidator,
}

impl<'a> CollectionSchemaChecker<'a> {
    /// Creates a checker backed by the given meta-schemas.
    pub fn new(meta: &'a MetaSchemaValidator) -> Self {
        Self { meta }
    }

    /// Checks one collection schema definition.
    ///
    /// # Errors
    ///
    /// - `SchemaViolation` if the definition shape is wrong
    /// - `DuplicateName` if another schema in this run has the same name
    /// - `InvalidBodySchema` if the body schema does not compile
    /// - `InvariantViolation` if the body is not an object schema or lacks
    ///   the required fields for its kind
    pub fn check(
        &self,
        raw: &RawDefinition,
        ctx: &mut ValidationContext,
    ) -> ValidationResult<CollectionSchemaDef> {
        debug_assert_eq!(raw.kind, DefinitionKind::CollectionSchema);

        self.meta.validate(raw)?;
        let def: CollectionSchemaDef = raw.parse()?;

        ctx.claim_name(DefinitionKind::CollectionSchema, &def.name)?;

        ensure_usable(&def.body_schema).map_err(|reason| ValidationError::InvalidBodySchema {
            path: raw.path.clone(),
            reason,
        })?;

        if def.body_type() != Some("object") {
            return Err(ValidationError::InvariantViolation {
                path: raw.path.clone(),
                rule: InvariantRule::ObjectType,
            });
        }

        let rule = required_field_rule(def.kind, def.is_delta);
        let required = def.required_fields();
        if !rule
            .required_fields()
            .iter()
            .all(|field| required.contains(field))
        {
            return Err(ValidationError::InvariantViolation {
                path: raw.path.clone(),
                rule,
            });
        }

        Ok(def)
    }
}
