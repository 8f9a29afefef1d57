//! View checker: meta-schema shape, filename agreement, unique names.

use super::context::ValidationContext;
use super::errors::{ValidationError, ValidationResult};
use crate::definitions::{DefinitionKind, RawDefinition, ViewDef};
use crate::meta_schema::MetaSchemaValidator;

/// Checks search view definitions.
pub struct ViewChecker<'a> {
    meta: &'a MetaSchemaValidator,
}

impl<'a> ViewChecker<'a> {
    /// Creates a checker backed by the given meta-schemas.
    pub fn new(meta: &'a MetaSchemaValidator) -> Self {
        Self { meta }
    }

    /// Checks one view definition.
    pub fn check(&self, raw: &RawDefinition, ctx: &mut ValidationContext) -> ValidationResult<ViewDef> {
        debug_assert_eq!(raw.kind, DefinitionKind::View);

        self.meta.validate(raw)?;
        let def: ViewDef = raw.parse()?;

        if def.name != raw.file_stem {
            return Err(ValidationError::NameMismatch {
                name: def.name.clone(),
                filename: raw.file_stem.clone(),
            });
        }

        ctx.claim_name(DefinitionKind::View, &def.name)?;

        Ok(def)
    }
}
