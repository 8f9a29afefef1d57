//! Meta-schema validation
//!
//! Schema mechanics are delegated to the `jsonschema` crate. This module
//! owns the fixed meta-schemas for the three definition kinds and the
//! usability probe for user-authored sub-schemas.

mod probe;
pub mod schemas;
mod validator;

pub use probe::{ensure_usable, probe, ProbeError};
pub use validator::{MetaSchema, MetaSchemaValidator};
