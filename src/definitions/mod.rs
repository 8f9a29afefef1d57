//! Definition loading for the relation engine artifact store
//!
//! Pure deserialization: files become generic documents, and documents
//! become typed records once their meta-schema check has passed.

mod loader;
mod types;

pub use loader::{DefinitionLoader, RawDefinition};
pub use types::{
    CollectionKind, CollectionSchemaDef, DefinitionKind, StoredQueryDef, ViewDef, ViewType,
};
