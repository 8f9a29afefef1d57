//! Definition checkers for the relation engine
//!
//! Each checker stops at the first violation. Duplicate-name state lives in
//! an explicit `ValidationContext` passed into every call.
//!
//! # Design Principles
//!
//! - Fail fast: every violation is fatal
//! - Deterministic: same artifacts, same first error
//! - No mutation of definitions
//! - Query text is opaque; only its bind-variable names are extracted,
//!   and only by the query engine

mod collection;
mod context;
mod errors;
mod stored_query;
mod view;

pub use collection::{required_field_rule, CollectionSchemaChecker};
pub use context::ValidationContext;
pub use errors::{InvariantRule, ValidationError, ValidationErrorCode, ValidationResult};
pub use stored_query::{BindVarDiff, StoredQueryChecker};
pub use view::ViewChecker;
