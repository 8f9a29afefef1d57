//! Query engine collaborator
//!
//! The validator never executes queries. It only asks the engine to parse a
//! query and report the bind variables it references. The interface is a
//! single method so checks can run against a fake engine.

mod arango;
mod errors;

pub use arango::ArangoEngine;
pub use errors::{EngineError, EngineResult};

use std::collections::BTreeSet;

/// Result of asking the engine to parse a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Introspection {
    /// The query parsed; these bind variables are referenced
    Parsed { bind_vars: BTreeSet<String> },
    /// The engine rejected the query text with this message
    Rejected { message: String },
}

/// Parse-and-introspect interface of a query engine.
pub trait QueryEngine {
    /// Parses `query` without executing it.
    ///
    /// # Errors
    ///
    /// Returns `EngineError` only when the engine cannot be reached or its
    /// reply cannot be decoded. Syntax errors are `Introspection::Rejected`.
    fn introspect(&self, query: &str) -> EngineResult<Introspection>;
}

impl<E: QueryEngine + ?Sized> QueryEngine for &E {
    fn introspect(&self, query: &str) -> EngineResult<Introspection> {
        (**self).introspect(query)
    }
}
