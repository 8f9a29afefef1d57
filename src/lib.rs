//! re-validate - strict, deterministic validation of relation engine definitions
//!
//! Checks collection schemas, stored queries and search views before they
//! reach a graph database.

pub mod cli;
pub mod definitions;
pub mod engine;
pub mod meta_schema;
pub mod observability;
pub mod orchestrator;
pub mod validation;
