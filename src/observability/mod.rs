//! Observability for validation runs
//!
//! - Structured logging through `tracing`
//! - Typed lifecycle events
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on validation outcomes
//! 3. Logs never go to stdout
//!
//! # Usage
//!
//! ```ignore
//! use re_validate::observability::{init_logging, Event};
//!
//! init_logging("info")?;
//! tracing::info!(event = %Event::RunStart, root = "relation_engine_spec");
//! ```

#[cfg(test)]
pub(crate) mod capture;
mod events;
mod logger;

pub use events::Event;
pub use logger::{build_filter, init_logging, ObservabilityError, ObservabilityResult};
