//! Validation orchestration
//!
//! Walks the artifact store phase by phase, invokes the checker for each
//! definition, prints progress, and halts on the first fatal violation.

mod report;
mod runner;

pub use report::ProgressReporter;
pub use runner::{RunSummary, ValidationRunner};
