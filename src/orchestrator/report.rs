//! Human-readable progress report
//!
//! One line per event, written to an injectable writer (stdout in the CLI).
//! Write failures are ignored: the report never changes a run's outcome.

use std::io::Write;

use crate::definitions::DefinitionKind;

/// Writes per-phase and per-definition progress lines.
pub struct ProgressReporter<W: Write> {
    out: W,
}

impl<W: Write> ProgressReporter<W> {
    /// Creates a reporter writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}", text);
        let _ = self.out.flush();
    }

    /// Phase heading.
    pub fn phase_start(&mut self, kind: DefinitionKind) {
        let heading = match kind {
            DefinitionKind::CollectionSchema => "Validating JSON schemas..",
            DefinitionKind::StoredQuery => "Validating AQL queries..",
            DefinitionKind::View => "Validating views..",
        };
        self.line(heading);
    }

    /// A definition is about to be checked.
    pub fn validating(&mut self, path: &str) {
        self.line(&format!("  validating {}..", path));
    }

    /// A definition passed every check.
    pub fn valid(&mut self, label: &str) {
        self.line(&format!("✓ {} is valid.", label));
    }

    /// Every definition in the phase passed.
    pub fn phase_complete(&mut self) {
        self.line("..all valid.");
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}
