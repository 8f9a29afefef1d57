//! Validation runner
//!
//! Phases run in a fixed order:
//! 1. collection schemas
//! 2. stored queries
//! 3. views
//!
//! Within a phase, files are checked in sorted path order. The first
//! violation halts the run; nothing after it is checked.

use std::io::Write;
use std::path::Path;

use uuid::Uuid;

use super::report::ProgressReporter;
use crate::definitions::{DefinitionKind, DefinitionLoader, RawDefinition};
use crate::engine::QueryEngine;
use crate::meta_schema::MetaSchemaValidator;
use crate::observability::Event;
use crate::validation::{
    CollectionSchemaChecker, StoredQueryChecker, ValidationContext, ValidationError, ValidationResult,
    ViewChecker,
};

/// Counts of definitions that passed, per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Run ID attached to every log record of the run
    pub run_id: Uuid,
    /// Collection schemas checked
    pub collection_schemas: usize,
    /// Stored queries checked
    pub stored_queries: usize,
    /// Views checked
    pub views: usize,
}

impl RunSummary {
    fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            collection_schemas: 0,
            stored_queries: 0,
            views: 0,
        }
    }

    fn record(&mut self, kind: DefinitionKind, count: usize) {
        match kind {
            DefinitionKind::CollectionSchema => self.collection_schemas = count,
            DefinitionKind::StoredQuery => self.stored_queries = count,
            DefinitionKind::View => self.views = count,
        }
    }

    /// Total definitions checked.
    pub fn total(&self) -> usize {
        self.collection_schemas + self.stored_queries + self.views
    }
}

/// Walks the artifact store and runs every checker, fail-fast.
pub struct ValidationRunner<'a, E: QueryEngine + ?Sized, W: Write> {
    loader: DefinitionLoader,
    meta: MetaSchemaValidator,
    engine: &'a E,
    reporter: ProgressReporter<W>,
}

impl<'a, E: QueryEngine + ?Sized, W: Write> ValidationRunner<'a, E, W> {
    /// Creates a runner over the artifact root, reporting progress to `out`.
    pub fn new(root: &Path, engine: &'a E, out: W) -> ValidationResult<Self> {
        Ok(Self {
            loader: DefinitionLoader::new(root),
            meta: MetaSchemaValidator::new()?,
            engine,
            reporter: ProgressReporter::new(out),
        })
    }

    /// Runs all three phases with a fresh context.
    pub fn run(&mut self) -> ValidationResult<RunSummary> {
        let mut ctx = ValidationContext::new();
        let mut summary = RunSummary::new(ctx.run_id());

        tracing::info!(
            event = %Event::RunStart,
            run_id = %ctx.run_id(),
            root = %self.loader.root().display()
        );

        for kind in DefinitionKind::ALL {
            match self.run_phase(kind, &mut ctx) {
                Ok(count) => summary.record(kind, count),
                Err(e) => {
                    tracing::info!(
                        event = %Event::RunFailed,
                        run_id = %ctx.run_id(),
                        phase = %kind,
                        code = %e.code()
                    );
                    return Err(e);
                }
            }
        }

        tracing::info!(
            event = %Event::RunComplete,
            run_id = %ctx.run_id(),
            definitions = summary.total()
        );
        Ok(summary)
    }

    /// Runs one phase, returning the number of definitions checked.
    pub fn run_phase(
        &mut self,
        kind: DefinitionKind,
        ctx: &mut ValidationContext,
    ) -> ValidationResult<usize> {
        tracing::info!(event = %Event::PhaseStart, run_id = %ctx.run_id(), phase = %kind);
        self.reporter.phase_start(kind);

        let paths = match self.loader.enumerate(kind) {
            Ok(paths) => paths,
            Err(e) => return Err(rejected(ctx, kind.directory(), e)),
        };

        for path in &paths {
            let shown = self.loader.display_path(path);
            self.reporter.validating(&shown);

            let checked = self
                .loader
                .load(kind, path)
                .and_then(|raw| self.check_one(&raw, ctx));
            let label = match checked {
                Ok(label) => label,
                Err(e) => return Err(rejected(ctx, &shown, e)),
            };

            tracing::debug!(event = %Event::DefinitionValid, run_id = %ctx.run_id(), path = %shown);
            self.reporter.valid(&label);
        }

        let count = ctx.claimed_count(kind);
        self.reporter.phase_complete();
        tracing::info!(
            event = %Event::PhaseComplete,
            run_id = %ctx.run_id(),
            phase = %kind,
            definitions = count
        );
        Ok(count)
    }

    /// Dispatches to the checker for the definition's kind.
    ///
    /// Returns the label printed in the confirmation line: the name for
    /// schemas and views, the path for stored queries.
    fn check_one(&self, raw: &RawDefinition, ctx: &mut ValidationContext) -> ValidationResult<String> {
        match raw.kind {
            DefinitionKind::CollectionSchema => CollectionSchemaChecker::new(&self.meta)
                .check(raw, ctx)
                .map(|def| def.name),
            DefinitionKind::StoredQuery => StoredQueryChecker::new(&self.meta, self.engine)
                .check(raw, ctx)
                .map(|_| raw.path.clone()),
            DefinitionKind::View => ViewChecker::new(&self.meta)
                .check(raw, ctx)
                .map(|def| def.name),
        }
    }

    /// Consumes the runner, returning the report writer.
    pub fn into_output(self) -> W {
        self.reporter.into_inner()
    }
}

/// Logs a fatal stop at `path` and hands the error back.
fn rejected(ctx: &ValidationContext, path: &str, error: ValidationError) -> ValidationError {
    tracing::info!(
        event = %Event::DefinitionRejected,
        run_id = %ctx.run_id(),
        path = %path,
        code = %error.code()
    );
    error
}
