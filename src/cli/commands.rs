//! CLI command implementations
//!
//! `validate` sequence:
//! 1. Resolve configuration
//! 2. Install logging
//! 3. Wait for the query engine (unless `--no-wait`)
//! 4. Run every phase, printing progress to stdout
//!
//! The first violation aborts the command.

use std::io;
use std::path::Path;

use crate::engine::ArangoEngine;
use crate::observability::{init_logging, Event};
use crate::orchestrator::{RunSummary, ValidationRunner};

use super::args::Command;
use super::config::Config;
use super::errors::CliResult;

/// Dispatch a parsed command.
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Validate {
            root,
            config,
            no_wait,
        } => validate(&root, config.as_deref(), no_wait).map(|_| ()),
        Command::Wait { config } => wait(config.as_deref()),
    }
}

/// Resolve config and install logging.
fn prepare(config_path: Option<&Path>) -> CliResult<(Config, ArangoEngine)> {
    let config = Config::resolve(config_path)?;
    init_logging(&config.log_level)?;

    tracing::info!(
        event = %Event::ConfigLoaded,
        db_url = %config.db_url,
        db_user = %config.db_user
    );

    let engine = ArangoEngine::new(
        config.db_url.as_str(),
        config.db_user.as_str(),
        config.db_pass.as_str(),
        config.request_timeout(),
    )?;
    Ok((config, engine))
}

/// Validate every definition under `root`.
pub fn validate(root: &Path, config_path: Option<&Path>, no_wait: bool) -> CliResult<RunSummary> {
    let (config, engine) = prepare(config_path)?;

    if !no_wait {
        engine.wait_until_ready(config.wait_timeout(), config.wait_interval())?;
    }

    let mut runner = ValidationRunner::new(root, &engine, io::stdout())?;
    Ok(runner.run()?)
}

/// Block until the query engine is reachable.
pub fn wait(config_path: Option<&Path>) -> CliResult<()> {
    let (config, engine) = prepare(config_path)?;
    engine.wait_until_ready(config.wait_timeout(), config.wait_interval())?;
    Ok(())
}
