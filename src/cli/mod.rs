//! CLI module for re-validate
//!
//! Provides command-line interface for:
//! - validate: Check every definition in an artifact root
//! - wait: Block until the query engine is reachable

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{run_command, validate, wait};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};

/// Parse arguments and run the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}
