//! CLI argument definitions using clap
//!
//! Commands:
//! - re-validate validate [--root <dir>] [--config <path>] [--no-wait]
//! - re-validate wait [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Relation engine definition validator
#[derive(Parser, Debug)]
#[command(name = "re-validate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate every collection schema, stored query and view
    Validate {
        /// Artifact root containing schemas/, stored_queries/ and views/
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Skip waiting for the query engine to come online
        #[arg(long)]
        no_wait: bool,
    },

    /// Wait for the query engine to come online and exit
    Wait {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
