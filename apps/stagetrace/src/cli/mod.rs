//! # stagetrace CLI Module
//!
//! This module implements the CLI interface for stagetrace.
//!
//! ## Available Commands
//!
//! - `dates` - Reconstruct per-stage dates for one issue
//! - `validate` - Check a workflow file for configuration errors
//! - `stages` - List a workflow's stages, aliases and seeding flags

mod commands;

use clap::{Parser, Subcommand};
use stagetrace_core::StagingError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// stagetrace - per-stage dates from issue change history
///
/// Maps an issue's status transitions onto an ordered workflow and prints
/// one representative date per stage.
#[derive(Parser, Debug)]
#[command(name = "stagetrace")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress the header line in text output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconstruct per-stage dates for one issue
    Dates {
        /// Workflow file (.json or .toml)
        #[arg(short, long)]
        workflow: PathBuf,

        /// Issue file (Jira issue JSON with changelog)
        #[arg(short, long)]
        issue: PathBuf,

        /// Also list history values that matched no stage
        #[arg(long)]
        show_unmapped: bool,
    },

    /// Check a workflow file for configuration errors
    Validate {
        /// Workflow file (.json or .toml)
        #[arg(short, long)]
        workflow: PathBuf,
    },

    /// List a workflow's stages in order
    Stages {
        /// Workflow file (.json or .toml)
        #[arg(short, long)]
        workflow: PathBuf,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), StagingError> {
    let output = OutputMode {
        json: cli.json_mode,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Dates {
            workflow,
            issue,
            show_unmapped,
        } => cmd_dates(&workflow, &issue, show_unmapped, output),
        Commands::Validate { workflow } => cmd_validate(&workflow, output),
        Commands::Stages { workflow } => cmd_stages(&workflow, output),
    }
}
