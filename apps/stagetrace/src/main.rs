//! # stagetrace
//!
//! Reconstructs one date per workflow stage for a single issue.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │             apps/stagetrace (THE BINARY)      │
//! │                                               │
//! │  ┌─────────────┐         ┌─────────────────┐  │
//! │  │    CLI      │────────►│  input loading  │  │
//! │  │   (clap)    │         │  (JSON / TOML)  │  │
//! │  └──────┬──────┘         └────────┬────────┘  │
//! │         └──────────┬──────────────┘           │
//! │                    ▼                          │
//! │           ┌─────────────────┐                 │
//! │           │ stagetrace-core │                 │
//! │           │   (THE LOGIC)   │                 │
//! │           └─────────────────┘                 │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! stagetrace dates -w workflow.toml -i PROJ-42.json
//! stagetrace --json-mode dates -w workflow.json -i PROJ-42.json --show-unmapped
//! stagetrace validate -w workflow.toml
//! stagetrace stages -w workflow.toml
//! ```

use clap::Parser;
use stagetrace::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse first so --verbose can shape the default filter.
    let cli = cli::Cli::parse();

    init_tracing(cli.verbose);

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing on stderr. RUST_LOG overrides the default filter;
/// STAGETRACE_LOG_FORMAT=json enables machine-parseable output.
fn init_tracing(verbose: bool) {
    let log_format = std::env::var("STAGETRACE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if verbose {
        "stagetrace=debug,stagetrace_core=debug"
    } else {
        "stagetrace=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
