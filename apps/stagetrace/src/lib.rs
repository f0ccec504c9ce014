//! # stagetrace
//!
//! Command-line front end for the stagetrace staging engine.
//!
//! - [`cli`]: clap definitions and command implementations
//! - [`input`]: workflow and issue file loading
//!
//! All staging logic lives in `stagetrace-core`; this crate only reads files,
//! logs and prints.

pub mod cli;
pub mod input;
