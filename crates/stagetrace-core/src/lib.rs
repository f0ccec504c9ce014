//! # stagetrace-core
//!
//! The deterministic staging engine for stagetrace - THE LOGIC.
//!
//! Given an ordered workflow (stages with alias names) and one issue with its
//! change history, this crate reconstructs one representative date per stage:
//! a compact staging timeline that reporting callers turn into dwell times.
//!
//! ## Pipeline
//!
//! 1. [`WorkflowIndex`] maps every alias to its stage position.
//! 2. [`StageCollector`] bins the issue's timestamps per stage.
//! 3. [`DateReconciler`] picks one monotonic date per stage.
//!
//! ## Architectural Constraints
//!
//! - Pure and synchronous: no I/O, no async, no logging dependency
//! - Deterministic: `BTreeMap` only, identical input gives identical output
//! - A [`WorkflowIndex`] is immutable and can be shared across threads;
//!   everything else lives for one staging call

// =============================================================================
// MODULES
// =============================================================================

pub mod collector;
pub mod index;
pub mod primitives;
pub mod reconciler;
pub mod staging;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Changelog, History, HistoryItem, Issue, IssueFields, IssueStatus, StageBins, StagingError,
    StagingReport, StagingResult, UnmappedAliases, Workflow, WorkflowStage, date_part,
};

// =============================================================================
// RE-EXPORTS: Staging Pipeline
// =============================================================================

pub use collector::{Collection, StageCollector};
pub use index::WorkflowIndex;
pub use reconciler::{DateReconciler, Pick};
pub use staging::{get_staging_dates, stage_issue};
