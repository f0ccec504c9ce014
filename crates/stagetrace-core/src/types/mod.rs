//! # Core Type Definitions
//!
//! This module contains all core types for the stagetrace staging engine:
//! - Workflow configuration (`Workflow`, `WorkflowStage`)
//! - Issue input records (`Issue` and its nested changelog records)
//! - Collection output (`StageBins`, `UnmappedAliases`)
//! - Staging output (`StagingResult`, `StagingReport`)
//! - Error types (`StagingError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Preserve declaration order wherever order carries meaning
//! - Use `BTreeMap` for keyed data so iteration order is stable
//! - Use saturating arithmetic for counters to prevent overflow

mod issue;
mod workflow;

pub use issue::{Changelog, History, HistoryItem, Issue, IssueFields, IssueStatus};
pub use workflow::{Workflow, WorkflowStage};

use crate::primitives::DATE_TIME_SEPARATOR;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

// =============================================================================
// STAGE BINS
// =============================================================================

/// Candidate timestamps gathered per stage, before reconciliation.
///
/// Bins borrow their timestamps from the [`Issue`] they were collected from
/// and live only for the duration of one staging call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StageBins<'a> {
    bins: Vec<Vec<&'a str>>,
}

impl<'a> StageBins<'a> {
    /// Create `stage_count` empty bins.
    #[must_use]
    pub fn new(stage_count: usize) -> Self {
        Self {
            bins: vec![Vec::new(); stage_count],
        }
    }

    /// Append a candidate timestamp to the bin at `stage`.
    ///
    /// Out-of-range stages are ignored; the index never hands those out.
    pub fn push(&mut self, stage: usize, timestamp: &'a str) {
        if let Some(bin) = self.bins.get_mut(stage) {
            bin.push(timestamp);
        }
    }

    /// Candidates collected for `stage`, in collection order.
    #[must_use]
    pub fn get(&self, stage: usize) -> &[&'a str] {
        self.bins.get(stage).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of stages (bins), including empty ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// True if there are no stages at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Consume the bins, yielding one candidate list per stage.
    #[must_use]
    pub fn into_inner(self) -> Vec<Vec<&'a str>> {
        self.bins
    }
}

impl<'a> From<Vec<Vec<&'a str>>> for StageBins<'a> {
    fn from(bins: Vec<Vec<&'a str>>) -> Self {
        Self { bins }
    }
}

// =============================================================================
// UNMAPPED ALIASES
// =============================================================================

/// Occurrence counts of stage-like values that no workflow stage declares.
///
/// Surfacing these lets operators spot gaps in their workflow configuration:
/// statuses used in practice that were never mapped to a stage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnmappedAliases(BTreeMap<String, u64>);

impl UnmappedAliases {
    /// Create an empty counter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `alias`.
    pub fn record(&mut self, alias: &str) {
        let count = self.0.entry(alias.to_string()).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Occurrences of `alias` (0 if never seen).
    #[must_use]
    pub fn count(&self, alias: &str) -> u64 {
        self.0.get(alias).copied().unwrap_or(0)
    }

    /// Number of distinct unmapped aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if every relevant value mapped to a stage.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(alias, count)` pairs in alias order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(alias, count)| (alias.as_str(), *count))
    }
}

// =============================================================================
// STAGING RESULT
// =============================================================================

/// One date per workflow stage, in declaration order.
///
/// Each entry is either a `YYYY-MM-DD` date or the empty string, meaning the
/// history holds no valid evidence that the issue passed through that stage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StagingResult(Vec<String>);

impl StagingResult {
    /// Create a result from per-stage entries.
    #[must_use]
    pub fn new(dates: Vec<String>) -> Self {
        Self(dates)
    }

    /// Date for `stage`, or `None` if the stage is unknown or out of range.
    #[must_use]
    pub fn get(&self, stage: usize) -> Option<&str> {
        self.0
            .get(stage)
            .map(String::as_str)
            .filter(|date| !date.is_empty())
    }

    /// Number of stages covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the result covers no stages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All entries, empty strings included.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Consume the result into its raw entries.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl PartialEq<[&str]> for StagingResult {
    fn eq(&self, other: &[&str]) -> bool {
        self.0.len() == other.len() && self.0.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<const N: usize> PartialEq<[&str; N]> for StagingResult {
    fn eq(&self, other: &[&str; N]) -> bool {
        *self == other[..]
    }
}

/// Date portion of an ISO-8601 timestamp (everything before the first `T`).
///
/// A bare date is returned unchanged.
#[must_use]
pub fn date_part(timestamp: &str) -> &str {
    timestamp
        .split_once(DATE_TIME_SEPARATOR)
        .map(|(date, _)| date)
        .unwrap_or(timestamp)
}

// =============================================================================
// STAGING REPORT
// =============================================================================

/// Staging dates together with the collection diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StagingReport {
    /// One date (or `""`) per stage.
    pub dates: StagingResult,
    /// Relevant history values that matched no stage.
    pub unmapped: UnmappedAliases,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in stagetrace.
///
/// Staging itself never fails; only workflow configuration and the app's
/// input handling produce errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StagingError {
    /// The workflow declares no stages.
    #[error("Workflow has no stages")]
    EmptyWorkflow,

    /// A stage declares no aliases at all.
    #[error("Stage '{0}' declares no aliases")]
    EmptyStage(String),

    /// The same alias is declared by two different stages.
    #[error("Alias '{alias}' is declared by both '{first}' and '{second}'")]
    DuplicateAlias {
        alias: String,
        first: String,
        second: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Input could not be parsed.
    #[error("Parse error: {0}")]
    ParseError(String),
}

// =============================================================================
// TESTS
// =============================================================================
