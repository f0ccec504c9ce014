//! # Staging
//!
//! Entry points tying the index, collector and reconciler together.
//!
//! ```text
//! Workflow ──► WorkflowIndex ──┐
//!                              ▼
//! Issue ────────────► StageCollector ──► StageBins ──► DateReconciler ──► StagingResult
//!                              │
//!                              └──► UnmappedAliases
//! ```

use crate::collector::StageCollector;
use crate::index::WorkflowIndex;
use crate::reconciler::DateReconciler;
use crate::{Issue, StagingError, StagingReport, StagingResult, Workflow};

/// One date per workflow stage for `issue`.
///
/// Builds the index on every call. Callers staging many issues against the
/// same workflow should build a [`WorkflowIndex`] once and use
/// [`stage_issue`].
///
/// # Errors
/// Returns the index build error if `workflow` is ill-formed.
pub fn get_staging_dates(issue: &Issue, workflow: &Workflow) -> Result<StagingResult, StagingError> {
    let index = WorkflowIndex::build(workflow)?;
    Ok(stage_issue(issue, &index).dates)
}

/// Stage `issue` against a prebuilt index, keeping the unmapped-alias
/// diagnostic.
#[must_use]
pub fn stage_issue(issue: &Issue, index: &WorkflowIndex) -> StagingReport {
    let collection = StageCollector::collect(issue, index);
    StagingReport {
        dates: DateReconciler::reconcile(collection.bins),
        unmapped: collection.unmapped,
    }
}
