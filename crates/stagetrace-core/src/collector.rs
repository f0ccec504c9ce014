//! # Stage Collector
//!
//! Scans one issue's metadata and changelog and bins candidate timestamps
//! per stage.
//!
//! - Seeds the first stage from the creation date when configured
//! - Seeds the `Closed` stage from the resolution date when configured
//! - Bins status and recognised custom-field transitions by alias
//! - Counts relevant values that no stage declares

use crate::index::WorkflowIndex;
use crate::primitives::{CLOSED_STATUS, CUSTOM_FIELD_TYPE, CUSTOM_STAGE_FIELDS, STATUS_FIELD};
use crate::{HistoryItem, Issue, StageBins, UnmappedAliases};

/// Output of one collection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<'a> {
    /// Candidate timestamps per stage.
    pub bins: StageBins<'a>,
    /// Relevant values that matched no stage.
    pub unmapped: UnmappedAliases,
}

/// Assigns an issue's timestamps to stage bins.
pub struct StageCollector;

impl StageCollector {
    /// Collect candidate timestamps for `issue` against `index`.
    ///
    /// Status and `Epic Status` transitions naming the same alias land in the
    /// same bin; their origin is not tracked.
    #[must_use]
    pub fn collect<'a>(issue: &'a Issue, index: &WorkflowIndex) -> Collection<'a> {
        let mut bins = StageBins::new(index.stage_count());
        let mut unmapped = UnmappedAliases::new();

        if index.creates_in_first_stage() {
            bins.push(0, &issue.fields.created);
        }

        if index.resolves_in_last_stage() {
            Self::seed_resolution(issue, index, &mut bins, &mut unmapped);
        }

        for history in &issue.changelog.histories {
            for alias in history.items.iter().filter_map(Self::stage_alias) {
                match index.stage_of(alias) {
                    Some(stage) => bins.push(stage, &history.created),
                    None => unmapped.record(alias),
                }
            }
        }

        Collection { bins, unmapped }
    }

    /// Alias named by a relevant changelog item, `None` for anything else.
    ///
    /// An item is relevant if it changes the status field, or a recognised
    /// custom field tagged as custom. Relevant items without a new value name
    /// no alias and are skipped.
    #[must_use]
    pub fn stage_alias(item: &HistoryItem) -> Option<&str> {
        let relevant = item.field == STATUS_FIELD
            || (CUSTOM_STAGE_FIELDS.contains(&item.field.as_str())
                && item.fieldtype.as_deref() == Some(CUSTOM_FIELD_TYPE));

        if relevant {
            item.to_name.as_deref()
        } else {
            None
        }
    }

    /// Bin the resolution date under the `Closed` alias's stage, if the issue
    /// is currently `Closed` and resolved.
    fn seed_resolution<'a>(
        issue: &'a Issue,
        index: &WorkflowIndex,
        bins: &mut StageBins<'a>,
        unmapped: &mut UnmappedAliases,
    ) {
        if issue.status_name() != Some(CLOSED_STATUS) {
            return;
        }
        let Some(resolved) = issue.fields.resolutiondate.as_deref() else {
            return;
        };

        match index.stage_of(CLOSED_STATUS) {
            Some(stage) => bins.push(stage, resolved),
            None => unmapped.record(CLOSED_STATUS),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
