//! # Date Reconciler
//!
//! Walks stage bins in order and picks one date per stage.
//!
//! ## Rules
//!
//! | Step | Rule |
//! |------|------|
//! | Floor | Candidates earlier than the previous pick are discarded |
//! | Empty | No surviving candidate → `""`, floor unchanged |
//! | First/last stage | Latest surviving candidate wins |
//! | Interior stage | Earliest surviving candidate wins |
//! | Output | Date portion only; the floor keeps full precision |
//!
//! Timestamps are compared as strings. This is correct for ISO-8601 values
//! written with a consistent format and offset, which callers must ensure.

use crate::types::date_part;
use crate::{StageBins, StagingResult};

/// Which surviving candidate a stage keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// Most recent candidate: issues re-enter the opening and closing
    /// stages, and the last entry is the representative one.
    Latest,
    /// First candidate: first entry into a mid-pipeline stage is the
    /// transition point.
    Earliest,
}

impl Pick {
    /// Pick policy for stage `index` out of `stage_count`.
    #[must_use]
    pub fn for_stage(index: usize, stage_count: usize) -> Self {
        if index == 0 || index + 1 == stage_count {
            Pick::Latest
        } else {
            Pick::Earliest
        }
    }
}

/// Reduces stage bins to one monotonic date per stage.
pub struct DateReconciler;

impl DateReconciler {
    /// Reconcile `bins` into a staging result.
    #[must_use]
    pub fn reconcile(bins: StageBins<'_>) -> StagingResult {
        let stage_count = bins.len();
        let mut floor: Option<&str> = None;

        let dates = bins
            .into_inner()
            .into_iter()
            .enumerate()
            .map(|(index, bin)| {
                match Self::select(bin, floor, Pick::for_stage(index, stage_count)) {
                    Some(selected) => {
                        floor = Some(selected);
                        date_part(selected).to_string()
                    }
                    None => String::new(),
                }
            })
            .collect();

        StagingResult::new(dates)
    }

    /// Select one candidate from `bin` at or above `floor`.
    #[must_use]
    pub fn select<'a>(bin: Vec<&'a str>, floor: Option<&str>, pick: Pick) -> Option<&'a str> {
        let mut valid: Vec<&'a str> = bin
            .into_iter()
            .filter(|date| floor.is_none_or(|f| *date >= f))
            .collect();
        valid.sort_unstable();

        match pick {
            Pick::Latest => valid.last().copied(),
            Pick::Earliest => valid.first().copied(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
