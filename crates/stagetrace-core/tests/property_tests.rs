//! # Property-Based Tests
//!
//! Determinism and ordering invariants of staging, checked with proptest.

use proptest::collection::vec;
use proptest::prelude::*;
use stagetrace_core::{
    DateReconciler, HistoryItem, Issue, StageBins, Workflow, WorkflowIndex, date_part,
    get_staging_dates, stage_issue,
};

// =============================================================================
// GENERATORS
// =============================================================================

/// ISO-8601 timestamp from a day offset and an hour.
fn timestamp(day: u32, hour: u32) -> String {
    let month = day / 28 + 1;
    let day = day % 28 + 1;
    format!("2024-{:02}-{:02}T{:02}:00:00.000+0000", month, day, hour)
}

fn timestamp_strategy() -> impl Strategy<Value = String> {
    (0u32..330, 0u32..24).prop_map(|(day, hour)| timestamp(day, hour))
}

/// Workflow with `stages` stages; stage `i` answers to alias `S{i}`.
fn workflow(stages: usize, created: bool, resolved: bool) -> Workflow {
    let mut workflow = Workflow::new();
    for i in 0..stages {
        let mut aliases = vec![format!("S{}", i)];
        if i == 0 && created {
            aliases.push("(Created)".to_string());
        }
        if i + 1 == stages && resolved {
            aliases.push("Closed".to_string());
            aliases.push("(Resolved)".to_string());
        }
        workflow = workflow.with_stage(format!("Stage {}", i), aliases);
    }
    workflow
}

prop_compose! {
    /// A workflow shape plus an issue whose history names stages at random.
    /// Alias index == stage count means "unknown alias".
    fn staging_case()(stages in 1usize..6)(
        stages in Just(stages),
        created in any::<bool>(),
        resolved in any::<bool>(),
        closed in any::<bool>(),
        created_at in timestamp_strategy(),
        resolved_at in timestamp_strategy(),
        events in vec((0..=stages, timestamp_strategy()), 0..30),
    ) -> (Workflow, Issue) {
        let mut issue = Issue::new(created_at).with_resolution(resolved_at);
        if closed {
            issue = issue.with_status("Closed");
        }
        for (stage, at) in events {
            let alias = if stage == stages { "Unknown".to_string() } else { format!("S{}", stage) };
            issue = issue.with_history(at, vec![HistoryItem::status(alias)]);
        }
        (workflow(stages, created, resolved), issue)
    }
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Same (issue, workflow) pair always yields the identical output.
    #[test]
    fn determinism_identical_input_produces_identical_output(case in staging_case()) {
        let (workflow, issue) = case;
        let first = get_staging_dates(&issue, &workflow).expect("stage");
        let second = get_staging_dates(&issue, &workflow).expect("stage");
        prop_assert_eq!(first, second);
    }

    /// One entry per declared stage, always.
    #[test]
    fn result_length_matches_stage_count(case in staging_case()) {
        let (workflow, issue) = case;
        let dates = get_staging_dates(&issue, &workflow).expect("stage");
        prop_assert_eq!(dates.len(), workflow.len());
    }

    /// Non-empty entries never decrease.
    #[test]
    fn known_dates_are_non_decreasing(case in staging_case()) {
        let (workflow, issue) = case;
        let dates = get_staging_dates(&issue, &workflow).expect("stage");
        let known: Vec<&String> = dates.as_slice().iter().filter(|d| !d.is_empty()).collect();
        for pair in known.windows(2) {
            prop_assert!(pair[0] <= pair[1], "{:?} > {:?}", pair[0], pair[1]);
        }
    }

    /// Every entry is either empty or a date-only value.
    #[test]
    fn entries_are_dates_or_empty(case in staging_case()) {
        let (workflow, issue) = case;
        let dates = get_staging_dates(&issue, &workflow).expect("stage");
        for date in dates.as_slice() {
            prop_assert!(date.is_empty() || (date.len() == 10 && !date.contains('T')));
        }
    }

    /// With the created marker, the first stage is never unknown.
    #[test]
    fn created_marker_always_seeds_first_stage(case in staging_case()) {
        let (workflow, issue) = case;
        let index = WorkflowIndex::build(&workflow).expect("build");
        let dates = stage_issue(&issue, &index).dates;
        if index.creates_in_first_stage() {
            let first = dates.get(0).expect("first stage seeded");
            prop_assert!(first >= date_part(&issue.fields.created));
        }
    }

    /// Unknown aliases are counted once per occurrence.
    #[test]
    fn unknown_aliases_are_counted(case in staging_case()) {
        let (workflow, issue) = case;
        let index = WorkflowIndex::build(&workflow).expect("build");
        let expected = issue
            .changelog
            .histories
            .iter()
            .flat_map(|h| &h.items)
            .filter(|item| item.to_name.as_deref() == Some("Unknown"))
            .count() as u64;
        prop_assert_eq!(stage_issue(&issue, &index).unmapped.count("Unknown"), expected);
    }

    /// A candidate below the previous stage's pick is never selected.
    #[test]
    fn floor_excludes_earlier_candidates(
        floor in timestamp_strategy(),
        candidates in vec(timestamp_strategy(), 1..10),
    ) {
        let floor_ref = floor.as_str();
        let bins = StageBins::from(vec![
            vec![floor_ref],
            candidates.iter().map(String::as_str).collect(),
            Vec::new(),
        ]);
        let dates = DateReconciler::reconcile(bins);

        let expected = candidates.iter().filter(|c| c.as_str() >= floor_ref).min();
        prop_assert_eq!(dates.get(1), expected.map(|c| date_part(c)));
    }
}
