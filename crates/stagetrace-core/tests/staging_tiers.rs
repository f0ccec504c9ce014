//! # Staging Tier Tests (T0-T3)
//!
//! If ANY tier fails, staging output cannot be trusted.
//!
//! ## Tiers
//! - T0: Workflow Integrity
//! - T1: Evidence Collection
//! - T2: Date Selection
//! - T3: Full Timelines from Jira payloads

use stagetrace_core::{
    HistoryItem, Issue, StagingError, Workflow, WorkflowIndex, get_staging_dates, stage_issue,
};

fn three_stage_workflow() -> Workflow {
    Workflow::new()
        .with_stage("To Do", ["(Created)"])
        .with_stage("In Progress", ["In Progress"])
        .with_stage("Done", ["Closed", "(Resolved)"])
}

// =============================================================================
// TIER T0: WORKFLOW INTEGRITY
// =============================================================================

mod t0_workflow_integrity {
    use super::*;

    /// T0.1: A well-formed workflow builds.
    #[test]
    fn well_formed_workflow_builds() {
        let index = WorkflowIndex::build(&three_stage_workflow()).expect("build");
        assert_eq!(index.stage_count(), 3);
    }

    /// T0.2: Empty workflows are rejected before staging.
    #[test]
    fn empty_workflow_rejected() {
        let issue = Issue::new("2024-01-01T00:00:00Z");
        let result = get_staging_dates(&issue, &Workflow::new());
        assert!(matches!(result, Err(StagingError::EmptyWorkflow)));
    }

    /// T0.3: Ambiguous aliases are rejected before staging.
    #[test]
    fn ambiguous_alias_rejected() {
        let workflow = three_stage_workflow().with_stage("Archived", ["Closed"]);
        let result = WorkflowIndex::build(&workflow);
        assert!(matches!(result, Err(StagingError::DuplicateAlias { .. })));
    }
}

// =============================================================================
// TIER T1: EVIDENCE COLLECTION
// =============================================================================

mod t1_evidence_collection {
    use super::*;

    /// T1.1: Unknown aliases contribute no date and are counted.
    #[test]
    fn unknown_alias_counted_not_binned() {
        let index = WorkflowIndex::build(&three_stage_workflow()).expect("build");
        let issue = Issue::new("2024-01-01T00:00:00Z")
            .with_history("2024-01-03T00:00:00Z", vec![HistoryItem::status("Waiting")]);

        let report = stage_issue(&issue, &index);
        assert_eq!(report.dates, ["2024-01-01", "", ""]);
        assert_eq!(report.unmapped.count("Waiting"), 1);
        assert_eq!(report.unmapped.len(), 1);
    }

    /// T1.2: Missing optional fields degrade to "no evidence".
    #[test]
    fn missing_fields_degrade_gracefully() {
        let issue: Issue =
            serde_json::from_str(r#"{"fields": {"created": "2024-01-01T00:00:00Z"}}"#).expect("parse");

        let dates = get_staging_dates(&issue, &three_stage_workflow()).expect("stage");
        assert_eq!(dates, ["2024-01-01", "", ""]);
    }

    /// T1.3: Epic Status custom-field transitions count as stage evidence.
    #[test]
    fn epic_status_transitions_count() {
        let issue = Issue::new("2024-01-01T00:00:00Z").with_history(
            "2024-01-06T00:00:00Z",
            vec![HistoryItem::custom("Epic Status", "In Progress")],
        );

        let dates = get_staging_dates(&issue, &three_stage_workflow()).expect("stage");
        assert_eq!(dates, ["2024-01-01", "2024-01-06", ""]);
    }
}

// =============================================================================
// TIER T2: DATE SELECTION
// =============================================================================

mod t2_date_selection {
    use super::*;

    fn four_stage_workflow() -> Workflow {
        Workflow::new()
            .with_stage("Backlog", ["(Created)", "Open"])
            .with_stage("In Progress", ["In Progress"])
            .with_stage("Review", ["In Review"])
            .with_stage("Done", ["Closed", "Done", "(Resolved)"])
    }

    /// T2.1: Interior stages keep their earliest candidate.
    #[test]
    fn interior_earliest_pick() {
        let issue = Issue::new("2024-02-20T00:00:00Z")
            .with_history("2024-03-05T00:00:00Z", vec![HistoryItem::status("In Progress")])
            .with_history("2024-03-01T00:00:00Z", vec![HistoryItem::status("In Progress")])
            .with_history("2024-03-09T00:00:00Z", vec![HistoryItem::status("In Progress")]);

        let dates = get_staging_dates(&issue, &four_stage_workflow()).expect("stage");
        assert_eq!(dates.get(1), Some("2024-03-01"));
    }

    /// T2.2: The last stage keeps its latest candidate.
    #[test]
    fn terminal_latest_pick() {
        let issue = Issue::new("2024-04-01T00:00:00Z")
            .with_history("2024-05-01T00:00:00Z", vec![HistoryItem::status("Done")])
            .with_history("2024-05-20T00:00:00Z", vec![HistoryItem::status("Done")]);

        let dates = get_staging_dates(&issue, &four_stage_workflow()).expect("stage");
        assert_eq!(dates.get(3), Some("2024-05-20"));
    }

    /// T2.3: Reopening pushes the first stage to its latest entry.
    #[test]
    fn reopened_issue_moves_first_stage() {
        let issue = Issue::new("2024-01-01T00:00:00Z")
            .with_history("2024-01-02T00:00:00Z", vec![HistoryItem::status("In Progress")])
            .with_history("2024-01-05T00:00:00Z", vec![HistoryItem::status("Open")])
            .with_history("2024-01-07T00:00:00Z", vec![HistoryItem::status("In Progress")]);

        let dates = get_staging_dates(&issue, &four_stage_workflow()).expect("stage");
        // Backlog moves to the reopen; the earlier In Progress falls below the floor.
        assert_eq!(dates, ["2024-01-05", "2024-01-07", "", ""]);
    }

    /// T2.4: A candidate below the floor is dropped even if earliest in its bin.
    #[test]
    fn floor_rejection() {
        let issue = Issue::new("2024-01-01T00:00:00Z")
            .with_history("2024-01-10T00:00:00Z", vec![HistoryItem::status("In Progress")])
            .with_history("2024-01-08T00:00:00Z", vec![HistoryItem::status("In Review")])
            .with_history("2024-01-12T00:00:00Z", vec![HistoryItem::status("In Review")]);

        let dates = get_staging_dates(&issue, &four_stage_workflow()).expect("stage");
        assert_eq!(dates, ["2024-01-01", "2024-01-10", "2024-01-12", ""]);
    }

    /// T2.5: A skipped stage stays empty and does not reset the floor.
    #[test]
    fn skipped_stage_keeps_floor() {
        let issue = Issue::new("2024-01-01T00:00:00Z")
            .with_status("Closed")
            .with_resolution("2024-01-09T00:00:00Z")
            .with_history("2024-01-04T00:00:00Z", vec![HistoryItem::status("In Review")]);

        let dates = get_staging_dates(&issue, &four_stage_workflow()).expect("stage");
        assert_eq!(dates, ["2024-01-01", "", "2024-01-04", "2024-01-09"]);
    }
}

// =============================================================================
// TIER T3: FULL TIMELINES
// =============================================================================

mod t3_full_timelines {
    use super::*;

    /// T3.1: The reference three-stage example.
    #[test]
    fn reference_example() {
        let workflow: Workflow = serde_json::from_str(
            r#"{"To Do": ["(Created)"], "In Progress": ["In Progress"], "Done": ["Closed", "(Resolved)"]}"#,
        )
        .expect("workflow");
        let issue = Issue::new("2024-01-01T00:00:00Z")
            .with_status("Closed")
            .with_resolution("2024-01-10T00:00:00Z")
            .with_history("2024-01-03T00:00:00Z", vec![HistoryItem::status("In Progress")]);

        let dates = get_staging_dates(&issue, &workflow).expect("stage");
        assert_eq!(dates, ["2024-01-01", "2024-01-03", "2024-01-10"]);
    }

    /// T3.2: A realistic Jira payload with out-of-order, mixed history.
    #[test]
    fn jira_payload_out_of_order() {
        let workflow: Workflow = serde_json::from_str(
            r#"{
                "Backlog": ["(Created)", "Open", "To Do"],
                "In Progress": ["In Progress", "Active"],
                "Review": ["In Review", "Code Review"],
                "Done": ["Closed", "Done", "(Resolved)"]
            }"#,
        )
        .expect("workflow");

        let issue: Issue = serde_json::from_str(
            r#"{
                "key": "WEB-311",
                "fields": {
                    "created": "2024-06-03T08:12:44.000+0000",
                    "status": {"name": "Closed"},
                    "resolutiondate": "2024-06-21T16:40:02.000+0000"
                },
                "changelog": {"histories": [
                    {"created": "2024-06-14T11:00:00.000+0000", "items": [
                        {"field": "status", "fieldtype": "jira", "fromString": "Active", "toString": "Code Review"},
                        {"field": "assignee", "fieldtype": "jira", "fromString": "ana", "toString": "raj"}
                    ]},
                    {"created": "2024-06-05T09:30:00.000+0000", "items": [
                        {"field": "status", "fieldtype": "jira", "fromString": "To Do", "toString": "Active"}
                    ]},
                    {"created": "2024-06-11T13:15:00.000+0000", "items": [
                        {"field": "status", "fieldtype": "jira", "fromString": "Active", "toString": "Blocked"}
                    ]},
                    {"created": "2024-06-12T10:00:00.000+0000", "items": [
                        {"field": "status", "fieldtype": "jira", "fromString": "Blocked", "toString": "Active"}
                    ]},
                    {"created": "2024-06-21T16:40:02.000+0000", "items": [
                        {"field": "status", "fieldtype": "jira", "fromString": "Code Review", "toString": "Closed"}
                    ]}
                ]}
            }"#,
        )
        .expect("issue");

        let index = WorkflowIndex::build(&workflow).expect("build");
        let report = stage_issue(&issue, &index);

        assert_eq!(
            report.dates,
            ["2024-06-03", "2024-06-05", "2024-06-14", "2024-06-21"]
        );
        assert_eq!(report.unmapped.count("Blocked"), 1);
    }
}
