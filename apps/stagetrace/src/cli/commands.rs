//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//! Each command builds a serializable report, then renders it as text or
//! JSON on stdout. Logging goes to stderr.

use crate::input::{load_issue, load_workflow};
use serde::Serialize;
use stagetrace_core::{
    Issue, StagingError, StagingResult, UnmappedAliases, Workflow, WorkflowIndex, stage_issue,
};
use std::fmt::Write as _;
use std::path::Path;

/// Placeholder printed for stages without a date.
const UNKNOWN_DATE: &str = "-";

/// How command output is rendered.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputMode {
    /// Print JSON instead of text.
    pub json: bool,
    /// Omit the header line in text output.
    pub quiet: bool,
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

// =============================================================================
// DATES COMMAND
// =============================================================================

/// Staging dates for one issue, ready for output.
#[derive(Debug, Clone, Serialize)]
pub struct DatesReport {
    /// Issue key, if the payload carried one.
    pub issue: Option<String>,
    /// Stage names in workflow order.
    pub stages: Vec<String>,
    /// One date (or `""`) per stage.
    pub dates: StagingResult,
    /// History values that matched no stage.
    pub unmapped: UnmappedAliases,
}

impl DatesReport {
    /// Stage `issue` against `workflow`.
    pub fn build(workflow: &Workflow, issue: &Issue) -> Result<Self, StagingError> {
        let index = WorkflowIndex::build(workflow)?;
        let report = stage_issue(issue, &index);

        for (alias, count) in report.unmapped.iter() {
            tracing::warn!(
                "Alias '{}' appears {} time(s) in history but no stage declares it",
                alias,
                count
            );
        }
        for (name, date) in index.stage_names().iter().zip(report.dates.as_slice()) {
            tracing::debug!("Stage '{}' -> '{}'", name, date);
        }

        Ok(Self {
            issue: issue.key.clone(),
            stages: index.stage_names().to_vec(),
            dates: report.dates,
            unmapped: report.unmapped,
        })
    }

    /// Render as aligned `stage: date` lines.
    #[must_use]
    pub fn render_text(&self, show_unmapped: bool, quiet: bool) -> String {
        let mut out = String::new();
        if !quiet {
            let key = self.issue.as_deref().unwrap_or("(no key)");
            let _ = writeln!(out, "Staging dates for {}", key);
        }

        let width = self.stages.iter().map(|s| s.chars().count()).max().unwrap_or(0);
        for (index, name) in self.stages.iter().enumerate() {
            let date = self.dates.get(index).unwrap_or(UNKNOWN_DATE);
            let _ = writeln!(out, "  {:<width$}  {}", name, date, width = width);
        }

        if show_unmapped && !self.unmapped.is_empty() {
            let _ = writeln!(out, "Unmapped aliases:");
            for (alias, count) in self.unmapped.iter() {
                let _ = writeln!(out, "  {} ({})", alias, count);
            }
        }
        out
    }
}

/// Reconstruct and print per-stage dates for one issue.
pub fn cmd_dates(
    workflow_path: &Path,
    issue_path: &Path,
    show_unmapped: bool,
    output: OutputMode,
) -> Result<(), StagingError> {
    tracing::info!(
        "Staging {:?} against workflow {:?}",
        issue_path,
        workflow_path
    );

    let workflow = load_workflow(workflow_path)?;
    let issue = load_issue(issue_path)?;
    let report = DatesReport::build(&workflow, &issue)?;

    if output.json {
        print_json(&report);
    } else {
        print!("{}", report.render_text(show_unmapped, output.quiet));
    }
    Ok(())
}

// =============================================================================
// VALIDATE COMMAND
// =============================================================================

/// Outcome of validating a workflow.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub stage_count: usize,
    pub alias_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationReport {
    /// Validate `workflow` by building its index.
    #[must_use]
    pub fn build(workflow: &Workflow) -> Self {
        Self::from_index(workflow, &WorkflowIndex::build(workflow))
    }

    fn from_index(workflow: &Workflow, index: &Result<WorkflowIndex, StagingError>) -> Self {
        match index {
            Ok(index) => Self {
                valid: true,
                stage_count: index.stage_count(),
                alias_count: index.alias_count(),
                error: None,
            },
            Err(e) => Self {
                valid: false,
                stage_count: workflow.len(),
                alias_count: 0,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Validate a workflow file; fails with the configuration error if invalid.
pub fn cmd_validate(workflow_path: &Path, output: OutputMode) -> Result<(), StagingError> {
    tracing::info!("Validating workflow {:?}", workflow_path);

    let workflow = load_workflow(workflow_path)?;
    let index = WorkflowIndex::build(&workflow);
    let report = ValidationReport::from_index(&workflow, &index);

    if output.json {
        print_json(&report);
    } else if report.valid {
        println!(
            "Workflow OK: {} stages, {} aliases",
            report.stage_count, report.alias_count
        );
    }

    index.map(|_| ())
}

// =============================================================================
// STAGES COMMAND
// =============================================================================

/// One stage in a [`StagesReport`].
#[derive(Debug, Clone, Serialize)]
pub struct StageEntry {
    pub index: usize,
    pub name: String,
    pub aliases: Vec<String>,
}

/// A workflow's stages with their seeding flags.
#[derive(Debug, Clone, Serialize)]
pub struct StagesReport {
    pub stages: Vec<StageEntry>,
    pub creates_in_first_stage: bool,
    pub resolves_in_last_stage: bool,
}

impl StagesReport {
    /// Describe `workflow`; fails if it is ill-formed.
    pub fn build(workflow: &Workflow) -> Result<Self, StagingError> {
        let index = WorkflowIndex::build(workflow)?;
        let stages = workflow
            .stages()
            .iter()
            .enumerate()
            .map(|(index, stage)| StageEntry {
                index,
                name: stage.name.clone(),
                aliases: stage.aliases.clone(),
            })
            .collect();

        Ok(Self {
            stages,
            creates_in_first_stage: index.creates_in_first_stage(),
            resolves_in_last_stage: index.resolves_in_last_stage(),
        })
    }

    #[must_use]
    pub fn render_text(&self, quiet: bool) -> String {
        let mut out = String::new();
        if !quiet {
            let _ = writeln!(out, "Workflow stages");
            let _ = writeln!(out, "===============");
        }
        for stage in &self.stages {
            let _ = writeln!(
                out,
                "{:>3}  {}: {}",
                stage.index,
                stage.name,
                stage.aliases.join(", ")
            );
        }
        let _ = writeln!(
            out,
            "Seed first stage from creation date:   {}",
            yes_no(self.creates_in_first_stage)
        );
        let _ = writeln!(
            out,
            "Seed closed stage from resolution date: {}",
            yes_no(self.resolves_in_last_stage)
        );
        out
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Print a workflow's stages in order.
pub fn cmd_stages(workflow_path: &Path, output: OutputMode) -> Result<(), StagingError> {
    tracing::info!("Listing stages of {:?}", workflow_path);

    let workflow = load_workflow(workflow_path)?;
    let report = StagesReport::build(&workflow)?;

    if output.json {
        print_json(&report);
    } else {
        print!("{}", report.render_text(output.quiet));
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
