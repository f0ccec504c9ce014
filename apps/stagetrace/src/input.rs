//! # Input Loading
//!
//! Reads workflow and issue files from disk and parses them into core types.
//!
//! ## Formats
//!
//! - Workflow, `.toml`: `[[stages]]` tables with `name` and `aliases`
//! - Workflow, anything else: JSON, either `{"Stage": ["alias", ...]}` in
//!   stage order or `[{"name": ..., "aliases": [...]}]`
//! - Issue: Jira REST issue JSON fetched with `expand=changelog`

use serde::Deserialize;
use stagetrace_core::{Issue, StagingError, Workflow, WorkflowStage};
use std::path::{Path, PathBuf};

/// Maximum input file size (16 MiB).
///
/// Large enough for issues with thousands of changelog entries.
pub const MAX_INPUT_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Workflow format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowFormat {
    Json,
    Toml,
}

impl WorkflowFormat {
    /// `.toml` (any case) selects TOML; everything else is JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => WorkflowFormat::Toml,
            _ => WorkflowFormat::Json,
        }
    }
}

/// TOML workflow document.
///
/// Only the `[[stages]]` array form is accepted: TOML tables carry no key
/// order, so a keyed `[stages]` table cannot express stage order.
#[derive(Debug, Deserialize)]
struct WorkflowFile {
    stages: Vec<WorkflowStage>,
}

/// Validate an input path.
///
/// Canonicalizes the path (resolving `..` and symlinks), requires a regular
/// file and enforces [`MAX_INPUT_FILE_SIZE`].
pub fn validate_input_path(path: &Path) -> Result<PathBuf, StagingError> {
    let canonical = path.canonicalize().map_err(|e| {
        StagingError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    let metadata = std::fs::metadata(&canonical)
        .map_err(|e| StagingError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if !metadata.is_file() {
        return Err(StagingError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    if metadata.len() > MAX_INPUT_FILE_SIZE {
        return Err(StagingError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_INPUT_FILE_SIZE
        )));
    }

    Ok(canonical)
}

fn read_input(path: &Path) -> Result<Vec<u8>, StagingError> {
    let validated = validate_input_path(path)?;
    std::fs::read(&validated).map_err(|e| {
        StagingError::IoError(format!("Cannot read '{}': {}", path.display(), e))
    })
}

/// Parse a JSON workflow document.
pub fn parse_workflow_json(bytes: &[u8]) -> Result<Workflow, StagingError> {
    serde_json::from_slice(bytes)
        .map_err(|e| StagingError::ParseError(format!("Invalid workflow JSON: {}", e)))
}

/// Parse a TOML workflow document.
pub fn parse_workflow_toml(text: &str) -> Result<Workflow, StagingError> {
    toml::from_str::<WorkflowFile>(text)
        .map(|file| Workflow::from(file.stages))
        .map_err(|e| StagingError::ParseError(format!("Invalid workflow TOML: {}", e)))
}

/// Parse a Jira issue JSON document.
pub fn parse_issue_json(bytes: &[u8]) -> Result<Issue, StagingError> {
    serde_json::from_slice(bytes)
        .map_err(|e| StagingError::ParseError(format!("Invalid issue JSON: {}", e)))
}

/// Load a workflow file, picking the format from its extension.
pub fn load_workflow(path: &Path) -> Result<Workflow, StagingError> {
    let bytes = read_input(path)?;
    match WorkflowFormat::from_path(path) {
        WorkflowFormat::Json => parse_workflow_json(&bytes),
        WorkflowFormat::Toml => {
            let text = std::str::from_utf8(&bytes).map_err(|e| {
                StagingError::ParseError(format!("Workflow TOML is not UTF-8: {}", e))
            })?;
            parse_workflow_toml(text)
        }
    }
}

/// Load an issue file.
pub fn load_issue(path: &Path) -> Result<Issue, StagingError> {
    parse_issue_json(&read_input(path)?)
}
