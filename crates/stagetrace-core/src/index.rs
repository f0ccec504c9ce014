//! # Workflow Index
//!
//! Alias → stage position lookup, built once per workflow.
//!
//! - Every alias maps to exactly one stage
//! - Seeding markers configure behaviour and are not entered as aliases
//! - Immutable after construction; safe to share across threads

use crate::primitives::{CREATED_MARKER, RESOLVED_MARKER, is_marker};
use crate::{StagingError, Workflow};
use std::collections::BTreeMap;

/// Read-only lookup from alias name to stage index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowIndex {
    /// Alias -> stage index (0-based, declaration order).
    aliases: BTreeMap<String, usize>,
    /// Stage names in declaration order.
    stage_names: Vec<String>,
    creates_in_first_stage: bool,
    resolves_in_last_stage: bool,
}

impl WorkflowIndex {
    /// Build the index for `workflow`.
    ///
    /// # Errors
    /// - `StagingError::EmptyWorkflow` if the workflow declares no stages
    /// - `StagingError::EmptyStage` if a stage declares no aliases
    /// - `StagingError::DuplicateAlias` if two stages declare the same alias
    pub fn build(workflow: &Workflow) -> Result<Self, StagingError> {
        let stages = workflow.stages();
        let (Some(first), Some(last)) = (stages.first(), stages.last()) else {
            return Err(StagingError::EmptyWorkflow);
        };

        let mut aliases: BTreeMap<String, usize> = BTreeMap::new();
        for (index, stage) in stages.iter().enumerate() {
            if stage.aliases.is_empty() {
                return Err(StagingError::EmptyStage(stage.name.clone()));
            }

            for alias in stage.aliases.iter().filter(|a| !is_marker(a)) {
                match aliases.get(alias) {
                    // Repeating an alias inside one stage is harmless.
                    Some(&existing) if existing == index => {}
                    Some(&existing) => {
                        return Err(StagingError::DuplicateAlias {
                            alias: alias.clone(),
                            first: stages[existing].name.clone(),
                            second: stage.name.clone(),
                        });
                    }
                    None => {
                        aliases.insert(alias.clone(), index);
                    }
                }
            }
        }

        Ok(Self {
            aliases,
            stage_names: stages.iter().map(|s| s.name.clone()).collect(),
            creates_in_first_stage: first.has_alias(CREATED_MARKER),
            resolves_in_last_stage: last.has_alias(RESOLVED_MARKER),
        })
    }

    /// Stage index for `alias`, if declared.
    #[must_use]
    pub fn stage_of(&self, alias: &str) -> Option<usize> {
        self.aliases.get(alias).copied()
    }

    /// True if the first stage is seeded with the creation date.
    #[must_use]
    pub fn creates_in_first_stage(&self) -> bool {
        self.creates_in_first_stage
    }

    /// True if the closing stage is seeded with the resolution date.
    #[must_use]
    pub fn resolves_in_last_stage(&self) -> bool {
        self.resolves_in_last_stage
    }

    /// Number of stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stage_names.len()
    }

    /// Stage names in declaration order.
    #[must_use]
    pub fn stage_names(&self) -> &[String] {
        &self.stage_names
    }

    /// Number of distinct aliases (markers excluded).
    #[must_use]
    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }
}
