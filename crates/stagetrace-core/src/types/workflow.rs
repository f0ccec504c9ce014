//! Workflow configuration: an ordered list of stages and their aliases.

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One named phase of a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStage {
    /// Display name of the stage.
    pub name: String,
    /// Raw status/field values that mean "the issue is in this stage".
    /// May include the `(Created)` / `(Resolved)` seeding markers.
    pub aliases: Vec<String>,
}

impl WorkflowStage {
    /// Create a stage from a name and its aliases.
    #[must_use]
    pub fn new<S: Into<String>>(name: impl Into<String>, aliases: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }

    /// True if the stage lists `alias` verbatim.
    #[must_use]
    pub fn has_alias(&self, alias: &str) -> bool {
        self.aliases.iter().any(|a| a == alias)
    }
}

/// An ordered workflow definition.
///
/// Stage order is declaration order and defines stage indices `0..N`.
///
/// Deserializes from either an ordered map (`{"To Do": ["(Created)"], ...}`),
/// where document key order is the stage order, or from a sequence of
/// `{ name, aliases }` records. Serializes as the ordered map form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Workflow {
    stages: Vec<WorkflowStage>,
}

impl Workflow {
    /// Create an empty workflow.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage and return the workflow (builder style).
    #[must_use]
    pub fn with_stage<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        aliases: impl IntoIterator<Item = S>,
    ) -> Self {
        self.stages.push(WorkflowStage::new(name, aliases));
        self
    }

    /// Stages in declaration order.
    #[must_use]
    pub fn stages(&self) -> &[WorkflowStage] {
        &self.stages
    }

    /// Number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// True if no stages are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl From<Vec<WorkflowStage>> for Workflow {
    fn from(stages: Vec<WorkflowStage>) -> Self {
        Self { stages }
    }
}

impl Serialize for Workflow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.stages.len()))?;
        for stage in &self.stages {
            map.serialize_entry(&stage.name, &stage.aliases)?;
        }
        map.end()
    }
}

struct WorkflowVisitor;

impl<'de> Visitor<'de> for WorkflowVisitor {
    type Value = Workflow;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of stage name to aliases, or a list of {name, aliases} stages")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Workflow, A::Error> {
        let mut stages: Vec<WorkflowStage> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, aliases)) = access.next_entry::<String, Vec<String>>()? {
            if stages.iter().any(|s| s.name == name) {
                return Err(de::Error::custom(format!("duplicate stage name '{}'", name)));
            }
            stages.push(WorkflowStage { name, aliases });
        }
        Ok(Workflow { stages })
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Workflow, A::Error> {
        let mut stages = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(stage) = access.next_element::<WorkflowStage>()? {
            stages.push(stage);
        }
        Ok(Workflow { stages })
    }
}

impl<'de> Deserialize<'de> for Workflow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(WorkflowVisitor)
    }
}
