//! Issue input records, shaped after the Jira REST issue payload
//! (`expand=changelog`). Only the fields staging needs are modelled;
//! unknown keys are ignored on deserialization.

use serde::{Deserialize, Deserializer, Serialize};

/// Read an explicit `null` as the type's default, same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A tracked work item with its change history.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Issue {
    /// Issue key (e.g. `PROJ-42`), used for display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Issue metadata.
    pub fields: IssueFields,
    /// Change history. Absent or null in payloads fetched without the changelog.
    #[serde(default, deserialize_with = "null_as_default")]
    pub changelog: Changelog,
}

/// The subset of issue fields used for staging.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IssueFields {
    /// Creation timestamp (ISO-8601).
    pub created: String,
    /// Current status.
    #[serde(default)]
    pub status: Option<IssueStatus>,
    /// Resolution timestamp (ISO-8601), if resolved.
    #[serde(default)]
    pub resolutiondate: Option<String>,
}

/// Current status of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IssueStatus {
    #[serde(default)]
    pub name: Option<String>,
}

/// Ordered list of history entries. Order is NOT guaranteed chronological.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Changelog {
    #[serde(default, deserialize_with = "null_as_default")]
    pub histories: Vec<History>,
}

/// One changelog entry: a timestamp and the field changes made at that time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct History {
    /// When the changes happened (ISO-8601).
    pub created: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<HistoryItem>,
}

/// One field change inside a history entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Changed field name (`status`, `Epic Status`, ...).
    pub field: String,
    /// Field type tag (`jira`, `custom`).
    #[serde(default)]
    pub fieldtype: Option<String>,
    /// Raw previous value (often an id).
    #[serde(default, rename = "from")]
    pub from_id: Option<String>,
    /// Human-readable previous value.
    #[serde(default, rename = "fromString")]
    pub from_name: Option<String>,
    /// Raw new value (often an id).
    #[serde(default, rename = "to")]
    pub to_id: Option<String>,
    /// Human-readable new value. This is the stage alias.
    #[serde(default, rename = "toString")]
    pub to_name: Option<String>,
}

impl Issue {
    /// Create an issue created at `created` with no status and no history.
    #[must_use]
    pub fn new(created: impl Into<String>) -> Self {
        Self {
            fields: IssueFields {
                created: created.into(),
                ..IssueFields::default()
            },
            ..Self::default()
        }
    }

    /// Set the issue key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the current status name.
    #[must_use]
    pub fn with_status(mut self, name: impl Into<String>) -> Self {
        self.fields.status = Some(IssueStatus {
            name: Some(name.into()),
        });
        self
    }

    /// Set the resolution timestamp.
    #[must_use]
    pub fn with_resolution(mut self, resolved: impl Into<String>) -> Self {
        self.fields.resolutiondate = Some(resolved.into());
        self
    }

    /// Append a history entry.
    #[must_use]
    pub fn with_history(mut self, created: impl Into<String>, items: Vec<HistoryItem>) -> Self {
        self.changelog.histories.push(History {
            created: created.into(),
            items,
        });
        self
    }

    /// Current status name, if both the status and its name are present.
    #[must_use]
    pub fn status_name(&self) -> Option<&str> {
        self.fields.status.as_ref()?.name.as_deref()
    }
}

impl HistoryItem {
    /// A standard status transition to `to`.
    #[must_use]
    pub fn status(to: impl Into<String>) -> Self {
        Self {
            field: crate::primitives::STATUS_FIELD.to_string(),
            fieldtype: Some("jira".to_string()),
            to_name: Some(to.into()),
            ..Self::default()
        }
    }

    /// A custom-field transition of `field` to `to`.
    #[must_use]
    pub fn custom(field: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            fieldtype: Some(crate::primitives::CUSTOM_FIELD_TYPE.to_string()),
            to_name: Some(to.into()),
            ..Self::default()
        }
    }
}
