//! Project records: a named, persisted ordered block list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::block::Block;
use crate::{Error, Result};

/// A stored project. Ids are assigned by the store, monotonically increasing
/// per store instance and never reused within its lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default, deserialize_with = "blocks_or_empty")]
    pub blocks: Vec<Block>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// A record whose block list is absent or malformed still loads; the block
// list defaults to empty rather than failing the read.
fn blocks_or_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Block>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match serde_json::from_value(value) {
        Ok(blocks) => Ok(blocks),
        Err(err) => {
            log::warn!("Discarding malformed block list: {err}");
            Ok(Vec::new())
        }
    }
}

/// Payload for creating a project. Name validation is the caller's duty,
/// not the store's; callers that accept untrusted input should run
/// [`ProjectDraft::validate`] first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl ProjectDraft {
    pub fn new(name: impl Into<String>) -> Self {
        ProjectDraft {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Require a non-empty name after trimming.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidProject(
                "name must be non-empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Partial update: `None` leaves a field untouched. For the nullable fields
/// the outer option marks presence and the inner option carries the new
/// value, so a patch can also clear them.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub user_id: Option<Option<i64>>,
    pub blocks: Option<Vec<Block>>,
}

impl ProjectPatch {
    /// Patch that replaces only the block list.
    pub fn blocks(blocks: Vec<Block>) -> Self {
        ProjectPatch {
            blocks: Some(blocks),
            ..Default::default()
        }
    }

    /// Merge the supplied fields over `project`. Timestamps are the store's
    /// concern and are not touched here.
    pub(crate) fn apply(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(user_id) = self.user_id {
            project.user_id = user_id;
        }
        if let Some(blocks) = self.blocks {
            project.blocks = blocks;
        }
    }
}
