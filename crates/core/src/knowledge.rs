//! Knowledge items — the question/answer pairs teachers curate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single question/answer pair scoped to a class and optionally a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeItem {
    /// Unique item ID
    pub id: String,

    /// Owning class
    pub class_id: String,

    /// Owning project; `None` means the item applies to the whole class
    #[serde(default)]
    pub project_id: Option<String>,

    pub question: String,

    pub answer: String,

    /// Free-form tags, in the order the teacher entered them
    #[serde(default)]
    pub tags: Vec<String>,

    pub created_at: DateTime<Utc>,
}

impl KnowledgeItem {
    /// Whether the item belongs to no project.
    pub fn is_class_wide(&self) -> bool {
        self.project_id.is_none()
    }

    /// Whether the item belongs to exactly `project_id`.
    pub fn in_project(&self, project_id: &str) -> bool {
        self.project_id.as_deref() == Some(project_id)
    }
}

/// Split a comma-separated tag string into trimmed, non-empty tags.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
