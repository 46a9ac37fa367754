//! Teacher-facing activity log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default cap on the stored activity log.
pub const DEFAULT_ACTIVITY_CAP: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    #[serde(flatten)]
    pub kind: ActivityKind,
    pub class_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityKind {
    StudentJoined {
        #[serde(rename = "studentName")]
        student_name: String,
    },
    ProjectCreated {
        #[serde(rename = "projectName")]
        project_name: String,
    },
    KnowledgeAdded,
}

impl ActivityEntry {
    /// One-line description for the overview feed.
    pub fn describe(&self) -> String {
        match &self.kind {
            ActivityKind::StudentJoined { student_name } => {
                format!("{student_name} joined the class")
            }
            ActivityKind::ProjectCreated { project_name } => {
                format!("Project \"{project_name}\" created")
            }
            ActivityKind::KnowledgeAdded => "New knowledge item added".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_serializes_with_type_tag() {
        let entry = ActivityEntry {
            kind: ActivityKind::StudentJoined {
                student_name: "Ada".into(),
            },
            class_id: "c1".into(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "student_joined");
        assert_eq!(json["studentName"], "Ada");
        assert_eq!(json["classId"], "c1");

        let back: ActivityEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn describe_matches_feed_text() {
        let entry = ActivityEntry {
            kind: ActivityKind::ProjectCreated {
                project_name: "Lab Report".into(),
            },
            class_id: "c1".into(),
            timestamp: Utc::now(),
        };
        assert_eq!(entry.describe(), "Project \"Lab Report\" created");
    }
}
