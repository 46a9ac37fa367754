//! Conversation turns and the key that scopes a chat history.
//!
//! A history is identified by (class, student, project-or-general). Keys are
//! derived deterministically, and two different scopes never render to the
//! same key: the general scope renders as `general` while a project renders
//! as `project=<id>`, so a project literally named "general" stays separate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const GENERAL: &str = "general";
const PROJECT_PREFIX: &str = "project=";

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// A single message in a stored conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
            timestamp,
        }
    }

    pub fn assistant(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
            timestamp,
        }
    }
}

/// The project half of a conversation key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConversationScope {
    General,
    Project(String),
}

impl ConversationScope {
    pub fn from_project(project_id: Option<&str>) -> Self {
        match project_id {
            Some(id) => Self::Project(id.to_string()),
            None => Self::General,
        }
    }

    pub fn project_id(&self) -> Option<&str> {
        match self {
            Self::General => None,
            Self::Project(id) => Some(id),
        }
    }
}

/// Compound key of one chat history.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConversationKey {
    pub class_id: String,
    pub student_id: String,
    pub scope: ConversationScope,
}

impl ConversationKey {
    pub fn new(class_id: &str, student_id: &str, project_id: Option<&str>) -> Self {
        Self {
            class_id: class_id.to_string(),
            student_id: student_id.to_string(),
            scope: ConversationScope::from_project(project_id),
        }
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            ConversationScope::General => {
                write!(f, "{}:{}:{GENERAL}", self.class_id, self.student_id)
            }
            ConversationScope::Project(id) => {
                write!(f, "{}:{}:{PROJECT_PREFIX}{id}", self.class_id, self.student_id)
            }
        }
    }
}

/// Parses the `Display` form.
///
/// Class and student ids must not contain `:`. Ids from [`crate::RandomIds`]
/// never do; a project id may, as the scope is the remainder of the key.
impl FromStr for ConversationKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let (Some(class_id), Some(student_id), Some(scope)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(format!("malformed conversation key: {s}"));
        };

        let scope = if scope == GENERAL {
            ConversationScope::General
        } else if let Some(id) = scope.strip_prefix(PROJECT_PREFIX) {
            ConversationScope::Project(id.to_string())
        } else {
            return Err(format!("malformed conversation scope: {scope}"));
        };

        Ok(Self {
            class_id: class_id.to_string(),
            student_id: student_id.to_string(),
            scope,
        })
    }
}

// Keys are JSON object keys in the persisted tree, so they travel as strings.
impl Serialize for ConversationKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ConversationKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_deterministic() {
        let a = ConversationKey::new("c1", "s1", Some("p1"));
        let b = ConversationKey::new("c1", "s1", Some("p1"));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn general_and_project_named_general_differ() {
        let general = ConversationKey::new("c1", "s1", None);
        let named = ConversationKey::new("c1", "s1", Some("general"));
        assert_ne!(general, named);
        assert_ne!(general.to_string(), named.to_string());
    }

    #[test]
    fn different_projects_differ() {
        let a = ConversationKey::new("c1", "s1", Some("p1"));
        let b = ConversationKey::new("c1", "s1", Some("p2"));
        assert_ne!(a.to_string(), b.to_string());
    }

    #[test]
    fn key_parses_back() {
        for key in [
            ConversationKey::new("c1", "s1", None),
            ConversationKey::new("c1", "s1", Some("p:with:colons")),
        ] {
            let parsed: ConversationKey = key.to_string().parse().unwrap();
            assert_eq!(parsed, key);
        }
    }

    #[test]
    fn malformed_key_rejected() {
        assert!("c1:s1".parse::<ConversationKey>().is_err());
        assert!("c1:s1:other".parse::<ConversationKey>().is_err());
    }

    #[test]
    fn colon_in_class_or_student_id_does_not_parse_back() {
        let key = ConversationKey::new("c:1", "s1", None);
        assert_eq!(key.to_string(), "c:1:s1:general");
        assert!(key.to_string().parse::<ConversationKey>().is_err());

        let key = ConversationKey::new("c1", "s:1", Some("p1"));
        assert!(key.to_string().parse::<ConversationKey>().is_err());
    }
}
