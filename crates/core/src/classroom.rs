//! Classes, projects and students.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A class a teacher runs. Students join with its 6-character code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: String,
    pub name: String,
    pub subject: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub description: String,
    /// Join code, unique across classes
    pub code: String,
    pub created_at: DateTime<Utc>,
}

/// An assignment or unit inside a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub class_id: String,
    pub name: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// A student who joined a class by code.
///
/// The class name is denormalized at join time, as the chat preamble names
/// the class without a lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub class_code: String,
    pub class_id: String,
    pub class_name: String,
    pub joined_at: DateTime<Utc>,
}
