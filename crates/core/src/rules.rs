//! Layered assistant rules: global, per class, per project.
//!
//! Rules compose by specificity and are additive: a prompt carries the
//! global block, then the class block, then the project block, each present
//! only when non-empty. An empty string means "no override".

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub global: String,

    /// Class id → rule text
    #[serde(default)]
    pub classes: BTreeMap<String, String>,

    /// Project id → rule text
    #[serde(default)]
    pub projects: BTreeMap<String, String>,
}

impl RuleSet {
    pub fn global_rule(&self) -> Option<&str> {
        non_empty(&self.global)
    }

    pub fn class_rule(&self, class_id: &str) -> Option<&str> {
        self.classes.get(class_id).and_then(|r| non_empty(r))
    }

    pub fn project_rule(&self, project_id: &str) -> Option<&str> {
        self.projects.get(project_id).and_then(|r| non_empty(r))
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}
