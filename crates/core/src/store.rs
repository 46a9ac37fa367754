//! The data tree.
//!
//! One `DataStore` holds everything the application knows. Entities refer to
//! each other by id only; nothing is structurally shared. The whole tree is
//! serialized together on every save.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::activity::ActivityEntry;
use crate::classroom::{Class, Project, Student};
use crate::conversation::{ConversationKey, ConversationTurn};
use crate::knowledge::KnowledgeItem;
use crate::rules::RuleSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataStore {
    #[serde(default)]
    pub classes: Vec<Class>,

    #[serde(default)]
    pub projects: Vec<Project>,

    #[serde(default)]
    pub knowledge: Vec<KnowledgeItem>,

    #[serde(default)]
    pub students: Vec<Student>,

    #[serde(default)]
    pub rules: RuleSet,

    #[serde(default)]
    pub conversations: BTreeMap<ConversationKey, Vec<ConversationTurn>>,

    #[serde(default)]
    pub activity: Vec<ActivityEntry>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn class(&self, id: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.id == id)
    }

    pub fn class_by_code(&self, code: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.code == code)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn knowledge_item(&self, id: &str) -> Option<&KnowledgeItem> {
        self.knowledge.iter().find(|k| k.id == id)
    }

    pub fn knowledge_item_mut(&mut self, id: &str) -> Option<&mut KnowledgeItem> {
        self.knowledge.iter_mut().find(|k| k.id == id)
    }

    /// The stored history for `key`, empty when nothing was said yet.
    pub fn conversation(&self, key: &ConversationKey) -> &[ConversationTurn] {
        self.conversations
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn students_in(&self, class_id: &str) -> impl Iterator<Item = &Student> {
        self.students.iter().filter(move |s| s.class_id == class_id)
    }

    pub fn projects_in(&self, class_id: &str) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(move |p| p.class_id == class_id)
    }
}
