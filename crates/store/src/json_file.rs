//! JSON file store — the whole data tree in one pretty-printed file.
//!
//! Storage location: `~/.eduassist/data.json` unless configured otherwise.
//! The file is rewritten in full on every save; keys are camelCase so the
//! file stays human-inspectable.

use eduassist_core::error::StoreError;
use eduassist_core::persistence::Persistence;
use eduassist_core::store::DataStore;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by `path`. Nothing is read until [`load`](Persistence::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persistence for JsonFileStore {
    fn name(&self) -> &str {
        "json_file"
    }

    fn load(&self) -> Result<Option<DataStore>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No data file yet");
                return Ok(None);
            }
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    reason: e.to_string(),
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        let store: DataStore = serde_json::from_str(&content).map_err(|e| StoreError::Parse {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        debug!(
            path = %self.path.display(),
            classes = store.classes.len(),
            knowledge = store.knowledge.len(),
            "Data file loaded"
        );
        Ok(Some(store))
    }

    fn save(&self, store: &DataStore) -> Result<(), StoreError> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| StoreError::Write {
                    path: self.path.clone(),
                    reason: format!("Failed to create data directory: {e}"),
                })?;
            }
        }

        let content = serde_json::to_string_pretty(store)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;

        std::fs::write(&self.path, content).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use eduassist_core::{
        ActivityEntry, ActivityKind, Class, ConversationKey, ConversationTurn, KnowledgeItem,
        Project,
    };

    fn sample_store() -> DataStore {
        let at = Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap();
        let mut store = DataStore::new();
        store.classes.push(Class {
            id: "c1".into(),
            name: "AP Biology".into(),
            subject: "Biology".into(),
            grade: "11".into(),
            description: String::new(),
            code: "DEMO42".into(),
            created_at: at,
        });
        store.projects.push(Project {
            id: "p1".into(),
            class_id: "c1".into(),
            name: "Cell Structure Research Paper".into(),
            due_date: NaiveDate::from_ymd_opt(2026, 3, 15),
            description: String::new(),
            created_at: at,
        });
        store.knowledge.push(KnowledgeItem {
            id: "k1".into(),
            class_id: "c1".into(),
            project_id: Some("p1".into()),
            question: "When is the paper due?".into(),
            answer: "March 15".into(),
            tags: vec!["deadline".into()],
            created_at: at,
        });
        store.rules.global = "Be encouraging".into();
        store.rules.projects.insert("p1".into(), "Cite sources".into());
        store.conversations.insert(
            ConversationKey::new("c1", "s1", Some("p1")),
            vec![
                ConversationTurn::user("When is it due?", at),
                ConversationTurn::assistant("March 15", at),
            ],
        );
        store.activity.push(ActivityEntry {
            kind: ActivityKind::KnowledgeAdded,
            class_id: "c1".into(),
            timestamp: at,
        });
        store
    }

    #[test]
    fn save_then_load_yields_equal_tree() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let store = sample_store();

        let backend = JsonFileStore::new(&path);
        backend.save(&store).unwrap();

        // A fresh backend on the same file sees the same tree
        let loaded = JsonFileStore::new(&path).load().unwrap().unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn file_uses_camel_case_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        JsonFileStore::new(&path).save(&sample_store()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"classId\""));
        assert!(content.contains("\"dueDate\": \"2026-03-15\""));
        assert!(content.contains("c1:s1:project=p1"));
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileStore::new(dir.path().join("absent.json"));
        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("data.json");
        JsonFileStore::new(&path).save(&DataStore::new()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn corrupted_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{ this is not json").unwrap();
        assert!(matches!(
            JsonFileStore::new(&path).load(),
            Err(StoreError::Parse { .. })
        ));
    }

    #[test]
    fn partial_tree_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, r#"{"rules": {"global": "Be kind"}}"#).unwrap();

        let store = JsonFileStore::new(&path).load().unwrap().unwrap();
        assert!(store.classes.is_empty());
        assert_eq!(store.rules.global_rule(), Some("Be kind"));
    }
}
