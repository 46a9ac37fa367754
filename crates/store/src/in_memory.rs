//! In-memory store — useful for testing and ephemeral sessions.

use eduassist_core::error::StoreError;
use eduassist_core::persistence::Persistence;
use eduassist_core::store::DataStore;
use std::sync::Mutex;

/// Keeps the last saved snapshot in memory and counts saves.
#[derive(Default)]
pub struct InMemoryStore {
    snapshot: Mutex<Option<DataStore>>,
    saves: Mutex<usize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already saved tree.
    pub fn with_data(store: DataStore) -> Self {
        Self {
            snapshot: Mutex::new(Some(store)),
            saves: Mutex::new(0),
        }
    }

    /// The most recently saved tree.
    pub fn snapshot(&self) -> Option<DataStore> {
        self.snapshot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// How many times `save` was called.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Persistence for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    fn load(&self) -> Result<Option<DataStore>, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, store: &DataStore) -> Result<(), StoreError> {
        *self.snapshot.lock().unwrap_or_else(|e| e.into_inner()) = Some(store.clone());
        *self.saves.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}
