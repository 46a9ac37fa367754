//! The `Classroom` itself: the data tree and its collaborators.

use eduassist_assistant::{ChatSettings, InFlight};
use eduassist_config::AppConfig;
use eduassist_core::{
    Clock, DEFAULT_ACTIVITY_CAP, DataStore, IdSource, Persistence, Provider, RandomIds,
    StoreError, SystemClock,
};
use eduassist_store::JsonFileStore;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{info, warn};

use crate::demo;

/// Owns the data tree. Cheap to share behind an `Arc`.
///
/// Locks on the tree are short and never span the remote assistant call.
pub struct Classroom {
    pub(crate) data: RwLock<DataStore>,
    pub(crate) persistence: Arc<dyn Persistence>,
    pub(crate) provider: Option<Arc<dyn Provider>>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) ids: Arc<dyn IdSource>,
    pub(crate) settings: ChatSettings,
    pub(crate) activity_cap: usize,
    pub(crate) in_flight: InFlight,
}

impl Classroom {
    pub fn builder(persistence: Arc<dyn Persistence>) -> ClassroomBuilder {
        ClassroomBuilder::new(persistence)
    }

    /// Open the classroom described by `config`: JSON file persistence at
    /// the configured path, the configured provider if an API key is set.
    pub fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        let path = config.storage.resolved_path();
        Self::builder(Arc::new(JsonFileStore::new(path)))
            .with_provider(eduassist_providers::build_from_config(config))
            .with_settings(ChatSettings::from_config(&config.assistant))
            .with_activity_cap(config.activity.max_entries)
            .seed_demo_data(config.seed_demo_data)
            .open()
    }

    /// Read access to the whole tree.
    pub async fn snapshot(&self) -> RwLockReadGuard<'_, DataStore> {
        self.data.read().await
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn persistence_name(&self) -> &str {
        self.persistence.name()
    }

    /// Write the tree. Failures are logged, never returned.
    pub(crate) fn persist(&self, store: &DataStore) {
        save_or_warn(self.persistence.as_ref(), store);
    }

    /// A class code no existing class uses.
    pub(crate) fn unique_class_code(&self, store: &DataStore) -> String {
        loop {
            let code = self.ids.new_class_code();
            if store.class_by_code(&code).is_none() {
                return code;
            }
        }
    }
}

/// Configures and opens a [`Classroom`].
pub struct ClassroomBuilder {
    persistence: Arc<dyn Persistence>,
    provider: Option<Arc<dyn Provider>>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdSource>,
    settings: ChatSettings,
    activity_cap: usize,
    seed_demo_data: bool,
}

impl ClassroomBuilder {
    pub fn new(persistence: Arc<dyn Persistence>) -> Self {
        Self {
            persistence,
            provider: None,
            clock: Arc::new(SystemClock),
            ids: Arc::new(RandomIds),
            settings: ChatSettings::default(),
            activity_cap: DEFAULT_ACTIVITY_CAP,
            seed_demo_data: false,
        }
    }

    /// The remote assistant. `None` answers every question locally.
    pub fn with_provider(mut self, provider: Option<Arc<dyn Provider>>) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_ids(mut self, ids: Arc<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_settings(mut self, settings: ChatSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_activity_cap(mut self, cap: usize) -> Self {
        self.activity_cap = cap.max(1);
        self
    }

    /// Seed the demo class when the loaded tree has no classes.
    pub fn seed_demo_data(mut self, seed: bool) -> Self {
        self.seed_demo_data = seed;
        self
    }

    /// Load the tree from persistence and build the classroom.
    pub fn open(self) -> Result<Classroom, StoreError> {
        let loaded = self.persistence.load()?;
        let had_data = loaded.is_some();
        let mut store = loaded.unwrap_or_default();

        let seeded = self.seed_demo_data && store.is_empty();
        if seeded {
            demo::seed(&mut store, self.clock.as_ref(), self.ids.as_ref());
            save_or_warn(self.persistence.as_ref(), &store);
        }

        info!(
            backend = self.persistence.name(),
            had_data,
            seeded,
            classes = store.classes.len(),
            remote = self.provider.is_some(),
            "Classroom opened"
        );

        Ok(Classroom {
            data: RwLock::new(store),
            persistence: self.persistence,
            provider: self.provider,
            clock: self.clock,
            ids: self.ids,
            settings: self.settings,
            activity_cap: self.activity_cap,
            in_flight: InFlight::new(),
        })
    }
}

fn save_or_warn(persistence: &dyn Persistence, store: &DataStore) {
    if let Err(e) = persistence.save(store) {
        warn!(backend = persistence.name(), error = %e, "Failed to save data");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{SequentialIds, fixed_clock};
    use eduassist_store::InMemoryStore;

    #[tokio::test]
    async fn empty_store_is_seeded_and_saved() {
        let persistence = Arc::new(InMemoryStore::new());
        let classroom = Classroom::builder(persistence.clone())
            .with_clock(fixed_clock())
            .with_ids(Arc::new(SequentialIds::default()))
            .seed_demo_data(true)
            .open()
            .unwrap();

        let store = classroom.snapshot().await;
        assert_eq!(store.classes.len(), 1);
        assert_eq!(store.classes[0].code, "DEMO42");
        assert_eq!(persistence.save_count(), 1);
        assert_eq!(persistence.snapshot().as_ref(), Some(&*store));
    }

    #[tokio::test]
    async fn existing_data_is_not_reseeded() {
        let mut existing = DataStore::new();
        existing.rules.global = "Keep it short".into();
        existing.classes.push(eduassist_core::Class {
            id: "c1".into(),
            name: "Chemistry".into(),
            subject: "Science".into(),
            grade: String::new(),
            description: String::new(),
            code: "CHEM22".into(),
            created_at: chrono::Utc::now(),
        });
        let persistence = Arc::new(InMemoryStore::with_data(existing.clone()));

        let classroom = Classroom::builder(persistence.clone())
            .seed_demo_data(true)
            .open()
            .unwrap();

        assert_eq!(*classroom.snapshot().await, existing);
        assert_eq!(persistence.save_count(), 0);
    }

    #[tokio::test]
    async fn seeding_disabled_starts_empty() {
        let classroom = Classroom::builder(Arc::new(InMemoryStore::new()))
            .open()
            .unwrap();
        assert!(classroom.snapshot().await.is_empty());
        assert!(!classroom.has_provider());
    }

    #[test]
    fn class_code_collisions_are_redrawn() {
        let ids = SequentialIds::with_codes(&["DEMO42", "DEMO42", "ABCDEF"]);
        let classroom = Classroom::builder(Arc::new(InMemoryStore::new()))
            .with_ids(Arc::new(ids))
            .open()
            .unwrap();

        let mut store = DataStore::new();
        store.classes.push(eduassist_core::Class {
            id: "c1".into(),
            name: "Demo".into(),
            subject: "Demo".into(),
            grade: String::new(),
            description: String::new(),
            code: "DEMO42".into(),
            created_at: chrono::Utc::now(),
        });
        assert_eq!(classroom.unique_class_code(&store), "ABCDEF");
    }

    #[tokio::test]
    async fn from_config_opens_json_file_and_seeds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");
        let mut config = AppConfig::default();
        config.storage.data_path = Some(path.clone());

        let classroom = Classroom::from_config(&config).unwrap();
        assert_eq!(classroom.persistence_name(), "json_file");
        assert!(!classroom.has_provider());
        assert!(path.exists());

        let reopened = Classroom::from_config(&config).unwrap();
        assert_eq!(*reopened.snapshot().await, *classroom.snapshot().await);
    }
}
