//! No-op store — keeps nothing between runs.

use eduassist_core::error::StoreError;
use eduassist_core::persistence::Persistence;
use eduassist_core::store::DataStore;

/// A store that never has data and discards every save.
pub struct NoopStore;

impl Persistence for NoopStore {
    fn name(&self) -> &str {
        "none"
    }

    fn load(&self) -> Result<Option<DataStore>, StoreError> {
        Ok(None)
    }

    fn save(&self, _store: &DataStore) -> Result<(), StoreError> {
        Ok(())
    }
}
