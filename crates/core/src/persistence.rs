//! Persistence trait — where the data tree lives between runs.
//!
//! The whole [`DataStore`] is loaded once at startup and written back after
//! every mutating operation. Implementations live in `eduassist-store`.

use crate::error::StoreError;
use crate::store::DataStore;

pub trait Persistence: Send + Sync {
    /// A human-readable name for this backend (e.g., "json_file").
    fn name(&self) -> &str;

    /// Load the stored tree. `Ok(None)` means nothing was saved yet.
    fn load(&self) -> Result<Option<DataStore>, StoreError>;

    /// Replace the stored tree with `store`.
    fn save(&self, store: &DataStore) -> Result<(), StoreError>;
}
