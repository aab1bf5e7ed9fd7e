//! Shared store test utilities.

use tablebook::{ReservationStore, StoreConfig};
use tempfile::TempDir;

/// Opens a store in a fresh temporary data directory.
///
/// The directory lives as long as the returned `TempDir`.
#[allow(dead_code)]
pub fn create_test_store() -> (TempDir, ReservationStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = ReservationStore::open(StoreConfig::in_data_dir(dir.path())).unwrap();
    (dir, store)
}

/// Opens another handle on the store inside `dir`.
#[allow(dead_code)]
pub fn reopen(dir: &TempDir) -> ReservationStore {
    ReservationStore::open(StoreConfig::in_data_dir(dir.path())).unwrap()
}
