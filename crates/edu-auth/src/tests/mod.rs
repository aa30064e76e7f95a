mod file_storage;

use crate::{MemoryStorage, TokenStore};

use edu_core::ManualClock;

use std::sync::Arc;

use chrono::{DateTime, Utc};

pub(crate) const START_MILLIS: i64 = 1_700_000_000_000;

pub(crate) fn start() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(START_MILLIS).unwrap()
}

/// Token store over memory storage with a clock the test controls
pub(crate) fn memory_store() -> (TokenStore, Arc<MemoryStorage>, Arc<ManualClock>) {
    let storage = Arc::new(MemoryStorage::new());
    let clock = Arc::new(ManualClock::new(start()));
    let store = TokenStore::new(storage.clone(), clock.clone());
    (store, storage, clock)
}
