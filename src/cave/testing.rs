//! In-memory cave store for tests

use super::store::{CaveStore, StoreError, StoreResult};
use super::types::{Cave, CaveUpdate};

use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryCaveStore {
    caves: Mutex<HashMap<String, Cave>>,
    saves: Mutex<Vec<(String, CaveUpdate)>>,
}

impl MemoryCaveStore {
    pub fn with(cave: Cave) -> Self {
        let store = Self::default();
        store.put(cave);
        store
    }

    pub fn put(&self, cave: Cave) {
        self.caves.lock().unwrap().insert(cave.id.clone(), cave);
    }

    /// Every partial update received through `save`, in order
    pub fn saves(&self) -> Vec<(String, CaveUpdate)> {
        self.saves.lock().unwrap().clone()
    }
}

impl CaveStore for MemoryCaveStore {
    fn get(&self, id: &str) -> StoreResult<Cave> {
        self.caves
            .lock()
            .map_err(|_| StoreError::Poisoned)?
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    fn save(&self, id: &str, update: CaveUpdate) -> StoreResult<()> {
        let mut caves = self.caves.lock().map_err(|_| StoreError::Poisoned)?;
        let cave = caves
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        self.saves.lock().unwrap().push((id.to_string(), update.clone()));
        update.apply(cave);
        Ok(())
    }

    fn add_seconds_run(&self, id: &str, secs: u64, touched_at: u64) -> StoreResult<u64> {
        let mut caves = self.caves.lock().map_err(|_| StoreError::Poisoned)?;
        let cave = caves
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        cave.seconds_run += secs;
        cave.last_touched = Some(touched_at);
        Ok(cave.seconds_run)
    }
}
