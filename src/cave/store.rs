//! Persistent cave store abstraction

use super::types::{Cave, CaveUpdate};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cave {id} not found")]
    NotFound { id: String },
    #[error("invalid cave id '{id}'")]
    InvalidId { id: String },
    #[error("cave store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed cave record: {0}")]
    Format(#[from] serde_yaml::Error),
    #[error("cave store lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Where cave records live. Shared between the launch flow and the playtime
/// ticker thread, hence `Send + Sync`.
pub trait CaveStore: Send + Sync {
    fn get(&self, id: &str) -> StoreResult<Cave>;

    /// Upsert the given fields of a cave record
    fn save(&self, id: &str, update: CaveUpdate) -> StoreResult<()>;

    /// Atomically add `secs` to the recorded playtime and set `last_touched`.
    /// Returns the new total.
    fn add_seconds_run(&self, id: &str, secs: u64, touched_at: u64) -> StoreResult<u64>;
}
