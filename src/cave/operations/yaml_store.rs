//! Cave records stored as `<root>/<id>/cave.yaml`

use crate::cave::store::{CaveStore, StoreError, StoreResult};
use crate::cave::types::{Cave, CaveUpdate};

use std::fs::File;
use std::io::BufReader;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

pub struct YamlCaveStore {
    root: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl YamlCaveStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Ids name a single directory under the root; anything that would
    /// resolve elsewhere is rejected
    fn record_path(&self, id: &str) -> StoreResult<PathBuf> {
        let mut components = Path::new(id).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if name == id && !id.contains('\\') => {
                Ok(self.root.join(id).join("cave.yaml"))
            }
            _ => Err(StoreError::InvalidId { id: id.to_string() }),
        }
    }

    fn read(&self, id: &str) -> StoreResult<Cave> {
        let path = self.record_path(id)?;
        if !path.exists() {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        let file = File::open(&path)?;
        let cave: Cave = serde_yaml::from_reader(BufReader::new(file))?;
        Ok(cave)
    }

    fn write(&self, cave: &Cave) -> StoreResult<()> {
        let path = self.record_path(&cave.id)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(cave)?;
        // Write-then-rename so concurrent readers never see a torn record
        let tmp = path.with_extension("yaml.tmp");
        std::fs::write(&tmp, yaml)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Insert or replace a whole record
    #[cfg(test)]
    pub fn put(&self, cave: &Cave) -> StoreResult<()> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        self.write(cave)
    }

    /// Load all valid cave records, sorted by id
    pub fn list(&self) -> Vec<Cave> {
        let mut out = Vec::new();

        let Ok(entries) = std::fs::read_dir(&self.root) else {
            return out;
        };

        for entry in entries.flatten() {
            if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }
            let id = entry.file_name().to_string_lossy().to_string();
            match self.read(&id) {
                Ok(cave) => out.push(cave),
                Err(e) => tracing::warn!("cave - Skipping {}: {}", id, e),
            }
        }
        out.sort_by(|a, b| a.id.cmp(&b.id));
        out
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl CaveStore for YamlCaveStore {
    fn get(&self, id: &str) -> StoreResult<Cave> {
        self.read(id)
    }

    fn save(&self, id: &str, update: CaveUpdate) -> StoreResult<()> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut cave = self.read(id)?;
        update.apply(&mut cave);
        self.write(&cave)
    }

    fn add_seconds_run(&self, id: &str, secs: u64, touched_at: u64) -> StoreResult<u64> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut cave = self.read(id)?;
        cave.seconds_run = cave.seconds_run.saturating_add(secs);
        cave.last_touched = Some(touched_at);
        self.write(&cave)?;
        Ok(cave.seconds_run)
    }
}
