use crate::config::types::LauncherConfig;
use crate::paths::PATH_DATA;

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub fn load_cfg() -> LauncherConfig {
    load_cfg_from(&PATH_DATA.join("settings.json"))
}

pub fn load_cfg_from(path: &Path) -> LauncherConfig {
    if let Ok(file) = File::open(path) {
        match serde_json::from_reader::<_, LauncherConfig>(BufReader::new(file)) {
            Ok(config) => return config,
            Err(e) => {
                tracing::warn!("config - Ignoring unreadable {}: {}", path.display(), e);
            }
        }
    }

    // Return default settings if file doesn't exist or has error
    LauncherConfig::default()
}

pub fn save_cfg(config: &LauncherConfig) -> Result<(), Box<dyn Error>> {
    save_cfg_to(config, &PATH_DATA.join("settings.json"))
}

pub fn save_cfg_to(config: &LauncherConfig, path: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}
