//! Re-configuration of installed caves
//!
//! Scans an install folder for things that can be launched and records
//! them on the cave, so readiness checks can succeed on the next attempt.

use crate::cave::{Cave, CaveStore, CaveUpdate, LaunchType};
use crate::launch::{BinaryProbe, LaunchError};
use crate::platform::Platform;

use std::path::Path;
use std::sync::Arc;
use walkdir::WalkDir;

/// Deepest folder level searched below the install folder
const MAX_SCAN_DEPTH: usize = 5;

pub trait Configurator {
    fn configure(&self, cave: &Cave) -> Result<(), LaunchError>;
}

/// What a scan of an install folder found, paths relative to it
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanResult {
    pub executables: Vec<String>,
    pub scripts: Vec<String>,
    pub html_index: Option<String>,
}

impl ScanResult {
    pub fn launch_type(&self) -> LaunchType {
        if !self.executables.is_empty() {
            LaunchType::Native
        } else if self.html_index.is_some() {
            LaunchType::Html
        } else if !self.scripts.is_empty() {
            LaunchType::Shell
        } else {
            LaunchType::Native
        }
    }

    pub fn into_update(self) -> CaveUpdate {
        let launch_type = self.launch_type();
        let executables = if launch_type == LaunchType::Shell {
            self.scripts
        } else {
            self.executables
        };
        CaveUpdate {
            launch_type: Some(launch_type),
            executables: Some(executables),
            game_path: Some(self.html_index),
            ..Default::default()
        }
    }
}

fn is_shared_library(name: &str) -> bool {
    name.ends_with(".so") || name.contains(".so.") || name.ends_with(".dylib")
}

fn is_app_bundle(path: &Path) -> bool {
    path.extension().is_some_and(|x| x.eq_ignore_ascii_case("app"))
}

fn is_executable_for(path: &Path, name: &str, platform: Platform, probe: &dyn BinaryProbe) -> bool {
    match platform {
        Platform::Windows => name.ends_with(".exe"),
        Platform::MacOs => {
            name.ends_with(".app") || (!is_shared_library(name) && probe.probe(path).is_mac_executable)
        }
        Platform::Linux => !is_shared_library(name) && probe.probe(path).is_linux_executable,
    }
}

/// Walk `install_dir` looking for launchable files. Shallow entries come
/// first; ties sort by path.
pub fn scan_install(install_dir: &Path, platform: Platform, probe: &dyn BinaryProbe) -> ScanResult {
    let mut executables: Vec<(usize, String)> = Vec::new();
    let mut scripts: Vec<(usize, String)> = Vec::new();
    let mut html: Vec<(usize, String)> = Vec::new();

    let walk = WalkDir::new(install_dir)
        .min_depth(1)
        .max_depth(MAX_SCAN_DEPTH)
        .follow_links(false)
        .into_iter()
        // Don't look inside app bundles
        .filter_entry(|e| !e.path().parent().is_some_and(is_app_bundle));

    for entry in walk.filter_map(|e| e.ok()) {
        let path = entry.path();
        let Ok(rel_path) = path.strip_prefix(install_dir) else {
            continue;
        };
        let Some(filename) = path.file_name().and_then(|f| f.to_str()) else {
            continue;
        };
        let filename_lower = filename.to_lowercase();
        let rel = rel_path.to_string_lossy().to_string();
        let depth = entry.depth();

        if entry.file_type().is_dir() {
            if platform == Platform::MacOs && filename_lower.ends_with(".app") {
                executables.push((depth, rel));
            }
            continue;
        }

        if filename_lower == "index.html" {
            html.push((depth, rel));
        } else if filename_lower.ends_with(".sh") {
            scripts.push((depth, rel));
        } else if is_executable_for(path, &filename_lower, platform, probe) {
            executables.push((depth, rel));
        }
    }

    executables.sort();
    scripts.sort();
    html.sort();

    ScanResult {
        executables: executables.into_iter().map(|(_, p)| p).collect(),
        scripts: scripts.into_iter().map(|(_, p)| p).collect(),
        html_index: html.into_iter().next().map(|(_, p)| p),
    }
}

/// Configurator that scans the install folder and saves the result
pub struct ScanConfigurator {
    store: Arc<dyn CaveStore>,
    probe: Box<dyn BinaryProbe>,
    platform: Platform,
}

impl ScanConfigurator {
    pub fn new(store: Arc<dyn CaveStore>, probe: Box<dyn BinaryProbe>, platform: Platform) -> Self {
        Self { store, probe, platform }
    }
}

impl Configurator for ScanConfigurator {
    fn configure(&self, cave: &Cave) -> Result<(), LaunchError> {
        if !cave.install_path.is_dir() {
            return Err(LaunchError::Configure(format!(
                "install folder {} is missing",
                cave.install_path.display()
            )));
        }

        let scan = scan_install(&cave.install_path, self.platform, self.probe.as_ref());
        tracing::info!(
            "configure - Cave {}: {} executables, {} scripts, html index {:?}",
            cave.id,
            scan.executables.len(),
            scan.scripts.len(),
            scan.html_index
        );

        self.store.save(&cave.id, scan.into_update())?;
        Ok(())
    }
}
