//! Resolution of what a launch actually runs

use crate::cave::pure::problem::{NO_EXECUTABLES_FOUND, NO_HTML_INDEX_FOUND, NO_LAUNCH_TARGET};
use crate::cave::{Cave, LaunchType, Problem};

use std::path::Path;

pub fn is_url(target: &str) -> bool {
    let lower = target.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Absolute target for a manifest action path (placeholders already expanded).
/// URLs and absolute paths are kept as they are.
pub fn action_target(install_folder: &Path, action_path: &str) -> String {
    if is_url(action_path) || Path::new(action_path).is_absolute() {
        return action_path.to_string();
    }
    install_folder.join(action_path).to_string_lossy().to_string()
}

/// Target for a cave launched without a manifest, from its recorded
/// launch type
pub fn cave_target(cave: &Cave) -> Result<String, Problem> {
    let recorded_game_path = cave.game_path.as_deref().filter(|p| !p.is_empty());

    let relative = match cave.launch_type {
        LaunchType::Native => cave
            .executables
            .first()
            .map(String::as_str)
            .ok_or(Problem(NO_EXECUTABLES_FOUND))?,
        LaunchType::Html => recorded_game_path.ok_or(Problem(NO_HTML_INDEX_FOUND))?,
        LaunchType::Shell => recorded_game_path
            .or_else(|| cave.executables.first().map(String::as_str))
            .ok_or(Problem(NO_LAUNCH_TARGET))?,
        LaunchType::External => recorded_game_path.ok_or(Problem(NO_LAUNCH_TARGET))?,
    };

    Ok(action_target(&cave.install_path, relative))
}
