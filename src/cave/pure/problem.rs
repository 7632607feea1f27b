//! Launch readiness of a cave record

use crate::cave::types::{Cave, LaunchType};
use std::fmt;

pub const NO_EXECUTABLES_FOUND: &str = "game.install.no_executables_found";
pub const NO_HTML_INDEX_FOUND: &str = "game.install.no_html_index_found";
/// Not reported by `cave_problem`; raised when no target can be resolved
pub const NO_LAUNCH_TARGET: &str = "game.install.no_launch_target";

/// Localization-key-shaped reason why a cave is not ready to launch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Problem(pub &'static str);

impl Problem {
    pub fn key(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Check launch-type-specific preconditions. Shell and external caves are
/// not checked at all.
pub fn cave_problem(cave: &Cave) -> Option<Problem> {
    match cave.launch_type {
        LaunchType::Native if cave.executables.is_empty() => Some(Problem(NO_EXECUTABLES_FOUND)),
        LaunchType::Html if cave.game_path.as_deref().is_none_or(str::is_empty) => {
            Some(Problem(NO_HTML_INDEX_FOUND))
        }
        _ => None,
    }
}
