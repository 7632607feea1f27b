//! Launch type definitions

use crate::cave::{Cave, LaunchType};
use crate::manifest::ManifestAction;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::time::Duration;

/// Reserved run-environment key for the scoped credential
pub const ENV_API_KEY: &str = "ITCHIO_API_KEY";
/// Reserved run-environment key for the scoped credential's expiry
pub const ENV_API_KEY_EXPIRES_AT: &str = "ITCHIO_API_KEY_EXPIRES_AT";

/// Extra environment for the launched game. Numbers are rendered to strings
/// when inserted.
pub type RunEnv = BTreeMap<String, String>;

/// Progress and output emitted by launch strategies
#[derive(Clone, Debug, PartialEq)]
pub enum LaunchEvent {
    Started { pid: u32 },
    Output { line: String },
    Exited { code: Option<i32> },
    /// Target handed off to the desktop opener (browser, file manager)
    Opened { target: String },
}

pub type EventSink = Sender<LaunchEvent>;

/// Everything a prepare or launch strategy needs, built up step by step
#[derive(Clone, Debug)]
pub struct LaunchOptions {
    pub cave: Cave,
    pub install_folder: PathBuf,
    pub launch_type: LaunchType,
    /// Absolute path of the thing to run, or a URL for external launches
    pub target: String,
    pub args: Vec<String>,
    pub env: RunEnv,
    pub action: Option<ManifestAction>,
    pub sandbox: bool,
}

impl LaunchOptions {
    pub fn new(cave: Cave, launch_type: LaunchType, target: impl Into<String>) -> Self {
        Self {
            install_folder: cave.install_path.clone(),
            cave,
            launch_type,
            target: target.into(),
            args: Vec::new(),
            env: RunEnv::new(),
            action: None,
            sandbox: false,
        }
    }

    pub fn with_action(mut self, action: ManifestAction) -> Self {
        self.args = action.args.clone();
        self.sandbox |= action.sandbox;
        self.action = Some(action);
        self
    }

    #[cfg(test)]
    pub fn with_env(mut self, key: &str, value: impl ToString) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox |= sandbox;
        self
    }

    /// Scope requested by the selected manifest action, if any
    pub fn scope(&self) -> Option<&str> {
        self.action
            .as_ref()
            .and_then(|a| a.scope.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    pub fn target_path(&self) -> &Path {
        Path::new(&self.target)
    }

    /// Directory the game process starts in: the target's own folder
    /// when it lives inside the install folder, the install folder otherwise
    pub fn working_dir(&self) -> PathBuf {
        let target = self.target_path();
        match target.parent() {
            Some(parent) if parent.starts_with(&self.install_folder) => parent.to_path_buf(),
            _ => self.install_folder.clone(),
        }
    }
}

/// How a launch call ended when it did not fail
#[derive(Clone, Debug, PartialEq)]
pub enum LaunchOutcome {
    /// The game ran and exited normally
    Completed,
    /// The launch strategy reported a cancellation
    Cancelled,
    /// The game crashed after the grace period; assumed to have been played
    LateCrash { elapsed: Duration },
    /// The user dismissed the action choice; nothing was started
    Aborted,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(target: &str) -> LaunchOptions {
        LaunchOptions::new(Cave::new("c1", 1, "/games/c1"), LaunchType::Native, target)
    }

    #[test]
    fn working_dir_is_target_folder_inside_install() {
        assert_eq!(
            options("/games/c1/bin/game").working_dir(),
            PathBuf::from("/games/c1/bin")
        );
    }

    #[test]
    fn working_dir_falls_back_to_install_folder() {
        assert_eq!(
            options("/usr/bin/love").working_dir(),
            PathBuf::from("/games/c1")
        );
        assert_eq!(
            options("https://example.com").working_dir(),
            PathBuf::from("/games/c1")
        );
    }

    #[test]
    fn blank_scope_is_no_scope() {
        let action = ManifestAction {
            scope: Some("  ".into()),
            ..ManifestAction::named("play", "game")
        };
        assert_eq!(options("/games/c1/game").with_action(action).scope(), None);
    }

    #[test]
    fn action_args_and_sandbox_are_carried() {
        let action = ManifestAction {
            args: vec!["--fullscreen".into()],
            sandbox: true,
            ..ManifestAction::named("play", "game")
        };
        let opts = options("/games/c1/game").with_action(action);
        assert_eq!(opts.args, vec!["--fullscreen".to_string()]);
        assert!(opts.sandbox);
        assert!(opts.with_sandbox(false).sandbox);
    }
}
