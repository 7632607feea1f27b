//! Cave-related type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Strategy category used to run a cave
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LaunchType {
    #[default]
    Native,
    Html,
    Shell,
    External,
}

impl LaunchType {
    pub fn name(&self) -> &'static str {
        match self {
            LaunchType::Native => "native",
            LaunchType::Html => "html",
            LaunchType::Shell => "shell",
            LaunchType::External => "external",
        }
    }
}

impl fmt::Display for LaunchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The uploaded file a cave was installed from
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Upload {
    pub id: u64,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// An installed instance of a game
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Cave {
    pub id: String,
    pub game_id: u64,
    pub upload: Upload,
    #[serde(default)]
    pub launch_type: LaunchType,
    /// Executables discovered at configure time, relative to `install_path`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub executables: Vec<String>,
    /// Entry point for html games, relative to `install_path`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_path: Option<String>,
    pub install_path: PathBuf,
    #[serde(default)]
    pub seconds_run: u64,
    /// Unix timestamp (seconds) of the last launch activity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_touched: Option<u64>,
}

impl Cave {
    #[cfg(test)]
    pub fn new(id: &str, game_id: u64, install_path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.to_string(),
            game_id,
            upload: Upload::default(),
            launch_type: LaunchType::Native,
            executables: Vec::new(),
            game_path: None,
            install_path: install_path.into(),
            seconds_run: 0,
            last_touched: None,
        }
    }
}

/// Partial upsert of a cave record. `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CaveUpdate {
    pub last_touched: Option<u64>,
    pub seconds_run: Option<u64>,
    pub launch_type: Option<LaunchType>,
    pub executables: Option<Vec<String>>,
    pub game_path: Option<Option<String>>,
}

impl CaveUpdate {
    pub fn touched(at: u64) -> Self {
        Self {
            last_touched: Some(at),
            ..Default::default()
        }
    }

    pub fn apply(self, cave: &mut Cave) {
        if let Some(at) = self.last_touched {
            cave.last_touched = Some(at);
        }
        if let Some(secs) = self.seconds_run {
            cave.seconds_run = secs;
        }
        if let Some(launch_type) = self.launch_type {
            cave.launch_type = launch_type;
        }
        if let Some(executables) = self.executables {
            cave.executables = executables;
        }
        if let Some(game_path) = self.game_path {
            cave.game_path = game_path;
        }
    }
}

/// Display metadata for a game, read-only during launch
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Game {
    pub id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_only_touches_given_fields() {
        let mut cave = Cave::new("c1", 7, "/games/c1");
        cave.executables = vec!["game.x86_64".into()];
        cave.seconds_run = 40;

        CaveUpdate::touched(1234).apply(&mut cave);

        assert_eq!(cave.last_touched, Some(1234));
        assert_eq!(cave.seconds_run, 40);
        assert_eq!(cave.executables, vec!["game.x86_64".to_string()]);
    }

    #[test]
    fn update_can_clear_game_path() {
        let mut cave = Cave::new("c1", 7, "/games/c1");
        cave.game_path = Some("index.html".into());
        CaveUpdate {
            game_path: Some(None),
            ..Default::default()
        }
        .apply(&mut cave);
        assert_eq!(cave.game_path, None);
    }

    #[test]
    fn launch_type_yaml_is_lowercase() {
        let yaml = r#"
id: c1
game_id: 3
upload:
  id: 9
  filename: game.zip
launch_type: html
game_path: index.html
install_path: /games/c1
"#;
        let cave: Cave = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cave.launch_type, LaunchType::Html);
        assert_eq!(cave.seconds_run, 0);
        assert!(cave.executables.is_empty());
    }
}
