use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.itch.io";

/// Launcher settings, stored as `settings.json` in the data directory
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LauncherConfig {
    /// Hold an idle/display sleep inhibitor while a game runs
    #[serde(default)]
    pub prevent_display_sleep: bool,
    /// A crash reported after this many seconds is treated as the game
    /// exiting abnormally after real use, and is not surfaced to the user
    #[serde(default = "default_crash_grace_secs")]
    pub crash_grace_secs: f64,
    /// Wall-clock seconds between two playtime ticks
    #[serde(default = "default_playtime_interval_secs")]
    pub playtime_interval_secs: u64,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Long-lived API key used to mint scoped subkeys
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,
    /// Run native actions inside a bubblewrap container
    #[serde(default)]
    pub sandbox: bool,
    /// Locale used to pick localized manifest action names
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_crash_grace_secs() -> f64 {
    2.0
}

fn default_playtime_interval_secs() -> u64 {
    10
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LauncherConfig {
    fn default() -> Self {
        LauncherConfig {
            prevent_display_sleep: false,
            crash_grace_secs: default_crash_grace_secs(),
            playtime_interval_secs: default_playtime_interval_secs(),
            api_url: default_api_url(),
            api_key: String::new(),
            sandbox: false,
            locale: default_locale(),
            log_level: default_log_level(),
        }
    }
}

impl LauncherConfig {
    pub fn crash_grace(&self) -> Duration {
        // Negative or NaN values from a hand-edited file collapse to zero,
        // values past what a Duration holds saturate
        if self.crash_grace_secs.is_nan() || self.crash_grace_secs <= 0.0 {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(self.crash_grace_secs).unwrap_or(Duration::MAX)
    }

    pub fn playtime_interval(&self) -> Duration {
        Duration::from_secs(self.playtime_interval_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = LauncherConfig::default();
        assert!(!cfg.prevent_display_sleep);
        assert_eq!(cfg.crash_grace(), Duration::from_secs(2));
        assert_eq!(cfg.playtime_interval(), Duration::from_secs(10));
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn out_of_range_grace_is_clamped() {
        let grace = |secs: f64| {
            LauncherConfig {
                crash_grace_secs: secs,
                ..Default::default()
            }
            .crash_grace()
        };
        assert_eq!(grace(1e20), Duration::MAX);
        assert_eq!(grace(f64::INFINITY), Duration::MAX);
        assert_eq!(grace(-3.0), Duration::ZERO);
        assert_eq!(grace(f64::NAN), Duration::ZERO);
        assert_eq!(grace(0.5), Duration::from_millis(500));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: LauncherConfig = serde_json::from_str(r#"{"prevent_display_sleep": true}"#).unwrap();
        assert!(cfg.prevent_display_sleep);
        assert_eq!(cfg.crash_grace_secs, 2.0);
        assert_eq!(cfg.locale, "en");
    }

    #[test]
    fn negative_grace_collapses_to_zero() {
        let cfg = LauncherConfig {
            crash_grace_secs: -3.0,
            ..Default::default()
        };
        assert_eq!(cfg.crash_grace(), Duration::ZERO);
    }

    #[test]
    fn zero_interval_is_clamped() {
        let cfg = LauncherConfig {
            playtime_interval_secs: 0,
            ..Default::default()
        };
        assert_eq!(cfg.playtime_interval(), Duration::from_secs(1));
    }
}
