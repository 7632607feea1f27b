//! Manifest type definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Manifest as read from disk, before validation
#[derive(Clone, Debug, Deserialize, Default)]
pub struct RawManifest {
    #[serde(default)]
    pub actions: Option<Vec<ManifestAction>>,
}

/// A validated manifest: at least one action, every action named
#[derive(Clone, Debug, PartialEq)]
pub struct Manifest {
    pub actions: Vec<ManifestAction>,
}

/// A named, runnable entry point
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct ManifestAction {
    // Missing names and paths are reported by validation, not by the parser
    #[serde(default)]
    pub name: String,
    /// Relative path, absolute path, or URL. May contain `{{EXT}}`.
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// API permission scope the action needs a subkey for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Run inside the sandbox even if the launcher setting is off
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub sandbox: bool,
    /// Localized display names, keyed by locale (e.g. "fr", "pt_BR")
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub locales: BTreeMap<String, ActionLocale>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct ActionLocale {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ManifestAction {
    #[cfg(test)]
    pub fn named(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            ..Default::default()
        }
    }

    /// Display label for `locale`: exact locale, then its language part,
    /// then the plain name
    pub fn label(&self, locale: &str) -> &str {
        let language = locale.split(['_', '-']).next().unwrap_or(locale);
        [locale, language]
            .iter()
            .filter_map(|l| self.locales.get(*l))
            .find_map(|l| l.name.as_deref())
            .filter(|n| !n.is_empty())
            .unwrap_or(self.name.as_str())
    }
}
