//! Manifest file I/O

use crate::launch::LaunchError;
use crate::manifest::pure::validate_manifest;
use crate::manifest::types::{Manifest, RawManifest};

use std::path::Path;

pub const MANIFEST_FILE: &str = ".itch.toml";

/// Load the manifest from an install folder.
///
/// No manifest is not an error (`Ok(None)`); a manifest that fails to parse
/// or validate is, and aborts the launch.
pub fn read_manifest(install_dir: &Path) -> Result<Option<Manifest>, LaunchError> {
    let path = install_dir.join(MANIFEST_FILE);
    if !path.is_file() {
        tracing::debug!("manifest - No manifest at {}", path.display());
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|source| LaunchError::ManifestRead {
        path: path.clone(),
        source,
    })?;
    let raw: RawManifest =
        toml::from_str(&contents).map_err(|source| LaunchError::ManifestParse {
            path: path.clone(),
            source,
        })?;

    let manifest = validate_manifest(raw)?;
    tracing::info!(
        "manifest - Loaded {} with {} action(s)",
        path.display(),
        manifest.actions.len()
    );
    Ok(Some(manifest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_manifest(contents: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), contents).unwrap();
        dir
    }

    #[test]
    fn absent_manifest_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_manifest(dir.path()).unwrap().is_none());
    }

    #[test]
    fn valid_manifest_is_loaded() {
        let dir = write_manifest("[[actions]]\nname = \"play\"\npath = \"game.exe\"\n");
        let manifest = read_manifest(dir.path()).unwrap().unwrap();
        assert_eq!(manifest.actions[0].name, "play");
    }

    #[test]
    fn syntax_error_is_a_parse_error() {
        let dir = write_manifest("[[actions]\nname = ");
        assert!(matches!(
            read_manifest(dir.path()),
            Err(LaunchError::ManifestParse { .. })
        ));
    }

    #[test]
    fn wrong_types_are_a_parse_error() {
        let dir = write_manifest("actions = \"play\"\n");
        assert!(matches!(
            read_manifest(dir.path()),
            Err(LaunchError::ManifestParse { .. })
        ));
    }

    #[test]
    fn structural_problems_are_validation_errors() {
        let dir = write_manifest("[[actions]]\npath = \"game.exe\"\n");
        assert!(matches!(
            read_manifest(dir.path()),
            Err(LaunchError::ManifestInvalid(_))
        ));
    }
}
