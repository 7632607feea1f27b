// Pure validation functions for manifest data (no I/O)

use crate::launch::LaunchError;
use crate::manifest::types::{Manifest, RawManifest};

/// Check the structure of a parsed manifest: an `actions` list with at least
/// one entry, and a non-empty `name` and `path` on every action
pub fn validate_manifest(raw: RawManifest) -> Result<Manifest, LaunchError> {
    let Some(actions) = raw.actions else {
        return Err(LaunchError::ManifestInvalid(
            "manifest has no 'actions' list".to_string(),
        ));
    };
    if actions.is_empty() {
        return Err(LaunchError::ManifestInvalid(
            "manifest 'actions' list is empty".to_string(),
        ));
    }

    for (i, action) in actions.iter().enumerate() {
        if action.name.trim().is_empty() {
            return Err(LaunchError::ManifestInvalid(format!(
                "action #{} is missing a 'name'",
                i + 1
            )));
        }
        if action.path.trim().is_empty() {
            return Err(LaunchError::ManifestInvalid(format!(
                "action '{}' is missing a 'path'",
                action.name
            )));
        }
    }

    Ok(Manifest { actions })
}
