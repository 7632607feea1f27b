//! Manifest action selection

use crate::manifest::types::{Manifest, ManifestAction};
use crate::prompt::{Choice, ChoiceOption, ChoicePrompt};

const ACTION_KEY_PREFIX: &str = "action-";

fn action_key(index: usize) -> String {
    format!("{}{}", ACTION_KEY_PREFIX, index)
}

fn action_index(key: &str) -> Option<usize> {
    key.strip_prefix(ACTION_KEY_PREFIX)?.parse().ok()
}

/// Build the prompt listing every action, in manifest order
pub fn build_choice(manifest: &Manifest, locale: &str) -> Choice {
    Choice {
        title: "Launch options".to_string(),
        options: manifest
            .actions
            .iter()
            .enumerate()
            .map(|(i, action)| ChoiceOption {
                label: action.label(locale).to_string(),
                icon: action.icon.clone(),
                key: action_key(i),
            })
            .collect(),
        cancel_label: "Cancel".to_string(),
    }
}

/// Pick the action to run. A single action is taken as is; with several the
/// user is asked once. `None` means the user cancelled.
pub fn select_action(
    manifest: &Manifest,
    prompt: &dyn ChoicePrompt,
    locale: &str,
) -> Option<ManifestAction> {
    if let [only] = manifest.actions.as_slice() {
        tracing::debug!("manifest - Single action '{}', not prompting", only.name);
        return Some(only.clone());
    }

    let key = prompt.choose(&build_choice(manifest, locale))?;
    let action = action_index(&key).and_then(|i| manifest.actions.get(i));
    if action.is_none() {
        tracing::warn!("manifest - Prompt returned unknown action token '{}'", key);
    }
    action.cloned()
}
