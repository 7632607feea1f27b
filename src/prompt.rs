//! User-facing dialogs: action choice and launch failure report
//!
//! The launch flow only sees the `ChoicePrompt` and `FailureReporter` traits;
//! the dialog-backed implementations live here too.

use dialog::DialogBox;

/// One entry in a choice prompt
#[derive(Clone, Debug, PartialEq)]
pub struct ChoiceOption {
    pub label: String,
    pub icon: Option<String>,
    /// Token handed back when this option is picked
    pub key: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Choice {
    pub title: String,
    pub options: Vec<ChoiceOption>,
    pub cancel_label: String,
}

pub trait ChoicePrompt {
    /// Ask the user to pick one option. `None` means cancelled.
    fn choose(&self, choice: &Choice) -> Option<String>;
}

/// What the user asked for after seeing a failure report
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportAction {
    ReportProblem,
    Probe,
    Dismiss,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FailureReport {
    pub title: String,
    pub message: String,
}

pub trait FailureReporter {
    /// Show the report. Must not fail; anything unexpected counts as dismiss.
    fn present(&self, report: &FailureReport) -> ReportAction;
}

const REPORT_LABEL: &str = "Report problem";
const PROBE_LABEL: &str = "Diagnose";
const DISMISS_LABEL: &str = "Dismiss";

/// Numbered text-input prompt through zenity/kdialog/dialog
pub struct DialogPrompt;

impl DialogPrompt {
    pub fn render(choice: &Choice) -> String {
        let mut text = String::new();
        for (i, option) in choice.options.iter().enumerate() {
            text.push_str(&format!("{}. {}\n", i + 1, option.label));
        }
        text.push_str(&format!(
            "\nEnter a number, or leave empty to {}.",
            choice.cancel_label.to_lowercase()
        ));
        text
    }

    /// Map the typed answer back to an option key
    pub fn parse_answer(choice: &Choice, answer: &str) -> Option<String> {
        let index: usize = answer.trim().parse().ok()?;
        let option = choice.options.get(index.checked_sub(1)?)?;
        Some(option.key.clone())
    }
}

impl ChoicePrompt for DialogPrompt {
    fn choose(&self, choice: &Choice) -> Option<String> {
        let answer = dialog::Input::new(Self::render(choice))
            .title(&choice.title)
            .show();
        match answer {
            Ok(Some(answer)) => {
                let key = Self::parse_answer(choice, &answer);
                if key.is_none() && !answer.trim().is_empty() {
                    tracing::warn!("prompt - Ignoring answer '{}'", answer.trim());
                }
                key
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("prompt - Could not show choice dialog: {}", e);
                None
            }
        }
    }
}

/// Native message box with three custom buttons
pub struct DialogReporter;

impl FailureReporter for DialogReporter {
    fn present(&self, report: &FailureReport) -> ReportAction {
        let result = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title(report.title.as_str())
            .set_description(report.message.as_str())
            .set_buttons(rfd::MessageButtons::YesNoCancelCustom(
                REPORT_LABEL.to_string(),
                PROBE_LABEL.to_string(),
                DISMISS_LABEL.to_string(),
            ))
            .show();

        match result {
            rfd::MessageDialogResult::Custom(label) if label == REPORT_LABEL => {
                ReportAction::ReportProblem
            }
            rfd::MessageDialogResult::Custom(label) if label == PROBE_LABEL => ReportAction::Probe,
            rfd::MessageDialogResult::Yes => ReportAction::ReportProblem,
            rfd::MessageDialogResult::No => ReportAction::Probe,
            _ => ReportAction::Dismiss,
        }
    }
}
