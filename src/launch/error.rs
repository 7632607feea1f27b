//! Launch error taxonomy
//!
//! Every failure of a launch call ends up as exactly one of these. Cancelled
//! and late crashes are recovered by the orchestrator; everything else bubbles
//! unchanged to the top-level failure report.

use crate::cave::{LaunchType, Problem, StoreError};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("could not read manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed manifest {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid manifest: {0}")]
    ManifestInvalid(String),
    #[error("cave is not ready to launch ({problem})")]
    NotReady { problem: Problem },
    #[error("no launcher registered for launch type {0}")]
    UnsupportedLaunchType(LaunchType),
    #[error("{0} launches cannot run in a sandbox")]
    SandboxUnsupported(LaunchType),
    #[error("could not obtain credentials for scope '{scope}': {reason}")]
    Credential { scope: String, reason: String },
    #[error("launch cancelled")]
    Cancelled,
    #[error("game crashed: {reason}")]
    Crash { reason: String },
    #[error("re-configuration failed: {0}")]
    Configure(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("could not start {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One piece of a user-facing failure reason
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReasonPart {
    /// Localization key, rendered through the message table
    Key(&'static str),
    /// Verbatim text (paths, exit codes, server messages)
    Literal(String),
}

/// Structured reason attached to a launch error
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reason {
    Text(String),
    Parts(Vec<ReasonPart>),
}

impl LaunchError {
    /// Structured reason for the failure report. `None` means the report
    /// falls back to the error's string form.
    pub fn reason(&self) -> Option<Reason> {
        match self {
            LaunchError::NotReady { problem } => {
                Some(Reason::Parts(vec![ReasonPart::Key(problem.key())]))
            }
            LaunchError::UnsupportedLaunchType(launch_type) => Some(Reason::Parts(vec![
                ReasonPart::Key("game.launch.unsupported_type"),
                ReasonPart::Literal(launch_type.name().to_string()),
            ])),
            LaunchError::SandboxUnsupported(launch_type) => Some(Reason::Parts(vec![
                ReasonPart::Key("game.launch.sandbox_unsupported"),
                ReasonPart::Literal(launch_type.name().to_string()),
            ])),
            LaunchError::Crash { reason } => Some(Reason::Parts(vec![
                ReasonPart::Key("game.launch.crashed"),
                ReasonPart::Literal(reason.clone()),
            ])),
            LaunchError::Credential { reason, .. } => Some(Reason::Parts(vec![
                ReasonPart::Key("game.launch.credentials_failed"),
                ReasonPart::Literal(reason.clone()),
            ])),
            LaunchError::ManifestInvalid(msg) => Some(Reason::Text(msg.clone())),
            _ => None,
        }
    }
}
