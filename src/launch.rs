//! Launch module - turning an installed cave into one running game
//!
//! This module provides:
//! - Readiness checks with a single re-configuration attempt
//! - Launch-type inference from action paths
//! - Scoped credential negotiation for manifest actions
//! - Playtime accounting and idle-sleep inhibition around the game run
//! - Crash/cancel classification and the user-facing failure report
//!
//! ## Module Structure
//! - `types.rs`: LaunchOptions, LaunchEvent, LaunchOutcome
//! - `error.rs`: LaunchError taxonomy
//! - `pure/`: Pure functions (classification, outcome, target resolution)
//! - `operations/`: Atomic side effects (binary probe, lifecycle guards, subkeys)
//! - `pipelines/`: High-level orchestration (execute, report)

mod error;
mod operations;
mod pipelines;
pub mod pure;
#[cfg(test)]
pub mod testing;
mod types;

// Re-export public API
pub use error::LaunchError;
pub use operations::{BinaryProbe, CredentialClient, HeaderProbe, ScopedToken, ScreenSaverInhibitor};
pub use pipelines::{launch_cave, report_launch_failure, LaunchContext, ReportContext};
pub use types::{EventSink, LaunchEvent, LaunchOptions, LaunchOutcome};
