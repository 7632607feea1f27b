//! Classification of how a dispatched launch ended

use crate::launch::error::LaunchError;
use std::time::Duration;

#[derive(Debug)]
pub enum Outcome {
    Success,
    /// Cancelled by the user or the strategy; no report
    BenignCancel,
    /// Crashed after the grace period; logged, not reported
    LateCrash { reason: String, elapsed: Duration },
    /// Early crash or any other error; reported to the user
    Fatal(LaunchError),
}

/// A crash strictly later than `grace` after dispatch began is a late crash;
/// at or before it, the crash is fatal.
pub fn classify_outcome(
    result: Result<(), LaunchError>,
    elapsed: Duration,
    grace: Duration,
) -> Outcome {
    match result {
        Ok(()) => Outcome::Success,
        Err(LaunchError::Cancelled) => Outcome::BenignCancel,
        Err(LaunchError::Crash { reason }) if elapsed > grace => {
            Outcome::LateCrash { reason, elapsed }
        }
        Err(e) => Outcome::Fatal(e),
    }
}
