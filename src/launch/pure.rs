//! Pure functions for launching (no side effects beyond the injected probe)

pub mod classify;
pub mod outcome;
pub mod target;

pub use classify::classify_target;
pub use outcome::{classify_outcome, Outcome};
pub use target::{action_target, cave_target};
