//! Cave module - installed games and their persistent records
//!
//! A cave is one installed instance of a game. The launcher reads cave records
//! and only ever writes back touch timestamps, playtime, and whatever the
//! re-configuration task discovers.
//!
//! ## Module Structure
//! - `types.rs`: Cave, Upload, Game, LaunchType, CaveUpdate
//! - `store.rs`: CaveStore trait and StoreError
//! - `pure/`: Pure functions (launch readiness)
//! - `operations/`: Store implementations (YAML files on disk)

mod operations;
pub mod pure;
mod store;
#[cfg(test)]
pub mod testing;
mod types;

// Re-export public API
pub use operations::YamlCaveStore;
pub use pure::{cave_problem, Problem};
pub use store::{CaveStore, StoreError};
pub use types::{Cave, CaveUpdate, Game, LaunchType};
