//! Manifest module - optional `.itch.toml` launch descriptors
//!
//! ## Module Structure
//! - `types.rs`: Manifest, ManifestAction
//! - `io.rs`: Locating and parsing the manifest file
//! - `pure/`: Validation and path placeholder expansion
//! - `pipelines/`: Action selection (direct or via the choice prompt)

mod io;
mod pipelines;
pub mod pure;
mod types;

pub use io::read_manifest;
pub use pipelines::select_action;
pub use pure::expand_placeholders;
pub use types::ManifestAction;
