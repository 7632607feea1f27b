//! Pure functions for manifests

mod placeholder;
mod validation;

pub use placeholder::expand_placeholders;
pub use validation::validate_manifest;
