//! Pipelines module (orchestration)

pub mod select;

pub use select::select_action;
