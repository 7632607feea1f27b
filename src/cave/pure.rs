//! Pure functions for caves
//!
//! These functions have no side effects and are deterministic.

pub mod problem;

pub use problem::{cave_problem, Problem};
