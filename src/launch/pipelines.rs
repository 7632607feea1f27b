//! Pipelines module (orchestration)

pub mod execute;
pub mod report;

pub use execute::{launch_cave, LaunchContext};
pub use report::{report_launch_failure, ReportContext};
