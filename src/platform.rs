//! Platform detection - WHICH operating system we launch on
//!
//! The launch-type heuristics and the `{{EXT}}` manifest placeholder both
//! depend on the host platform. It is passed around explicitly so tests can
//! pretend to be another one.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
}

impl Platform {
    /// Platform this binary was built for
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    /// Extension substituted for `{{EXT}}` in manifest paths
    pub fn executable_extension(&self) -> &'static str {
        match self {
            Platform::Linux => "",
            Platform::MacOs => ".app",
            Platform::Windows => ".exe",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::MacOs => "osx",
            Platform::Windows => "windows",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
