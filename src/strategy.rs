//! Strategy module - HOW each launch type is prepared and run
//!
//! Strategies are looked up by `LaunchType` in a registry built at startup.
//! Every type needs a launcher; preparers are optional and always run to
//! completion before the launcher starts.
//!
//! - Native: spawn the executable (optionally in bubblewrap), after fixing
//!   its permissions
//! - Shell: hand the target to `sh`
//! - Html / External: hand the target to the desktop opener

mod native;
mod opener;
mod process;
mod shell;

use crate::cave::LaunchType;
use crate::launch::{EventSink, LaunchError, LaunchOptions};
use crate::platform::Platform;
use native::{NativeLauncher, NativePreparer};
use opener::OpenerLauncher;
use shell::ShellLauncher;

use std::collections::HashMap;

/// Runs the game and blocks until it is done with
pub trait Launcher: Send + Sync {
    fn name(&self) -> &'static str;

    fn run(&self, events: &EventSink, options: &LaunchOptions) -> Result<(), LaunchError>;
}

/// Fixups that must happen before a launcher runs
pub trait Preparer: Send + Sync {
    fn name(&self) -> &'static str;

    fn run(&self, events: &EventSink, options: &LaunchOptions) -> Result<(), LaunchError>;
}

#[derive(Default)]
pub struct Strategies {
    launchers: HashMap<LaunchType, Box<dyn Launcher>>,
    preparers: HashMap<LaunchType, Box<dyn Preparer>>,
}

impl Strategies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a launcher for every launch type
    pub fn builtin(platform: Platform) -> Self {
        Self::new()
            .with_launcher(LaunchType::Native, NativeLauncher::new(platform))
            .with_preparer(LaunchType::Native, NativePreparer)
            .with_launcher(LaunchType::Html, OpenerLauncher::new(platform))
            .with_launcher(LaunchType::Shell, ShellLauncher)
            .with_launcher(LaunchType::External, OpenerLauncher::new(platform))
    }

    pub fn with_launcher(mut self, launch_type: LaunchType, launcher: impl Launcher + 'static) -> Self {
        self.launchers.insert(launch_type, Box::new(launcher));
        self
    }

    pub fn with_preparer(mut self, launch_type: LaunchType, preparer: impl Preparer + 'static) -> Self {
        self.preparers.insert(launch_type, Box::new(preparer));
        self
    }

    pub fn launcher(&self, launch_type: LaunchType) -> Result<&dyn Launcher, LaunchError> {
        self.launchers
            .get(&launch_type)
            .map(|l| l.as_ref())
            .ok_or(LaunchError::UnsupportedLaunchType(launch_type))
    }

    pub fn preparer(&self, launch_type: LaunchType) -> Option<&dyn Preparer> {
        self.preparers.get(&launch_type).map(|p| p.as_ref())
    }

    /// Run the preparer (if any) then the launcher for `options.launch_type`
    pub fn dispatch(&self, events: &EventSink, options: &LaunchOptions) -> Result<(), LaunchError> {
        let launcher = self.launcher(options.launch_type)?;

        if let Some(preparer) = self.preparer(options.launch_type) {
            tracing::info!("strategy - Preparing with {}", preparer.name());
            preparer.run(events, options)?;
        }

        tracing::info!("strategy - Launching with {}", launcher.name());
        launcher.run(events, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cave::Cave;
    use std::sync::{Arc, Mutex};

    type Journal = Arc<Mutex<Vec<&'static str>>>;

    struct Step {
        name: &'static str,
        journal: Journal,
        fail: bool,
    }

    impl Launcher for Step {
        fn name(&self) -> &'static str {
            self.name
        }

        fn run(&self, _events: &EventSink, _options: &LaunchOptions) -> Result<(), LaunchError> {
            self.journal.lock().unwrap().push(self.name);
            if self.fail {
                return Err(LaunchError::Io(std::io::Error::other("prepare failed")));
            }
            Ok(())
        }
    }

    impl Preparer for Step {
        fn name(&self) -> &'static str {
            self.name
        }

        fn run(&self, events: &EventSink, options: &LaunchOptions) -> Result<(), LaunchError> {
            Launcher::run(self, events, options)
        }
    }

    fn step(name: &'static str, journal: &Journal, fail: bool) -> Step {
        Step {
            name,
            journal: Arc::clone(journal),
            fail,
        }
    }

    fn options(launch_type: LaunchType) -> LaunchOptions {
        LaunchOptions::new(Cave::new("c1", 1, "/games/c1"), launch_type, "/games/c1/game")
    }

    #[test]
    fn prepare_runs_before_launch() {
        let journal = Journal::default();
        let strategies = Strategies::new()
            .with_launcher(LaunchType::Native, step("launch", &journal, false))
            .with_preparer(LaunchType::Native, step("prepare", &journal, false));
        let (tx, _rx) = std::sync::mpsc::channel();

        strategies.dispatch(&tx, &options(LaunchType::Native)).unwrap();
        assert_eq!(*journal.lock().unwrap(), vec!["prepare", "launch"]);
    }

    #[test]
    fn missing_preparer_is_skipped() {
        let journal = Journal::default();
        let strategies =
            Strategies::new().with_launcher(LaunchType::Shell, step("launch", &journal, false));
        let (tx, _rx) = std::sync::mpsc::channel();

        strategies.dispatch(&tx, &options(LaunchType::Shell)).unwrap();
        assert_eq!(*journal.lock().unwrap(), vec!["launch"]);
    }

    #[test]
    fn failed_prepare_stops_launch() {
        let journal = Journal::default();
        let strategies = Strategies::new()
            .with_launcher(LaunchType::Native, step("launch", &journal, false))
            .with_preparer(LaunchType::Native, step("prepare", &journal, true));
        let (tx, _rx) = std::sync::mpsc::channel();

        assert!(strategies.dispatch(&tx, &options(LaunchType::Native)).is_err());
        assert_eq!(*journal.lock().unwrap(), vec!["prepare"]);
    }

    #[test]
    fn missing_launcher_is_unsupported() {
        let (tx, _rx) = std::sync::mpsc::channel();
        let err = Strategies::new()
            .dispatch(&tx, &options(LaunchType::Html))
            .unwrap_err();
        assert!(matches!(err, LaunchError::UnsupportedLaunchType(LaunchType::Html)));
    }

    #[test]
    fn builtin_covers_every_launch_type() {
        let strategies = Strategies::builtin(Platform::Linux);
        for launch_type in [
            LaunchType::Native,
            LaunchType::Html,
            LaunchType::Shell,
            LaunchType::External,
        ] {
            assert!(strategies.launcher(launch_type).is_ok());
        }
        assert!(strategies.preparer(LaunchType::Native).is_some());
        assert!(strategies.preparer(LaunchType::Html).is_none());
    }
}
