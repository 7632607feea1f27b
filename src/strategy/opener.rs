//! HTML games and external URLs, handed to the desktop opener

use crate::launch::{EventSink, LaunchError, LaunchEvent, LaunchOptions};
use crate::platform::Platform;
use crate::util::opener_command;

use super::Launcher;

/// The opener returns once the browser has the target, so playtime for
/// these launches only covers the hand-off.
pub struct OpenerLauncher {
    platform: Platform,
}

impl OpenerLauncher {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

impl Launcher for OpenerLauncher {
    fn name(&self) -> &'static str {
        "opener"
    }

    fn run(&self, events: &EventSink, options: &LaunchOptions) -> Result<(), LaunchError> {
        let mut cmd = opener_command(self.platform, &options.target);
        let program = cmd.get_program().to_string_lossy().to_string();
        tracing::info!("strategy::opener - Opening {} with {}", options.target, program);

        let status = cmd
            .status()
            .map_err(|source| LaunchError::Spawn { program: program.clone(), source })?;
        if !status.success() {
            return Err(LaunchError::Crash {
                reason: format!("{} failed: {}", program, status),
            });
        }

        let _ = events.send(LaunchEvent::Opened {
            target: options.target.clone(),
        });
        Ok(())
    }
}
