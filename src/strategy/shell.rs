//! Shell scripts (anything we could not identify as a native binary)

use crate::bwrap;
use crate::launch::{EventSink, LaunchError, LaunchOptions};

use std::process::Command;

use super::process::run_process;
use super::Launcher;

pub struct ShellLauncher;

impl ShellLauncher {
    pub fn command(options: &LaunchOptions) -> Command {
        let mut cmd = if options.sandbox {
            let mut args = vec![options.target.clone()];
            args.extend(options.args.iter().cloned());
            bwrap::sandbox_command(options, "sh", &args)
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg(&options.target);
            cmd.args(&options.args);
            cmd
        };
        cmd.current_dir(options.working_dir());
        cmd.envs(&options.env);
        cmd
    }
}

impl Launcher for ShellLauncher {
    fn name(&self) -> &'static str {
        "shell"
    }

    fn run(&self, events: &EventSink, options: &LaunchOptions) -> Result<(), LaunchError> {
        if options.sandbox {
            bwrap::ensure_available()?;
        }
        tracing::info!(
            "strategy::shell - Running {} through sh{}",
            options.target,
            if options.sandbox { " (sandboxed)" } else { "" }
        );
        run_process(Self::command(options), events)
    }
}
