//! Native executables

use crate::bwrap;
use crate::launch::{EventSink, LaunchError, LaunchOptions};
use crate::platform::Platform;

use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::Command;

use super::process::run_process;
use super::{Launcher, Preparer};

pub struct NativeLauncher {
    platform: Platform,
}

impl NativeLauncher {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

impl Launcher for NativeLauncher {
    fn name(&self) -> &'static str {
        "native"
    }

    fn run(&self, events: &EventSink, options: &LaunchOptions) -> Result<(), LaunchError> {
        let cmd = native_command(options, self.platform);
        tracing::info!(
            "strategy::native - Running {} {:?}{}",
            options.target,
            options.args,
            if options.sandbox { " (sandboxed)" } else { "" }
        );
        run_process(cmd, events)
    }
}

/// Build the command for a native target
pub fn native_command(options: &LaunchOptions, platform: Platform) -> Command {
    let mut cmd = if options.sandbox {
        bwrap::sandbox_command(options, &options.target, &options.args)
    } else if platform == Platform::MacOs && options.target.to_lowercase().ends_with(".app") {
        // App bundles are directories; let LaunchServices find the binary
        let mut cmd = Command::new("open");
        cmd.arg("-W").arg("-a").arg(&options.target);
        if !options.args.is_empty() {
            cmd.arg("--args").args(&options.args);
        }
        cmd
    } else {
        let mut cmd = Command::new(&options.target);
        cmd.args(&options.args);
        cmd
    };

    cmd.current_dir(options.working_dir());
    cmd.envs(&options.env);
    cmd
}

/// Makes sure the target exists and is executable before the launcher runs
pub struct NativePreparer;

impl Preparer for NativePreparer {
    fn name(&self) -> &'static str {
        "native-prepare"
    }

    fn run(&self, _events: &EventSink, options: &LaunchOptions) -> Result<(), LaunchError> {
        if options.sandbox {
            bwrap::ensure_available()?;
        }

        let target = options.target_path();
        let metadata = std::fs::metadata(target).map_err(|source| LaunchError::Spawn {
            program: options.target.clone(),
            source,
        })?;

        // .app bundles are directories and keep their own permissions
        if metadata.is_file() && ensure_executable(target)? {
            tracing::info!("strategy::native - Marked {} as executable", target.display());
        }
        Ok(())
    }
}

/// Add the executable bits to `path`. Returns whether anything changed.
pub fn ensure_executable(path: &Path) -> std::io::Result<bool> {
    let mut permissions = std::fs::metadata(path)?.permissions();
    let mode = permissions.mode();
    if mode & 0o111 == 0o111 {
        return Ok(false);
    }
    permissions.set_mode(mode | 0o111);
    std::fs::set_permissions(path, permissions)?;
    Ok(true)
}
