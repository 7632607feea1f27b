//! Bubblewrap container setup
//!
//! Sandboxed native launches run inside bwrap with the host filesystem
//! visible read-only, a private /tmp, and only the install folder writable.

use std::process::Command;

use crate::launch::{LaunchError, LaunchOptions};
use crate::paths::{BIN_BWRAP, PATH_HOME};

/// Add base bwrap arguments to command
pub fn add_base_args(cmd: &mut Command) {
    cmd.arg("--die-with-parent");
    cmd.arg("--unshare-pid");
    cmd.args(["--ro-bind", "/", "/"]);
    cmd.args(["--dev-bind", "/dev", "/dev"]);
    cmd.args(["--proc", "/proc"]);
    cmd.args(["--tmpfs", "/tmp"]);
    // --tmpfs /tmp hides the X11 socket
    cmd.args(["--bind-try", "/tmp/.X11-unix", "/tmp/.X11-unix"]);
    if let Ok(runtime_dir) = std::env::var("XDG_RUNTIME_DIR") {
        cmd.args(["--bind-try", runtime_dir.as_str(), runtime_dir.as_str()]);
    }
}

/// Fails when no bwrap binary could be located
pub fn ensure_available() -> Result<(), LaunchError> {
    if BIN_BWRAP.is_absolute() && BIN_BWRAP.is_file() {
        return Ok(());
    }
    Err(LaunchError::Spawn {
        program: BIN_BWRAP.to_string_lossy().to_string(),
        source: std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "bubblewrap is required for sandboxed launches",
        ),
    })
}

/// Command that runs `program args..` inside a bwrap container
///
/// The run env is passed with --setenv so it applies inside the container.
pub fn sandbox_command(options: &LaunchOptions, program: &str, args: &[String]) -> Command {
    let mut cmd = Command::new(&*BIN_BWRAP);
    add_base_args(&mut cmd);

    let install = options.install_folder.to_string_lossy();
    cmd.args(["--bind", install.as_ref(), install.as_ref()]);

    let home = PATH_HOME.to_string_lossy();
    cmd.args(["--setenv", "HOME", home.as_ref()]);
    for (key, value) in &options.env {
        cmd.args(["--setenv", key.as_str(), value.as_str()]);
    }

    let workdir = options.working_dir();
    cmd.arg("--chdir").arg(&workdir);
    cmd.arg("--");
    cmd.arg(program);
    cmd.args(args);
    cmd
}
