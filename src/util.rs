use crate::platform::Platform;

use dialog::DialogBox;

use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

pub fn msg(title: &str, contents: &str) {
    let _ = dialog::Message::new(contents).title(title).show();
}

/// Seconds since the unix epoch, 0 if the clock is before it
pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Command that hands a file or URL to the desktop's default handler
pub fn opener_command(platform: Platform, target: &str) -> Command {
    match platform {
        Platform::Linux => {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(target);
            cmd
        }
        Platform::MacOs => {
            let mut cmd = Command::new("open");
            cmd.arg(target);
            cmd
        }
        Platform::Windows => {
            // The empty argument is the window title `start` expects first
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", ""]).arg(target);
            cmd
        }
    }
}

/// Open a URL in the browser without waiting on it. Failures are logged.
pub fn open_url(url: &str) {
    let mut cmd = opener_command(Platform::current(), url);
    cmd.stdout(Stdio::null()).stderr(Stdio::null());
    match cmd.spawn() {
        Ok(_) => tracing::info!("util::open_url - Opened {}", url),
        Err(e) => tracing::warn!("util::open_url - Could not open {}: {}", url, e),
    }
}
