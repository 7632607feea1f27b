//! Spawning a game process and reporting how it ended

use crate::launch::{EventSink, LaunchError, LaunchEvent};

use std::io::{BufRead, BufReader, Read};
use std::os::unix::process::ExitStatusExt;
use std::process::{Command, Stdio};

/// Signals a user-initiated stop sends. SIGKILL (OOM killer) is a crash.
const CANCEL_SIGNALS: [i32; 3] = [libc::SIGINT, libc::SIGTERM, libc::SIGHUP];

/// Spawn `cmd`, forward its output as events, and wait for it to exit.
///
/// Output lines are forwarded from detached reader threads, so they may
/// trail the `Exited` event.
pub fn run_process(mut cmd: Command, events: &EventSink) -> Result<(), LaunchError> {
    let program = cmd.get_program().to_string_lossy().to_string();
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|source| LaunchError::Spawn {
        program: program.clone(),
        source,
    })?;

    let pid = child.id();
    tracing::info!("strategy::process - Started {} (pid {})", program, pid);
    let _ = events.send(LaunchEvent::Started { pid });

    if let Some(stdout) = child.stdout.take() {
        forward_lines(stdout, events.clone());
    }
    if let Some(stderr) = child.stderr.take() {
        forward_lines(stderr, events.clone());
    }

    let status = child.wait()?;
    tracing::info!("strategy::process - {} exited: {}", program, status);
    let _ = events.send(LaunchEvent::Exited {
        code: status.code(),
    });

    exit_outcome(status.code(), status.signal())
}

fn forward_lines<R: Read + Send + 'static>(stream: R, events: EventSink) {
    std::thread::spawn(move || {
        for line in BufReader::new(stream).lines().map_while(Result::ok) {
            if events.send(LaunchEvent::Output { line }).is_err() {
                break;
            }
        }
    });
}

/// Map an exit code / terminating signal to the launch result
pub fn exit_outcome(code: Option<i32>, signal: Option<i32>) -> Result<(), LaunchError> {
    match (code, signal) {
        (Some(0), _) => Ok(()),
        (_, Some(sig)) if CANCEL_SIGNALS.contains(&sig) => Err(LaunchError::Cancelled),
        (_, Some(sig)) => Err(LaunchError::Crash {
            reason: format!("killed by signal {}", sig),
        }),
        (Some(code), None) => Err(LaunchError::Crash {
            reason: format!("exit code {}", code),
        }),
        (None, None) => Err(LaunchError::Crash {
            reason: "unknown exit status".to_string(),
        }),
    }
}
