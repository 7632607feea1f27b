//! Top-level failure report

use crate::api::GameSource;
use crate::cave::{Cave, Game};
use crate::launch::error::{LaunchError, Reason, ReasonPart};
use crate::launch::operations::BinaryProbe;
use crate::prompt::{FailureReport, FailureReporter, ReportAction};

/// Where "Report problem" goes when the game has no page of its own
pub const SUPPORT_URL: &str = "https://itch.io/support";

pub struct ReportContext<'a> {
    pub games: &'a dyn GameSource,
    pub reporter: &'a dyn FailureReporter,
    pub probe: &'a dyn BinaryProbe,
    pub open_url: fn(&str),
}

fn message_for_key(key: &str) -> Option<&'static str> {
    Some(match key {
        "game.install.no_executables_found" => "No executables were found in the install folder",
        "game.install.no_html_index_found" => "No index.html was found in the install folder",
        "game.install.no_launch_target" => "Nothing to launch was recorded for this install",
        "game.launch.unsupported_type" => "This kind of game cannot be launched here",
        "game.launch.sandbox_unsupported" => "This kind of game cannot run in a sandbox",
        "game.launch.crashed" => "The game crashed",
        "game.launch.credentials_failed" => "Could not get credentials for the game",
        _ => return None,
    })
}

/// User-facing message for a launch error. Unknown keys are shown as is.
pub fn describe_error(err: &LaunchError) -> String {
    match err.reason() {
        Some(Reason::Text(text)) => text,
        Some(Reason::Parts(parts)) => parts
            .iter()
            .map(|part| match part {
                ReasonPart::Key(key) => message_for_key(key).unwrap_or(key).to_string(),
                ReasonPart::Literal(text) => text.clone(),
            })
            .collect::<Vec<_>>()
            .join(": "),
        None => err.to_string(),
    }
}

fn fetch_game(games: &dyn GameSource, cave: Option<&Cave>) -> Option<Game> {
    let cave = cave?;
    match games.game(cave.game_id) {
        Ok(game) => Some(game),
        Err(e) => {
            tracing::warn!("launch::report - No metadata for game {}: {}", cave.game_id, e);
            None
        }
    }
}

/// Log what we know about the cave's install, one line per executable
fn log_diagnostics(probe: &dyn BinaryProbe, cave: Option<&Cave>, err: &LaunchError) {
    tracing::info!("launch::report - Diagnostics for: {:?}", err);
    let Some(cave) = cave else {
        tracing::info!("launch::report - No cave record available");
        return;
    };
    tracing::info!(
        "launch::report - Cave {} (game {}), {} at {}",
        cave.id,
        cave.game_id,
        cave.launch_type,
        cave.install_path.display()
    );
    tracing::info!(
        "launch::report - Install folder exists: {}",
        cave.install_path.is_dir()
    );
    if let Some(game_path) = &cave.game_path {
        tracing::info!("launch::report - Game path: {}", game_path);
    }
    for exe in &cave.executables {
        let path = cave.install_path.join(exe);
        let probed = probe.probe(&path);
        tracing::info!(
            "launch::report - {}: exists={} linux={} mac={}",
            exe,
            path.exists(),
            probed.is_linux_executable,
            probed.is_mac_executable
        );
    }
}

/// Show a launch failure to the user and carry out what they pick.
/// Never fails; collaborator errors are logged.
pub fn report_launch_failure(
    ctx: &ReportContext,
    cave: Option<&Cave>,
    err: &LaunchError,
) -> ReportAction {
    tracing::error!("launch - Launch failed: {}", err);

    let game = fetch_game(ctx.games, cave);
    let title = match &game {
        Some(game) => format!("Could not launch {}", game.title),
        None => "Could not launch game".to_string(),
    };
    let report = FailureReport {
        title,
        message: describe_error(err),
    };

    let action = ctx.reporter.present(&report);
    match action {
        ReportAction::ReportProblem => {
            let url = game
                .as_ref()
                .and_then(|g| g.url.as_deref())
                .unwrap_or(SUPPORT_URL);
            (ctx.open_url)(url);
        }
        ReportAction::Probe => log_diagnostics(ctx.probe, cave, err),
        ReportAction::Dismiss => {}
    }
    action
}
