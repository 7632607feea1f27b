//! Cave launch pipeline

use crate::cave::{cave_problem, Cave, CaveStore, CaveUpdate, LaunchType};
use crate::config::LauncherConfig;
use crate::configure::Configurator;
use crate::launch::error::LaunchError;
use crate::launch::operations::{
    negotiate_scope, BinaryProbe, CredentialClient, IdleInhibitor, PlaytimeTicker, SleepLock,
};
use crate::launch::pure::{action_target, cave_target, classify_outcome, classify_target, Outcome};
use crate::launch::types::{EventSink, LaunchOptions, LaunchOutcome};
use crate::manifest::{expand_placeholders, read_manifest, select_action, ManifestAction};
use crate::platform::Platform;
use crate::prompt::ChoicePrompt;
use crate::strategy::Strategies;
use crate::util::now_secs;

use std::sync::Arc;
use std::time::Instant;

const SLEEP_LOCK_REASON: &str = "Game running";

/// Collaborators of one launch call
pub struct LaunchContext<'a> {
    pub store: Arc<dyn CaveStore>,
    pub configurator: &'a dyn Configurator,
    pub prompt: &'a dyn ChoicePrompt,
    pub credentials: &'a dyn CredentialClient,
    pub probe: &'a dyn BinaryProbe,
    pub inhibitor: &'a dyn IdleInhibitor,
    pub strategies: &'a Strategies,
    pub config: &'a LauncherConfig,
    pub platform: Platform,
    pub events: EventSink,
}

/// Launch the cave `cave_id` and block until the game is done.
///
/// Benign cancellations and crashes after the grace period come back as
/// outcomes; every other failure is returned unchanged for the caller to
/// report.
pub fn launch_cave(ctx: &LaunchContext, cave_id: &str) -> Result<LaunchOutcome, LaunchError> {
    let cave = ensure_ready(ctx, cave_id)?;

    let mut options = match read_manifest(&cave.install_path)? {
        Some(manifest) => {
            tracing::info!(
                "launch - Cave {} has a manifest with {} action(s)",
                cave.id,
                manifest.actions.len()
            );
            let Some(action) = select_action(&manifest, ctx.prompt, &ctx.config.locale) else {
                tracing::info!("launch - No action picked for {}, aborting", cave.id);
                return Ok(LaunchOutcome::Aborted);
            };
            options_for_action(ctx, cave, action)?
        }
        None => options_for_cave(ctx, cave)?,
    };

    if let Some(scope) = options.scope().map(str::to_string) {
        negotiate_scope(ctx.credentials, options.cave.game_id, &scope, &mut options.env)?;
    }

    tracing::info!(
        "launch - Cave {}: {} target {}",
        options.cave.id,
        options.launch_type,
        options.target
    );
    run_with_lifecycle(ctx, &options)
}

/// Load the cave and make sure it can be launched, re-configuring it at
/// most once
fn ensure_ready(ctx: &LaunchContext, cave_id: &str) -> Result<Cave, LaunchError> {
    let cave = ctx.store.get(cave_id)?;
    let Some(problem) = cave_problem(&cave) else {
        return Ok(cave);
    };

    tracing::info!("launch - Cave {} not ready ({}), re-configuring", cave_id, problem);
    ctx.configurator.configure(&cave)?;

    let cave = ctx.store.get(cave_id)?;
    match cave_problem(&cave) {
        Some(problem) => Err(LaunchError::NotReady { problem }),
        None => Ok(cave),
    }
}

/// Only spawned processes can be put in bwrap; opener hand-offs cannot
fn sandboxable(launch_type: LaunchType) -> bool {
    matches!(launch_type, LaunchType::Native | LaunchType::Shell)
}

fn options_for_action(
    ctx: &LaunchContext,
    cave: Cave,
    action: ManifestAction,
) -> Result<LaunchOptions, LaunchError> {
    let path = expand_placeholders(&action.path, ctx.platform);
    let target = action_target(&cave.install_path, &path);
    let launch_type = classify_target(&target, ctx.platform, ctx.probe);

    // An explicit request from the manifest is never dropped
    if action.sandbox && !sandboxable(launch_type) {
        return Err(LaunchError::SandboxUnsupported(launch_type));
    }
    let sandbox = ctx.config.sandbox && sandboxable(launch_type);

    Ok(LaunchOptions::new(cave, launch_type, target)
        .with_action(action)
        .with_sandbox(sandbox))
}

fn options_for_cave(ctx: &LaunchContext, cave: Cave) -> Result<LaunchOptions, LaunchError> {
    let target = cave_target(&cave).map_err(|problem| LaunchError::NotReady { problem })?;
    let launch_type = cave.launch_type;
    let sandbox = ctx.config.sandbox && sandboxable(launch_type);
    Ok(LaunchOptions::new(cave, launch_type, target).with_sandbox(sandbox))
}

fn touch(store: &dyn CaveStore, cave_id: &str) {
    if let Err(e) = store.save(cave_id, CaveUpdate::touched(now_secs())) {
        tracing::warn!("launch - Could not touch cave {}: {}", cave_id, e);
    }
}

/// Dispatch with playtime ticking and the optional sleep lock held. Both
/// are let go before the outcome is classified.
fn run_with_lifecycle(ctx: &LaunchContext, options: &LaunchOptions) -> Result<LaunchOutcome, LaunchError> {
    // Fail before acquiring anything
    ctx.strategies.launcher(options.launch_type)?;

    let cave_id = options.cave.id.as_str();
    touch(ctx.store.as_ref(), cave_id);

    let interval = ctx.config.playtime_interval();
    let ticker = PlaytimeTicker::start(Arc::clone(&ctx.store), cave_id, interval, interval.as_secs())?;
    let lock = SleepLock::acquire(ctx.inhibitor, ctx.config.prevent_display_sleep, SLEEP_LOCK_REASON);

    let started = Instant::now();
    let result = ctx.strategies.dispatch(&ctx.events, options);
    let elapsed = started.elapsed();

    ticker.stop();
    lock.release();
    touch(ctx.store.as_ref(), cave_id);

    match classify_outcome(result, elapsed, ctx.config.crash_grace()) {
        Outcome::Success => {
            tracing::info!("launch - Cave {} exited after {:.1}s", cave_id, elapsed.as_secs_f64());
            Ok(LaunchOutcome::Completed)
        }
        Outcome::BenignCancel => {
            tracing::info!("launch - Cave {} was cancelled", cave_id);
            Ok(LaunchOutcome::Cancelled)
        }
        Outcome::LateCrash { reason, elapsed } => {
            tracing::warn!(
                "launch - Cave {} crashed after {:.1}s, not reporting: {}",
                cave_id,
                elapsed.as_secs_f64(),
                reason
            );
            Ok(LaunchOutcome::LateCrash { elapsed })
        }
        Outcome::Fatal(e) => Err(e),
    }
}
