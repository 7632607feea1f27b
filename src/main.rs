mod api;
mod bwrap;
mod cave;
mod config;
mod configure;
mod launch;
mod manifest;
mod paths;
mod platform;
mod prompt;
mod strategy;
mod util;

use crate::api::{ApiClient, CachedGames};
use crate::cave::{CaveStore, YamlCaveStore};
use crate::config::{load_cfg, save_cfg, LauncherConfig};
use crate::configure::ScanConfigurator;
use crate::launch::{
    launch_cave, report_launch_failure, HeaderProbe, LaunchContext, LaunchEvent, LaunchOutcome,
    ReportContext, ScreenSaverInhibitor,
};
use crate::paths::{PATH_CAVES, PATH_DATA};
use crate::platform::Platform;
use crate::prompt::{DialogPrompt, DialogReporter};
use crate::strategy::Strategies;

use std::error::Error;
use std::sync::mpsc;
use std::sync::Arc;

fn init_logging(cfg: &LauncherConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&cfg.log_level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn list_caves(store: &YamlCaveStore) {
    let caves = store.list();
    if caves.is_empty() {
        println!("No caves installed in {}", store.root().display());
        return;
    }
    for cave in caves {
        println!(
            "{}\tgame {}\t{}\t{}m played\t{}",
            cave.id,
            cave.game_id,
            cave.launch_type,
            cave.seconds_run / 60,
            cave.install_path.display()
        );
    }
}

/// Launch one cave and report a failure if there is one. Returns the
/// process exit code.
fn run_cave(cfg: &LauncherConfig, store: Arc<YamlCaveStore>, cave_id: &str) -> Result<i32, Box<dyn Error>> {
    let platform = Platform::current();
    let api_key = Some(cfg.api_key.clone()).filter(|k| !k.is_empty());
    let api = ApiClient::new(&cfg.api_url, api_key)?;

    let probe = HeaderProbe;
    let configurator = ScanConfigurator::new(store.clone(), Box::new(HeaderProbe), platform);
    let inhibitor = ScreenSaverInhibitor::new();
    let strategies = Strategies::builtin(platform);

    // Detached: a game's own children may hold its output pipes open
    let (tx, rx) = mpsc::channel::<LaunchEvent>();
    std::thread::Builder::new()
        .name("game-output".to_string())
        .spawn(move || {
            for event in rx {
                match event {
                    LaunchEvent::Started { pid } => tracing::info!("game - Started with pid {}", pid),
                    LaunchEvent::Output { line } => tracing::info!("game - {}", line),
                    LaunchEvent::Exited { code } => tracing::info!("game - Exited with {:?}", code),
                    LaunchEvent::Opened { target } => tracing::info!("game - Opened {}", target),
                }
            }
        })?;

    let ctx = LaunchContext {
        store: store.clone(),
        configurator: &configurator,
        prompt: &DialogPrompt,
        credentials: &api,
        probe: &probe,
        inhibitor: &inhibitor,
        strategies: &strategies,
        config: cfg,
        platform,
        events: tx,
    };
    let result = launch_cave(&ctx, cave_id);

    match result {
        Ok(LaunchOutcome::Aborted) => {
            tracing::info!("Launch of {} aborted", cave_id);
            Ok(0)
        }
        Ok(outcome) => {
            tracing::info!("Launch of {} finished: {:?}", cave_id, outcome);
            Ok(0)
        }
        Err(err) => {
            let cave = store.get(cave_id).ok();
            let games = CachedGames::new(Some(&api));
            let report = ReportContext {
                games: &games,
                reporter: &DialogReporter,
                probe: &probe,
                open_url: util::open_url,
            };
            report_launch_failure(&report, cave.as_ref(), &err);
            Ok(1)
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|arg| arg == "--help") {
        println!("{}", USAGE_TEXT);
        std::process::exit(0);
    }

    let cfg = load_cfg();
    init_logging(&cfg);

    if !PATH_DATA.join("settings.json").exists() {
        if let Err(e) = save_cfg(&cfg) {
            tracing::warn!("Could not write default settings: {}", e);
        }
    }

    let store = Arc::new(YamlCaveStore::new(PATH_CAVES.clone()));

    if args.iter().any(|arg| arg == "--list") {
        list_caves(&store);
        std::process::exit(0);
    }

    let Some(cave_index) = args.iter().position(|arg| arg == "--cave") else {
        eprintln!("{}", USAGE_TEXT);
        std::process::exit(1);
    };
    let Some(cave_id) = args.get(cave_index + 1) else {
        eprintln!("{}", USAGE_TEXT);
        std::process::exit(1);
    };

    match run_cave(&cfg, store, cave_id) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!("Could not launch {}: {}", cave_id, e);
            util::msg("Launch failed", &e.to_string());
            std::process::exit(1);
        }
    }
}

static USAGE_TEXT: &str = r#"
Usage: cavelaunch [OPTIONS]

Options:
    --cave <id>   Launch the installed cave with the given id
    --list        List installed caves and their playtime
    --help        Show this message

Settings are read from $XDG_DATA_HOME/cavelaunch/settings.json. RUST_LOG
overrides the configured log level.
"#;
