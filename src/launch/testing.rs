//! Fakes for the launch collaborators

use crate::api::{ApiError, GameSource};
use crate::cave::{Cave, CaveStore, CaveUpdate, Game};
use crate::configure::Configurator;
use crate::launch::operations::{IdleInhibitor, InhibitError, ProbeResult};
use crate::launch::{BinaryProbe, CredentialClient, EventSink, LaunchError, LaunchOptions, ScopedToken};
use crate::prompt::{Choice, ChoicePrompt, FailureReport, FailureReporter, ReportAction};
use crate::strategy::{Launcher, Preparer};

use std::cell::{Cell, RefCell};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Returns a fixed token for every `choose` call
pub struct FixedPrompt {
    answer: Option<String>,
    calls: Cell<usize>,
}

impl FixedPrompt {
    pub fn answering(answer: Option<&str>) -> Self {
        Self {
            answer: answer.map(str::to_string),
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl ChoicePrompt for FixedPrompt {
    fn choose(&self, _choice: &Choice) -> Option<String> {
        self.calls.set(self.calls.get() + 1);
        self.answer.clone()
    }
}

/// Sets the cave's executables when configured, if it has a store and a fix
pub struct FixingConfigurator {
    fix: Option<Vec<String>>,
    store: Option<Arc<dyn CaveStore>>,
    calls: Cell<usize>,
}

impl FixingConfigurator {
    pub fn new(fix: Option<Vec<String>>) -> Self {
        Self {
            fix,
            store: None,
            calls: Cell::new(0),
        }
    }

    pub fn attach(&mut self, store: Arc<dyn CaveStore>) {
        self.store = Some(store);
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Configurator for FixingConfigurator {
    fn configure(&self, cave: &Cave) -> Result<(), LaunchError> {
        self.calls.set(self.calls.get() + 1);
        if let (Some(store), Some(fix)) = (&self.store, &self.fix) {
            store.save(
                &cave.id,
                CaveUpdate {
                    executables: Some(fix.clone()),
                    ..Default::default()
                },
            )?;
        }
        Ok(())
    }
}

pub struct StaticCredentials {
    result: Result<ScopedToken, String>,
    requests: RefCell<Vec<(u64, String)>>,
}

impl StaticCredentials {
    pub fn ok(token: &str, expires_at: &str) -> Self {
        Self {
            result: Ok(ScopedToken {
                token: token.to_string(),
                expires_at: expires_at.to_string(),
            }),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            result: Err(msg.to_string()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(u64, String)> {
        self.requests.borrow().clone()
    }
}

impl CredentialClient for StaticCredentials {
    fn request_scoped_token(&self, game_id: u64, scope: &str) -> Result<ScopedToken, ApiError> {
        self.requests.borrow_mut().push((game_id, scope.to_string()));
        self.result.clone().map_err(ApiError::Api)
    }
}

pub struct FixedProbe(pub ProbeResult);

impl BinaryProbe for FixedProbe {
    fn probe(&self, _path: &Path) -> ProbeResult {
        self.0
    }
}

#[derive(Default)]
pub struct CountingInhibitor {
    fail: bool,
    next_cookie: Cell<u32>,
    acquired: Cell<usize>,
    released: RefCell<Vec<u32>>,
}

impl CountingInhibitor {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn acquired(&self) -> usize {
        self.acquired.get()
    }

    pub fn released(&self) -> usize {
        self.released.borrow().len()
    }
}

impl IdleInhibitor for CountingInhibitor {
    fn acquire(&self, _reason: &str) -> Result<u32, InhibitError> {
        if self.fail {
            return Err(InhibitError("no session bus".to_string()));
        }
        self.acquired.set(self.acquired.get() + 1);
        let cookie = self.next_cookie.get() + 1;
        self.next_cookie.set(cookie);
        Ok(cookie)
    }

    fn release(&self, cookie: u32) -> Result<(), InhibitError> {
        self.released.borrow_mut().push(cookie);
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Script {
    Succeed,
    Crash(Duration),
    Cancel,
    Fail,
}

/// Launcher that records what it was asked to run
#[derive(Clone)]
pub struct ScriptedLauncher {
    script: Script,
    runs: Arc<Mutex<Vec<LaunchOptions>>>,
}

impl ScriptedLauncher {
    fn scripted(script: Script) -> Self {
        Self {
            script,
            runs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn succeeding() -> Self {
        Self::scripted(Script::Succeed)
    }

    /// Crash after running for `after`
    pub fn crashing(after: Duration) -> Self {
        Self::scripted(Script::Crash(after))
    }

    pub fn cancelling() -> Self {
        Self::scripted(Script::Cancel)
    }

    /// Fail with an error that is neither a crash nor a cancel
    pub fn failing() -> Self {
        Self::scripted(Script::Fail)
    }

    pub fn runs(&self) -> Vec<LaunchOptions> {
        self.runs.lock().unwrap().clone()
    }
}

impl Launcher for ScriptedLauncher {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn run(&self, _events: &EventSink, options: &LaunchOptions) -> Result<(), LaunchError> {
        self.runs.lock().unwrap().push(options.clone());
        match self.script {
            Script::Succeed => Ok(()),
            Script::Crash(after) => {
                std::thread::sleep(after);
                Err(LaunchError::Crash {
                    reason: "exit code 1".to_string(),
                })
            }
            Script::Cancel => Err(LaunchError::Cancelled),
            Script::Fail => Err(LaunchError::Io(std::io::Error::other("device busy"))),
        }
    }
}

impl Preparer for ScriptedLauncher {
    fn name(&self) -> &'static str {
        "scripted-prepare"
    }

    fn run(&self, events: &EventSink, options: &LaunchOptions) -> Result<(), LaunchError> {
        Launcher::run(self, events, options)
    }
}

pub struct FakeGames {
    url: Option<Option<String>>,
    calls: Cell<usize>,
}

impl FakeGames {
    pub fn with_url(url: Option<&str>) -> Self {
        Self {
            url: Some(url.map(str::to_string)),
            calls: Cell::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            url: None,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl GameSource for FakeGames {
    fn game(&self, game_id: u64) -> Result<Game, ApiError> {
        self.calls.set(self.calls.get() + 1);
        let url = self.url.clone().ok_or(ApiError::MissingKey)?;
        Ok(Game {
            id: game_id,
            title: "Test Game".to_string(),
            cover_url: None,
            url,
        })
    }
}

pub struct RecordingReporter {
    answer: ReportAction,
    reports: RefCell<Vec<FailureReport>>,
}

impl RecordingReporter {
    pub fn answering(answer: ReportAction) -> Self {
        Self {
            answer,
            reports: RefCell::new(Vec::new()),
        }
    }

    pub fn reports(&self) -> Vec<FailureReport> {
        self.reports.borrow().clone()
    }
}

impl FailureReporter for RecordingReporter {
    fn present(&self, report: &FailureReport) -> ReportAction {
        self.reports.borrow_mut().push(report.clone());
        self.answer
    }
}
