//! Resources held for the duration of a game run
//!
//! Both guards release on drop, so they are let go exactly once on every
//! exit path of the launch call, including unwinding.

use crate::cave::CaveStore;
use crate::launch::operations::inhibit::IdleInhibitor;
use crate::util::now_secs;

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Periodically credits playtime to a cave while the game runs.
///
/// Each tick goes through the store's atomic add, so a cancelled ticker
/// loses at most the interval in progress and never double-counts.
pub struct PlaytimeTicker {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl PlaytimeTicker {
    /// Start ticking every `interval`, crediting `credit_secs` per tick
    pub fn start(
        store: Arc<dyn CaveStore>,
        cave_id: &str,
        interval: Duration,
        credit_secs: u64,
    ) -> std::io::Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let cave_id = cave_id.to_string();

        let handle = std::thread::Builder::new()
            .name("playtime".to_string())
            .spawn(move || {
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            Self::tick(store.as_ref(), &cave_id, credit_secs);
                        }
                        // Explicit stop or the ticker was dropped
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })?;

        Ok(Self {
            stop: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Credit one interval of playtime. Store failures are logged and the
    /// interval is lost.
    pub fn tick(store: &dyn CaveStore, cave_id: &str, credit_secs: u64) {
        match store.add_seconds_run(cave_id, credit_secs, now_secs()) {
            Ok(total) => {
                tracing::debug!("launch::playtime - {} has run for {}s", cave_id, total);
            }
            Err(e) => {
                tracing::warn!("launch::playtime - Could not record playtime for {}: {}", cave_id, e);
            }
        }
    }

    /// Stop ticking and wait for the ticker thread to finish
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("launch::playtime - Ticker thread panicked");
            }
        }
    }
}

impl Drop for PlaytimeTicker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Optional idle/display sleep inhibition for one launch.
/// Holding no cookie means nothing will be released.
pub struct SleepLock<'a> {
    inhibitor: &'a dyn IdleInhibitor,
    cookie: Option<u32>,
}

impl<'a> SleepLock<'a> {
    /// Acquire only when `wanted`. A failed acquisition is logged and leaves
    /// the lock empty; the launch goes on without it.
    pub fn acquire(inhibitor: &'a dyn IdleInhibitor, wanted: bool, reason: &str) -> Self {
        let cookie = if wanted {
            match inhibitor.acquire(reason) {
                Ok(cookie) => Some(cookie),
                Err(e) => {
                    tracing::warn!("launch::inhibit - Could not prevent sleep: {}", e);
                    None
                }
            }
        } else {
            None
        };
        Self { inhibitor, cookie }
    }

    #[cfg(test)]
    pub fn is_held(&self) -> bool {
        self.cookie.is_some()
    }

    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if let Some(cookie) = self.cookie.take() {
            if let Err(e) = self.inhibitor.release(cookie) {
                tracing::warn!("launch::inhibit - Could not release sleep lock: {}", e);
            }
        }
    }
}

impl Drop for SleepLock<'_> {
    fn drop(&mut self) {
        self.release_inner();
    }
}
