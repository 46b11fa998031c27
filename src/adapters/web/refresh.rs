//! Background refresh worker.
//!
//! A plain thread, not a tokio task: the quote adapter uses blocking HTTP
//! and a refresh touches the network once per holding. The worker is the
//! only writer of the dashboard state; handlers take read locks and send
//! wake signals.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::Duration;

use chrono::Local;
use tracing::{info, warn};

use crate::domain::snapshot::compute_snapshot;
use crate::ports::holdings_port::HoldingsPort;
use crate::ports::quote_port::QuotePort;

use super::DashboardState;

/// Wakes the worker ahead of its schedule, after a holdings edit.
#[derive(Clone)]
pub struct RefreshHandle {
    tx: Sender<()>,
}

impl RefreshHandle {
    pub fn request_refresh(&self) {
        // a dropped receiver just means no worker is running
        let _ = self.tx.send(());
    }

    /// A handle with no worker behind it, for routers built in tests.
    pub fn disconnected() -> Self {
        let (tx, _) = mpsc::channel();
        Self { tx }
    }
}

/// Spawn the refresh loop. The first refresh runs immediately, then one
/// per `interval` or whenever the handle signals.
pub fn spawn_refresh_worker(
    holdings: Arc<dyn HoldingsPort + Send + Sync>,
    feed: Arc<dyn QuotePort + Send + Sync>,
    dashboard: Arc<RwLock<DashboardState>>,
    interval: Duration,
    lookback_days: u32,
) -> RefreshHandle {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        run_worker(holdings, feed, dashboard, interval, lookback_days, rx);
    });
    RefreshHandle { tx }
}

fn run_worker(
    holdings: Arc<dyn HoldingsPort + Send + Sync>,
    feed: Arc<dyn QuotePort + Send + Sync>,
    dashboard: Arc<RwLock<DashboardState>>,
    interval: Duration,
    lookback_days: u32,
    rx: Receiver<()>,
) {
    loop {
        refresh_once(&*holdings, &*feed, &dashboard, lookback_days);
        match rx.recv_timeout(interval) {
            Ok(()) | Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

/// One refresh cycle: recompute the snapshot and publish it. When nothing
/// usable comes back, the previous snapshot stays visible and the status
/// line flips to stale.
pub fn refresh_once(
    holdings: &dyn HoldingsPort,
    feed: &dyn QuotePort,
    dashboard: &RwLock<DashboardState>,
    lookback_days: u32,
) {
    let loaded = match holdings.load() {
        Ok(holdings) => holdings,
        Err(err) => {
            warn!(error = %err, "holdings store unavailable, keeping previous snapshot");
            dashboard.write().unwrap().update_failed = true;
            return;
        }
    };

    info!(holdings = loaded.len(), "refreshing portfolio snapshot");
    match compute_snapshot(&loaded, feed, lookback_days) {
        Some(snapshot) => {
            let tiles = snapshot.len();
            let mut state = dashboard.write().unwrap();
            state.snapshot = Some(snapshot);
            state.updated_at = Some(Local::now().format("%d/%m/%Y at %H:%M:%S").to_string());
            state.update_failed = false;
            drop(state);
            info!(tiles, "snapshot updated");
        }
        None => {
            warn!("no quotes for any holding, keeping previous snapshot");
            dashboard.write().unwrap().update_failed = true;
        }
    }
}
