//! Web dashboard adapter.
//!
//! Axum server with an HTMX frontend. The page polls two fragments every
//! second: the treemap re-renders for whichever view the rotation clock
//! says is active, and the status line carries the refresh timestamp plus
//! the countdown. A third fragment edits the holdings store.

mod error;
mod handlers;
mod refresh;
mod templates;
pub mod treemap_svg;

pub use error::WebError;
pub use handlers::*;
pub use refresh::{refresh_once, spawn_refresh_worker, RefreshHandle};
pub use templates::*;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::{Arc, RwLock};
use std::time::Instant;
use tower_http::services::ServeDir;

use crate::domain::rotation::SLOT_SECS;
use crate::domain::snapshot::PortfolioSnapshot;
use crate::ports::holdings_port::HoldingsPort;

/// Display state owned by the shell. The last good snapshot stays on
/// screen through feed outages; only `update_failed` flips.
#[derive(Debug, Default)]
pub struct DashboardState {
    pub snapshot: Option<PortfolioSnapshot>,
    pub updated_at: Option<String>,
    pub update_failed: bool,
}

pub struct AppState {
    pub holdings: Arc<dyn HoldingsPort + Send + Sync>,
    pub dashboard: Arc<RwLock<DashboardState>>,
    pub refresh: RefreshHandle,
    pub started: Instant,
    pub refresh_secs: u64,
}

impl AppState {
    /// Whole seconds since the shell started; the countdown tick.
    pub fn elapsed_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    /// Rotation ticks since the shell started, one per slot.
    pub fn rotation_tick(&self) -> u64 {
        self.elapsed_secs() / SLOT_SECS
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/fragment/treemap", get(handlers::treemap_fragment))
        .route("/fragment/status", get(handlers::status_fragment))
        .route("/fragment/holdings", get(handlers::holdings_fragment))
        .route("/holdings", post(handlers::add_holding))
        .route("/holdings/{ticker}/delete", post(handlers::delete_holding))
        .nest_service("/static", ServeDir::new("static"))
        .fallback(handlers::not_found)
        .with_state(Arc::new(state))
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}
