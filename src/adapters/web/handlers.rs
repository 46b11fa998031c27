//! HTTP request handlers for the web adapter.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
    Form,
};
use std::sync::Arc;

use crate::domain::holding::Holding;
use crate::domain::layout::build_layout;
use crate::domain::rotation::{countdown_at, view_for_tick};

use super::{is_htmx_request, AppState, WebError};

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let template = super::templates::DashboardTemplate {
        title: "Portfolio Map",
        refresh_secs: state.refresh_secs,
    };

    if is_htmx_request(&headers) {
        Ok(Html(template.fragment()).into_response())
    } else {
        super::templates::render_page(&template)
    }
}

pub async fn treemap_fragment(State(state): State<Arc<AppState>>) -> Result<Response, WebError> {
    let view = view_for_tick(state.rotation_tick());
    let snapshot = state.dashboard.read().unwrap().snapshot.clone();
    let layout = build_layout(snapshot.as_ref(), view);
    let svg = super::treemap_svg::render_treemap_svg(&layout, 1200.0, 760.0);
    Ok(Html(super::templates::treemap_fragment_html(&layout, &svg)).into_response())
}

pub async fn status_fragment(State(state): State<Arc<AppState>>) -> Result<Response, WebError> {
    let countdown = countdown_at(state.elapsed_secs());
    let (updated_at, update_failed) = {
        let dashboard = state.dashboard.read().unwrap();
        (dashboard.updated_at.clone(), dashboard.update_failed)
    };
    Ok(Html(super::templates::status_fragment_html(
        updated_at.as_deref(),
        update_failed,
        &countdown,
    ))
    .into_response())
}

pub async fn holdings_fragment(State(state): State<Arc<AppState>>) -> Result<Response, WebError> {
    let holdings = state.holdings.load()?;
    Ok(Html(super::templates::holdings_fragment_html(&holdings)).into_response())
}

#[derive(Debug, serde::Deserialize)]
pub struct HoldingFormData {
    pub ticker: String,
    pub shares: String,
    #[serde(default)]
    pub avg_price: String,
}

pub async fn add_holding(
    State(state): State<Arc<AppState>>,
    Form(form): Form<HoldingFormData>,
) -> Result<Response, WebError> {
    let shares: i64 = form
        .shares
        .trim()
        .parse()
        .map_err(|_| WebError::bad_request("Shares must be a whole number"))?;
    let avg_price: f64 = if form.avg_price.trim().is_empty() {
        0.0
    } else {
        form.avg_price
            .trim()
            .parse()
            .map_err(|_| WebError::bad_request("Average price must be a number"))?
    };
    let holding = Holding::new(&form.ticker, shares, avg_price)
        .map_err(|e| WebError::bad_request(e.to_string()))?;

    let mut holdings = state.holdings.load()?;
    if holdings.iter().any(|h| h.ticker == holding.ticker) {
        return Err(WebError::bad_request(format!(
            "{} is already in the portfolio",
            holding.ticker
        )));
    }
    holdings.push(holding);
    state.holdings.save(&holdings)?;
    state.refresh.request_refresh();

    Ok(Html(super::templates::holdings_fragment_html(&holdings)).into_response())
}

pub async fn delete_holding(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> Result<Response, WebError> {
    let ticker = ticker.trim().to_uppercase();
    let mut holdings = state.holdings.load()?;
    let before = holdings.len();
    holdings.retain(|h| h.ticker != ticker);
    if holdings.len() == before {
        return Err(WebError::not_found(format!(
            "{} is not in the portfolio",
            ticker
        )));
    }
    state.holdings.save(&holdings)?;
    state.refresh.request_refresh();

    Ok(Html(super::templates::holdings_fragment_html(&holdings)).into_response())
}

pub async fn not_found(headers: HeaderMap) -> Response {
    super::error::error_response(WebError::not_found("Page not found"), &headers)
}
