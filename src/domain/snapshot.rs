//! Portfolio snapshot computation.
//!
//! The metrics engine: fetch a close series per holding, derive metrics,
//! and assemble them into one consistent snapshot. A holding whose quotes
//! cannot be fetched is dropped for the cycle; the rest of the portfolio
//! still renders.

use std::cmp::Ordering;

use tracing::{debug, warn};

use super::holding::Holding;
use super::metric::StockMetric;
use crate::ports::quote_port::QuotePort;

/// Calendar days of history requested from the feed. Ten days of closes
/// comfortably cover the seven-point weekly comparison across weekends.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 10;

/// One coherent view of the whole portfolio, metrics sorted by market
/// value descending.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSnapshot {
    pub metrics: Vec<StockMetric>,
    pub total_value: f64,
}

impl PortfolioSnapshot {
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

/// Compute a snapshot of the portfolio from live quotes.
///
/// Returns `None` when no holding produced a usable metric, so the caller
/// can keep showing its previous snapshot instead of a blank one.
pub fn compute_snapshot(
    holdings: &[Holding],
    feed: &dyn QuotePort,
    lookback_days: u32,
) -> Option<PortfolioSnapshot> {
    let mut metrics = Vec::with_capacity(holdings.len());

    for holding in holdings {
        let series = match feed.fetch_recent(&holding.ticker, lookback_days) {
            Ok(series) => series,
            Err(err) => {
                warn!(ticker = %holding.ticker, error = %err, "dropping holding for this cycle");
                continue;
            }
        };
        match StockMetric::compute(holding, &series) {
            Some(metric) => {
                debug!(ticker = %metric.ticker, price = metric.price, "computed metric");
                metrics.push(metric);
            }
            None => {
                warn!(ticker = %holding.ticker, "no usable quote, dropping holding for this cycle");
            }
        }
    }

    if metrics.is_empty() {
        return None;
    }

    // every surviving metric has price > 0 and shares >= 1, so the total
    // is strictly positive and participation is well defined
    let total_value: f64 = metrics.iter().map(|m| m.value).sum();
    for metric in &mut metrics {
        metric.participation_pct = metric.value / total_value * 100.0;
    }

    // stable sort keeps the holdings-store order for equal values
    metrics.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));

    Some(PortfolioSnapshot {
        metrics,
        total_value,
    })
}
