//! Per-holding performance metrics.
//!
//! Every change is reported over three horizons: since the previous close,
//! since the close seven trading points back, and since purchase. Each
//! horizon degrades to an exact 0.0 when its baseline is not available, so
//! a sparse series never poisons the treemap with NaN or infinity.

use super::holding::Holding;
use super::series::PriceSeries;

/// Points back from the latest close used for the weekly comparison.
pub const WEEK_WINDOW: usize = 7;

/// Metrics for one holding over the three display horizons.
#[derive(Debug, Clone, PartialEq)]
pub struct StockMetric {
    pub ticker: String,
    pub price: f64,
    pub avg_price: f64,
    pub shares: i64,
    /// Market value, `price * shares`.
    pub value: f64,
    pub change_pct_day: f64,
    pub change_val_day: f64,
    pub change_pct_week: f64,
    pub change_val_week: f64,
    pub change_pct_total: f64,
    pub change_val_total: f64,
    /// Share of the whole portfolio's value, in percent. Filled in by the
    /// snapshot once the cycle total is known.
    pub participation_pct: f64,
}

impl StockMetric {
    /// Derive one holding's metrics from its trailing close series.
    ///
    /// Returns `None` when the series carries no usable last price; the
    /// caller drops the holding for this cycle.
    pub fn compute(holding: &Holding, series: &PriceSeries) -> Option<StockMetric> {
        let price = series.last_close()?;
        if !price.is_finite() || price <= 0.0 {
            return None;
        }

        let (change_pct_day, change_val_day) = match series.close_back(1) {
            Some(prev) => change_from(price, prev),
            None => (0.0, 0.0),
        };

        // a full week back when the window allows, otherwise the oldest
        // point in the window, otherwise no baseline at all
        let week_base = if series.len() > WEEK_WINDOW {
            series.close_back(WEEK_WINDOW)
        } else if series.len() >= 2 {
            series.oldest_close()
        } else {
            None
        };
        let (change_pct_week, change_val_week) = match week_base {
            Some(base) => change_from(price, base),
            None => (0.0, 0.0),
        };

        let (change_pct_total, change_val_total) = change_from(price, holding.avg_price);

        Some(StockMetric {
            ticker: holding.ticker.clone(),
            price,
            avg_price: holding.avg_price,
            shares: holding.shares,
            value: price * holding.shares as f64,
            change_pct_day,
            change_val_day,
            change_pct_week,
            change_val_week,
            change_pct_total,
            change_val_total,
            participation_pct: 0.0,
        })
    }
}

/// Percent and absolute change from `base` to `price`. A baseline that is
/// zero, negative or non-finite yields exactly (0.0, 0.0).
fn change_from(price: f64, base: f64) -> (f64, f64) {
    if base.is_finite() && base > 0.0 {
        ((price - base) / base * 100.0, price - base)
    } else {
        (0.0, 0.0)
    }
}
