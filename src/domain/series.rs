//! Trailing close-price series for one ticker.

use chrono::NaiveDate;

/// A single daily closing price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// A short window of daily closes, oldest first. The metrics engine only
/// ever looks backwards from the most recent point.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub ticker: String,
    points: Vec<ClosePoint>,
}

impl PriceSeries {
    /// Build a series, sorting the points oldest first.
    pub fn new(ticker: &str, mut points: Vec<ClosePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self {
            ticker: ticker.to_string(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[ClosePoint] {
        &self.points
    }

    /// The most recent close, if any.
    pub fn last_close(&self) -> Option<f64> {
        self.points.last().map(|p| p.close)
    }

    /// The close `back` points before the most recent one. `close_back(0)`
    /// is the last close, `close_back(1)` the one before it.
    pub fn close_back(&self, back: usize) -> Option<f64> {
        self.points
            .len()
            .checked_sub(back + 1)
            .map(|i| self.points[i].close)
    }

    /// The oldest close in the window.
    pub fn oldest_close(&self) -> Option<f64> {
        self.points.first().map(|p| p.close)
    }
}
