//! Price feed port trait.

use crate::domain::error::TickermapError;
use crate::domain::series::PriceSeries;

pub trait QuotePort {
    /// Fetch the trailing daily closes for one ticker, covering roughly the
    /// last `lookback_days` calendar days. The series may be shorter than
    /// requested (market holidays, recent listings); the metrics engine
    /// degrades per horizon rather than failing.
    fn fetch_recent(&self, ticker: &str, lookback_days: u32)
    -> Result<PriceSeries, TickermapError>;
}
