//! Portfolio holding records.

use std::collections::HashSet;

use super::error::HoldingError;

/// One position in the portfolio: a ticker, a whole number of shares and
/// the average purchase price paid for them.
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    pub ticker: String,
    pub shares: i64,
    pub avg_price: f64,
}

impl Holding {
    /// Validate and normalize an edit. Tickers are trimmed and stored
    /// uppercase; shares must be at least 1; the average price must be a
    /// finite number of at least 0 (0 means the cost basis is unknown).
    pub fn new(ticker: &str, shares: i64, avg_price: f64) -> Result<Self, HoldingError> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(HoldingError::EmptyTicker);
        }
        if !ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='))
        {
            return Err(HoldingError::InvalidTicker { ticker });
        }
        if shares < 1 {
            return Err(HoldingError::InvalidShares { ticker });
        }
        if !avg_price.is_finite() || avg_price < 0.0 {
            return Err(HoldingError::InvalidAvgPrice { ticker });
        }
        Ok(Self {
            ticker,
            shares,
            avg_price,
        })
    }
}

/// Reject duplicate tickers before they reach the store. The store keys
/// holdings by ticker, so a duplicate would silently shadow an earlier row.
pub fn ensure_unique(holdings: &[Holding]) -> Result<(), HoldingError> {
    let mut seen = HashSet::new();
    for holding in holdings {
        if !seen.insert(holding.ticker.as_str()) {
            return Err(HoldingError::DuplicateTicker {
                ticker: holding.ticker.clone(),
            });
        }
    }
    Ok(())
}
