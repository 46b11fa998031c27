#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;
use tickermap::domain::error::TickermapError;
use tickermap::domain::holding::Holding;
use tickermap::domain::series::{ClosePoint, PriceSeries};
use tickermap::ports::holdings_port::HoldingsPort;
use tickermap::ports::quote_port::QuotePort;

pub struct MockQuotePort {
    pub closes: HashMap<String, Vec<f64>>,
    pub errors: HashMap<String, String>,
}

impl MockQuotePort {
    pub fn new() -> Self {
        Self {
            closes: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_closes(mut self, ticker: &str, closes: &[f64]) -> Self {
        self.closes.insert(ticker.to_string(), closes.to_vec());
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl QuotePort for MockQuotePort {
    fn fetch_recent(
        &self,
        ticker: &str,
        _lookback_days: u32,
    ) -> Result<PriceSeries, TickermapError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(TickermapError::QuoteFetch {
                ticker: ticker.to_string(),
                reason: reason.clone(),
            });
        }
        let closes = self.closes.get(ticker).cloned().unwrap_or_default();
        Ok(make_series(ticker, &closes))
    }
}

/// In-memory holdings store; `save` replaces the contents like the CSV
/// adapter does.
pub struct MockHoldingsStore {
    pub holdings: Mutex<Vec<Holding>>,
    pub fail_load: bool,
}

impl MockHoldingsStore {
    pub fn new(initial: Vec<Holding>) -> Self {
        Self {
            holdings: Mutex::new(initial),
            fail_load: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            holdings: Mutex::new(Vec::new()),
            fail_load: true,
        }
    }

    pub fn contents(&self) -> Vec<Holding> {
        self.holdings.lock().unwrap().clone()
    }
}

impl HoldingsPort for MockHoldingsStore {
    fn load(&self) -> Result<Vec<Holding>, TickermapError> {
        if self.fail_load {
            return Err(TickermapError::Store {
                reason: "store offline".to_string(),
            });
        }
        Ok(self.holdings.lock().unwrap().clone())
    }

    fn save(&self, holdings: &[Holding]) -> Result<(), TickermapError> {
        *self.holdings.lock().unwrap() = holdings.to_vec();
        Ok(())
    }
}

pub fn make_series(ticker: &str, closes: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let points = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| ClosePoint {
            date: start + chrono::Duration::days(i as i64),
            close,
        })
        .collect();
    PriceSeries::new(ticker, points)
}

pub fn make_holding(ticker: &str, shares: i64, avg_price: f64) -> Holding {
    Holding::new(ticker, shares, avg_price).unwrap()
}
