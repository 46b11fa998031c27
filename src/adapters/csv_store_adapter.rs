//! CSV holdings store adapter.
//!
//! One file, one header row `ticker,shares,avg_price`, one row per holding.
//! A missing file reads as an empty portfolio so a fresh install starts
//! clean; the first save creates it.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::domain::error::TickermapError;
use crate::domain::holding::{ensure_unique, Holding};
use crate::ports::holdings_port::HoldingsPort;

pub struct CsvStoreAdapter {
    path: PathBuf,
}

impl CsvStoreAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl HoldingsPort for CsvStoreAdapter {
    fn load(&self) -> Result<Vec<Holding>, TickermapError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(TickermapError::Store {
                    reason: format!("failed to read {}: {}", self.path.display(), e),
                });
            }
        };

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut holdings = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| TickermapError::Store {
                reason: format!("CSV parse error: {}", e),
            })?;

            let ticker = record.get(0).ok_or_else(|| TickermapError::Store {
                reason: "missing ticker column".into(),
            })?;

            let shares: i64 = record
                .get(1)
                .ok_or_else(|| TickermapError::Store {
                    reason: format!("missing shares column for {}", ticker),
                })?
                .trim()
                .parse()
                .map_err(|e| TickermapError::Store {
                    reason: format!("invalid shares value for {}: {}", ticker, e),
                })?;

            // a blank price column means the cost basis was never recorded
            let avg_price: f64 = match record.get(2).map(str::trim) {
                Some(raw) if !raw.is_empty() => {
                    raw.parse().map_err(|e| TickermapError::Store {
                        reason: format!("invalid avg_price value for {}: {}", ticker, e),
                    })?
                }
                _ => 0.0,
            };

            holdings.push(Holding::new(ticker, shares, avg_price)?);
        }

        ensure_unique(&holdings)?;
        Ok(holdings)
    }

    fn save(&self, holdings: &[Holding]) -> Result<(), TickermapError> {
        ensure_unique(holdings)?;

        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(["ticker", "shares", "avg_price"])
            .map_err(|e| TickermapError::Store {
                reason: format!("CSV write error: {}", e),
            })?;
        for holding in holdings {
            let shares = holding.shares.to_string();
            let avg_price = holding.avg_price.to_string();
            wtr.write_record([holding.ticker.as_str(), &shares, &avg_price])
                .map_err(|e| TickermapError::Store {
                    reason: format!("CSV write error: {}", e),
                })?;
        }

        let bytes = wtr.into_inner().map_err(|e| TickermapError::Store {
            reason: format!("CSV write error: {}", e),
        })?;
        fs::write(&self.path, bytes).map_err(|e| TickermapError::Store {
            reason: format!("failed to write {}: {}", self.path.display(), e),
        })?;
        Ok(())
    }
}
