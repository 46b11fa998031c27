//! HTTP price feed adapter for the Yahoo Finance chart API.
//!
//! One GET per ticker per refresh: `/v8/finance/chart/{ticker}` with a
//! daily interval and a short trailing range. Quotes arrive as parallel
//! arrays of epoch timestamps and closes; null closes (holidays, halted
//! sessions) are skipped rather than treated as prices.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::error::TickermapError;
use crate::domain::series::{ClosePoint, PriceSeries};
use crate::ports::quote_port::QuotePort;

pub struct HttpFeedAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpFeedAdapter {
    pub const DEFAULT_BASE_URL: &'static str = "https://query1.finance.yahoo.com";

    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TickermapError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tickermap/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TickermapError::FeedUnavailable {
                reason: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl QuotePort for HttpFeedAdapter {
    fn fetch_recent(
        &self,
        ticker: &str,
        lookback_days: u32,
    ) -> Result<PriceSeries, TickermapError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, ticker);
        let range = format!("{}d", lookback_days);

        let response = self
            .client
            .get(&url)
            .query(&[("interval", "1d"), ("range", range.as_str())])
            .send()
            .map_err(|e| TickermapError::QuoteFetch {
                ticker: ticker.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(TickermapError::QuoteFetch {
                ticker: ticker.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        let payload: ChartResponse =
            response.json().map_err(|e| TickermapError::QuoteFetch {
                ticker: ticker.to_string(),
                reason: format!("invalid response body: {}", e),
            })?;

        series_from_response(ticker, payload)
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

fn series_from_response(
    ticker: &str,
    response: ChartResponse,
) -> Result<PriceSeries, TickermapError> {
    if let Some(err) = response.chart.error {
        return Err(TickermapError::QuoteFetch {
            ticker: ticker.to_string(),
            reason: format!("{}: {}", err.code, err.description),
        });
    }

    let result = response
        .chart
        .result
        .and_then(|mut results| {
            if results.is_empty() {
                None
            } else {
                Some(results.remove(0))
            }
        })
        .ok_or_else(|| TickermapError::QuoteFetch {
            ticker: ticker.to_string(),
            reason: "empty chart result".to_string(),
        })?;

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    let mut points = Vec::new();
    for (&ts, close) in result.timestamp.iter().zip(closes) {
        let Some(close) = close else { continue };
        if !close.is_finite() {
            continue;
        }
        let Some(moment) = chrono::DateTime::from_timestamp(ts, 0) else {
            continue;
        };
        points.push(ClosePoint {
            date: moment.date_naive(),
            close,
        });
    }

    Ok(PriceSeries::new(ticker, points))
}
