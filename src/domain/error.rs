//! Domain error types.

/// A rejected holdings edit. Raised at the edit boundary (CLI arguments,
/// web form, CSV rows) before a bad record can reach the metrics engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HoldingError {
    #[error("ticker must not be empty")]
    EmptyTicker,

    #[error("invalid ticker {ticker}: only letters, digits and . - ^ = are allowed")]
    InvalidTicker { ticker: String },

    #[error("invalid shares for {ticker}: must be a whole number of at least 1")]
    InvalidShares { ticker: String },

    #[error("invalid average price for {ticker}: must be a finite number of at least 0")]
    InvalidAvgPrice { ticker: String },

    #[error("duplicate ticker: {ticker}")]
    DuplicateTicker { ticker: String },
}

/// Top-level error type for tickermap.
#[derive(Debug, thiserror::Error)]
pub enum TickermapError {
    #[error("holdings store error: {reason}")]
    Store { reason: String },

    #[error("price feed unavailable: {reason}")]
    FeedUnavailable { reason: String },

    #[error("quote fetch failed for {ticker}: {reason}")]
    QuoteFetch { ticker: String, reason: String },

    #[error("no quotes available for any configured holding")]
    NoQuotes,

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    InvalidHolding(#[from] HoldingError),

    #[error("{ticker} is not in the holdings store")]
    UnknownTicker { ticker: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TickermapError> for std::process::ExitCode {
    fn from(err: &TickermapError) -> Self {
        let code: u8 = match err {
            TickermapError::Io(_) => 1,
            TickermapError::ConfigParse { .. }
            | TickermapError::ConfigMissing { .. }
            | TickermapError::ConfigInvalid { .. } => 2,
            TickermapError::Store { .. } => 3,
            TickermapError::InvalidHolding(_) | TickermapError::UnknownTicker { .. } => 4,
            TickermapError::FeedUnavailable { .. }
            | TickermapError::QuoteFetch { .. }
            | TickermapError::NoQuotes => 5,
        };
        std::process::ExitCode::from(code)
    }
}
