//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use crate::adapters::csv_store_adapter::CsvStoreAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::http_feed_adapter::HttpFeedAdapter;
use crate::domain::error::TickermapError;
use crate::domain::holding::Holding;
use crate::domain::snapshot::{compute_snapshot, DEFAULT_LOOKBACK_DAYS};
use crate::ports::config_port::ConfigPort;
use crate::ports::holdings_port::HoldingsPort;

#[derive(Parser, Debug)]
#[command(name = "tickermap", about = "Rotating portfolio treemap dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the dashboard web server
    Serve {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Fetch quotes once and print the snapshot
    Snapshot {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Add a holding to the store
    Add {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: String,
        #[arg(long)]
        shares: i64,
        #[arg(long, default_value_t = 0.0)]
        avg_price: f64,
    },
    /// Remove a holding from the store
    Remove {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: String,
    },
    /// List the holdings in the store
    List {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate the configuration and holdings store
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Serve { config } => run_serve(&config),
        Command::Snapshot { config } => run_snapshot(&config),
        Command::Add {
            config,
            ticker,
            shares,
            avg_price,
        } => run_add(&config, &ticker, shares, avg_price),
        Command::Remove { config, ticker } => run_remove(&config, &ticker),
        Command::List { config } => run_list(&config),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = TickermapError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Resolved dashboard configuration. Every key has a default; the file
/// only needs the values that differ.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub store_path: PathBuf,
    pub feed_base_url: String,
    pub lookback_days: u32,
    pub feed_timeout_secs: u64,
    pub refresh_secs: u64,
    pub listen: String,
}

pub fn build_dashboard_config(adapter: &dyn ConfigPort) -> Result<DashboardConfig, TickermapError> {
    let store_path = adapter
        .get_string("store", "path")
        .unwrap_or_else(|| "holdings.csv".to_string());

    let feed_base_url = adapter
        .get_string("feed", "base_url")
        .unwrap_or_else(|| HttpFeedAdapter::DEFAULT_BASE_URL.to_string());

    let lookback_days = adapter.get_int("feed", "lookback_days", DEFAULT_LOOKBACK_DAYS as i64);
    if !(1..=60).contains(&lookback_days) {
        return Err(TickermapError::ConfigInvalid {
            section: "feed".into(),
            key: "lookback_days".into(),
            reason: "must be between 1 and 60".into(),
        });
    }

    let feed_timeout_secs = adapter.get_int("feed", "timeout_secs", 10);
    if feed_timeout_secs < 1 {
        return Err(TickermapError::ConfigInvalid {
            section: "feed".into(),
            key: "timeout_secs".into(),
            reason: "must be at least 1".into(),
        });
    }

    let refresh_secs = adapter.get_int("dashboard", "refresh_secs", 300);
    if refresh_secs < 1 {
        return Err(TickermapError::ConfigInvalid {
            section: "dashboard".into(),
            key: "refresh_secs".into(),
            reason: "must be at least 1".into(),
        });
    }

    let listen = adapter
        .get_string("web", "listen")
        .unwrap_or_else(|| "127.0.0.1:3000".to_string());

    Ok(DashboardConfig {
        store_path: PathBuf::from(store_path),
        feed_base_url,
        lookback_days: lookback_days as u32,
        feed_timeout_secs: feed_timeout_secs as u64,
        refresh_secs: refresh_secs as u64,
        listen,
    })
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run_serve(config_path: &PathBuf) -> ExitCode {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{build_router, spawn_refresh_worker, AppState, DashboardState};
        use crate::ports::quote_port::QuotePort;
        use std::net::SocketAddr;
        use std::sync::{Arc, RwLock};
        use std::time::Instant;

        eprintln!("Loading config from {}", config_path.display());
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(code) => return code,
        };

        let dashboard_config = match build_dashboard_config(&config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };

        let addr: SocketAddr = match dashboard_config.listen.parse() {
            Ok(addr) => addr,
            Err(_) => {
                let err = TickermapError::ConfigInvalid {
                    section: "web".into(),
                    key: "listen".into(),
                    reason: format!("{} is not a socket address", dashboard_config.listen),
                };
                eprintln!("error: {err}");
                return (&err).into();
            }
        };

        init_tracing();

        let holdings = Arc::new(CsvStoreAdapter::new(dashboard_config.store_path.clone()))
            as Arc<dyn HoldingsPort + Send + Sync>;

        let feed = match HttpFeedAdapter::new(
            &dashboard_config.feed_base_url,
            Duration::from_secs(dashboard_config.feed_timeout_secs),
        ) {
            Ok(f) => Arc::new(f) as Arc<dyn QuotePort + Send + Sync>,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };

        let dashboard = Arc::new(RwLock::new(DashboardState::default()));
        let refresh = spawn_refresh_worker(
            Arc::clone(&holdings),
            feed,
            Arc::clone(&dashboard),
            Duration::from_secs(dashboard_config.refresh_secs),
            dashboard_config.lookback_days,
        );

        let state = AppState {
            holdings,
            dashboard,
            refresh,
            started: Instant::now(),
            refresh_secs: dashboard_config.refresh_secs,
        };

        let router = build_router(state);

        eprintln!("Starting dashboard on http://{}", addr);

        tokio::runtime::Runtime::new().unwrap().block_on(async {
            let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
            axum::serve(listener, router).await.unwrap();
        });

        ExitCode::SUCCESS
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = config_path;
        eprintln!("error: web feature is required for serve");
        ExitCode::from(1)
    }
}

fn run_snapshot(config_path: &PathBuf) -> ExitCode {
    init_tracing();

    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let dashboard_config = match build_dashboard_config(&config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let store = CsvStoreAdapter::new(dashboard_config.store_path.clone());
    let holdings = match store.load() {
        Ok(h) => h,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let feed = match HttpFeedAdapter::new(
        &dashboard_config.feed_base_url,
        Duration::from_secs(dashboard_config.feed_timeout_secs),
    ) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("Fetching quotes for {} holdings...", holdings.len());
    let snapshot = match compute_snapshot(&holdings, &feed, dashboard_config.lookback_days) {
        Some(s) => s,
        None => {
            let err = TickermapError::NoQuotes;
            eprintln!("error: {err}");
            return (&err).into();
        }
    };

    println!(
        "{:<12} {:>10} {:>9} {:>9} {:>9} {:>14} {:>8}",
        "TICKER", "PRICE", "DAY%", "7D%", "TOTAL%", "VALUE", "SHARE%"
    );
    for metric in &snapshot.metrics {
        println!(
            "{:<12} {:>10.2} {:>+9.2} {:>+9.2} {:>+9.2} {:>14.2} {:>8.2}",
            metric.ticker,
            metric.price,
            metric.change_pct_day,
            metric.change_pct_week,
            metric.change_pct_total,
            metric.value,
            metric.participation_pct
        );
    }
    println!(
        "{:<12} {:>10} {:>9} {:>9} {:>9} {:>14.2} {:>8}",
        "TOTAL", "", "", "", "", snapshot.total_value, ""
    );

    let dropped = holdings.len() - snapshot.len();
    if dropped > 0 {
        eprintln!("{dropped} holding(s) dropped this cycle (no usable quotes)");
    }

    ExitCode::SUCCESS
}

fn open_store(config_path: &PathBuf) -> Result<CsvStoreAdapter, ExitCode> {
    let config = load_config(config_path)?;
    let dashboard_config = build_dashboard_config(&config).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })?;
    Ok(CsvStoreAdapter::new(dashboard_config.store_path))
}

pub fn run_add(config_path: &PathBuf, ticker: &str, shares: i64, avg_price: f64) -> ExitCode {
    let store = match open_store(config_path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let holding = match Holding::new(ticker, shares, avg_price) {
        Ok(h) => h,
        Err(e) => {
            let err = TickermapError::from(e);
            eprintln!("error: {err}");
            return (&err).into();
        }
    };

    let mut holdings = match store.load() {
        Ok(h) => h,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if holdings.iter().any(|h| h.ticker == holding.ticker) {
        let err = TickermapError::from(crate::domain::error::HoldingError::DuplicateTicker {
            ticker: holding.ticker,
        });
        eprintln!("error: {err}");
        return (&err).into();
    }

    eprintln!(
        "Adding {} ({} shares @ $ {:.2})",
        holding.ticker, holding.shares, holding.avg_price
    );
    holdings.push(holding);

    match store.save(&holdings) {
        Ok(()) => {
            eprintln!("{} holdings in {}", holdings.len(), store.path().display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn run_remove(config_path: &PathBuf, ticker: &str) -> ExitCode {
    let store = match open_store(config_path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let ticker = ticker.trim().to_uppercase();
    let mut holdings = match store.load() {
        Ok(h) => h,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let before = holdings.len();
    holdings.retain(|h| h.ticker != ticker);
    if holdings.len() == before {
        let err = TickermapError::UnknownTicker { ticker };
        eprintln!("error: {err}");
        return (&err).into();
    }

    match store.save(&holdings) {
        Ok(()) => {
            eprintln!(
                "Removed {}. {} holdings in {}",
                ticker,
                holdings.len(),
                store.path().display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn run_list(config_path: &PathBuf) -> ExitCode {
    let store = match open_store(config_path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let holdings = match store.load() {
        Ok(h) => h,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if holdings.is_empty() {
        eprintln!("No holdings in {}", store.path().display());
        return ExitCode::SUCCESS;
    }

    println!("{:<12} {:>10} {:>12}", "TICKER", "SHARES", "AVG_PRICE");
    for holding in &holdings {
        println!(
            "{:<12} {:>10} {:>12.2}",
            holding.ticker, holding.shares, holding.avg_price
        );
    }
    eprintln!("{} holdings", holdings.len());

    ExitCode::SUCCESS
}

pub fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let dashboard_config = match build_dashboard_config(&config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if dashboard_config.listen.parse::<std::net::SocketAddr>().is_err() {
        let err = TickermapError::ConfigInvalid {
            section: "web".into(),
            key: "listen".into(),
            reason: format!("{} is not a socket address", dashboard_config.listen),
        };
        eprintln!("error: {err}");
        return (&err).into();
    }

    eprintln!("  store:   {}", dashboard_config.store_path.display());
    eprintln!("  feed:    {}", dashboard_config.feed_base_url);
    eprintln!(
        "  refresh: every {} s, {} day lookback",
        dashboard_config.refresh_secs, dashboard_config.lookback_days
    );
    eprintln!("  listen:  {}", dashboard_config.listen);

    let store = CsvStoreAdapter::new(dashboard_config.store_path);
    match store.load() {
        Ok(holdings) => {
            eprintln!("\nConfiguration is valid. {} holdings in store.", holdings.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
