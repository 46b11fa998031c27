//! CLI integration tests for config loading and the store commands.
//!
//! Tests cover:
//! - Config resolution (build_dashboard_config) with full, partial and bad files
//! - The validate command against real INI files on disk
//! - Add/remove/list round-trips against a CSV store in a temp dir
//! - Exit codes for the common failure paths

mod common;

use common::*;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tempfile::TempDir;
use tickermap::adapters::csv_store_adapter::CsvStoreAdapter;
use tickermap::adapters::file_config_adapter::FileConfigAdapter;
use tickermap::adapters::http_feed_adapter::HttpFeedAdapter;
use tickermap::cli;
use tickermap::domain::error::TickermapError;
use tickermap::ports::holdings_port::HoldingsPort;

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// ExitCode has no PartialEq; compare through its Debug form.
fn code(exit: ExitCode) -> String {
    format!("{exit:?}")
}

const VALID_INI: &str = r#"
[store]
path = /var/lib/tickermap/holdings.csv

[feed]
base_url = https://quotes.example.com
lookback_days = 14
timeout_secs = 5

[dashboard]
refresh_secs = 120

[web]
listen = 0.0.0.0:8080
"#;

mod config_loading {
    use super::*;

    #[test]
    fn build_dashboard_config_valid_full() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let config = cli::build_dashboard_config(&adapter).unwrap();

        assert_eq!(
            config.store_path,
            PathBuf::from("/var/lib/tickermap/holdings.csv")
        );
        assert_eq!(config.feed_base_url, "https://quotes.example.com");
        assert_eq!(config.lookback_days, 14);
        assert_eq!(config.feed_timeout_secs, 5);
        assert_eq!(config.refresh_secs, 120);
        assert_eq!(config.listen, "0.0.0.0:8080");
    }

    #[test]
    fn build_dashboard_config_uses_defaults() {
        let adapter = FileConfigAdapter::from_string("").unwrap();
        let config = cli::build_dashboard_config(&adapter).unwrap();

        assert_eq!(config.store_path, PathBuf::from("holdings.csv"));
        assert_eq!(config.feed_base_url, HttpFeedAdapter::DEFAULT_BASE_URL);
        assert_eq!(config.lookback_days, 10);
        assert_eq!(config.feed_timeout_secs, 10);
        assert_eq!(config.refresh_secs, 300);
        assert_eq!(config.listen, "127.0.0.1:3000");
    }

    #[test]
    fn build_dashboard_config_rejects_lookback_out_of_range() {
        for bad in ["0", "61", "-3"] {
            let ini = format!("[feed]\nlookback_days = {bad}\n");
            let adapter = FileConfigAdapter::from_string(&ini).unwrap();
            let err = cli::build_dashboard_config(&adapter).unwrap_err();
            assert!(
                matches!(err, TickermapError::ConfigInvalid { ref key, .. } if key == "lookback_days"),
                "lookback_days = {bad} should be rejected, got: {err:?}"
            );
        }
    }

    #[test]
    fn build_dashboard_config_rejects_zero_timeout() {
        let adapter = FileConfigAdapter::from_string("[feed]\ntimeout_secs = 0\n").unwrap();
        let err = cli::build_dashboard_config(&adapter).unwrap_err();
        assert!(matches!(err, TickermapError::ConfigInvalid { ref key, .. } if key == "timeout_secs"));
    }

    #[test]
    fn build_dashboard_config_rejects_zero_refresh() {
        let adapter = FileConfigAdapter::from_string("[dashboard]\nrefresh_secs = 0\n").unwrap();
        let err = cli::build_dashboard_config(&adapter).unwrap_err();
        assert!(matches!(err, TickermapError::ConfigInvalid { ref key, .. } if key == "refresh_secs"));
    }

    #[test]
    fn load_config_missing_file_yields_config_exit_code() {
        let path = PathBuf::from("/nonexistent/path/config.ini");
        let err = cli::load_config(&path).err().expect("load should fail");
        assert_eq!(code(err), code(ExitCode::from(2)));
    }
}

mod store_commands {
    use super::*;

    /// A config file in a temp dir whose store path lives next to it.
    fn temp_config() -> (TempDir, PathBuf, PathBuf) {
        let dir = TempDir::new().unwrap();
        let store_path = dir.path().join("holdings.csv");
        let config_path = dir.path().join("config.ini");
        std::fs::write(
            &config_path,
            format!("[store]\npath = {}\n", store_path.display()),
        )
        .unwrap();
        (dir, config_path, store_path)
    }

    #[test]
    fn add_then_list_round_trip() {
        let (_dir, config_path, store_path) = temp_config();

        let exit = cli::run_add(&config_path, "petr4.sa", 100, 28.5);
        assert_eq!(code(exit), code(ExitCode::SUCCESS));

        let store = CsvStoreAdapter::new(store_path);
        let holdings = store.load().unwrap();
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].ticker, "PETR4.SA");
        assert_eq!(holdings[0].shares, 100);

        let exit = cli::run_list(&config_path);
        assert_eq!(code(exit), code(ExitCode::SUCCESS));
    }

    #[test]
    fn add_duplicate_ticker_fails() {
        let (_dir, config_path, _store_path) = temp_config();

        cli::run_add(&config_path, "AAA", 1, 1.0);
        let exit = cli::run_add(&config_path, "aaa", 2, 2.0);
        assert_eq!(code(exit), code(ExitCode::from(4)));
    }

    #[test]
    fn add_invalid_ticker_fails() {
        let (_dir, config_path, store_path) = temp_config();

        let exit = cli::run_add(&config_path, "<script>", 1, 1.0);
        assert_eq!(code(exit), code(ExitCode::from(4)));
        assert!(!store_path.exists(), "nothing should be written");
    }

    #[test]
    fn remove_round_trip() {
        let (_dir, config_path, store_path) = temp_config();

        cli::run_add(&config_path, "AAA", 1, 1.0);
        cli::run_add(&config_path, "BBB", 2, 2.0);

        let exit = cli::run_remove(&config_path, "aaa");
        assert_eq!(code(exit), code(ExitCode::SUCCESS));

        let holdings = CsvStoreAdapter::new(store_path).load().unwrap();
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].ticker, "BBB");
    }

    #[test]
    fn remove_unknown_ticker_fails() {
        let (_dir, config_path, _store_path) = temp_config();

        cli::run_add(&config_path, "AAA", 1, 1.0);
        let exit = cli::run_remove(&config_path, "ZZZ");
        assert_eq!(code(exit), code(ExitCode::from(4)));
    }

    #[test]
    fn list_with_missing_store_succeeds() {
        let (_dir, config_path, store_path) = temp_config();
        assert!(!store_path.exists());

        let exit = cli::run_list(&config_path);
        assert_eq!(code(exit), code(ExitCode::SUCCESS));
    }

    #[test]
    fn corrupt_store_yields_store_exit_code() {
        let (_dir, config_path, store_path) = temp_config();
        std::fs::write(&store_path, "ticker,shares,avg_price\nAAA,many,1.0\n").unwrap();

        let exit = cli::run_list(&config_path);
        assert_eq!(code(exit), code(ExitCode::from(3)));
    }
}

mod validate_command {
    use super::*;

    #[test]
    fn validate_valid_config_succeeds() {
        let dir = TempDir::new().unwrap();
        let store_path = dir.path().join("holdings.csv");
        let config = write_temp_ini(&format!(
            "[store]\npath = {}\n[web]\nlisten = 127.0.0.1:3000\n",
            store_path.display()
        ));

        let exit = cli::run_validate(&PathBuf::from(config.path()));
        assert_eq!(code(exit), code(ExitCode::SUCCESS));
    }

    #[test]
    fn validate_missing_config_file_fails() {
        let exit = cli::run_validate(&PathBuf::from("/nonexistent/config.ini"));
        assert_eq!(code(exit), code(ExitCode::from(2)));
    }

    #[test]
    fn validate_bad_listen_address_fails() {
        let config = write_temp_ini("[web]\nlisten = not-an-address\n");
        let exit = cli::run_validate(&PathBuf::from(config.path()));
        assert_eq!(code(exit), code(ExitCode::from(2)));
    }

    #[test]
    fn validate_reports_duplicate_store_rows() {
        let dir = TempDir::new().unwrap();
        let store_path = dir.path().join("holdings.csv");
        std::fs::write(
            &store_path,
            "ticker,shares,avg_price\nAAA,1,1.0\nAAA,2,2.0\n",
        )
        .unwrap();
        let config = write_temp_ini(&format!("[store]\npath = {}\n", store_path.display()));

        let exit = cli::run_validate(&PathBuf::from(config.path()));
        assert_eq!(code(exit), code(ExitCode::from(4)));
    }

    #[test]
    fn validate_rejects_out_of_range_lookback() {
        let config = write_temp_ini("[feed]\nlookback_days = 90\n");
        let exit = cli::run_validate(&PathBuf::from(config.path()));
        assert_eq!(code(exit), code(ExitCode::from(2)));
    }
}

mod store_round_trip {
    use super::*;

    #[test]
    fn csv_store_preserves_holdings_across_save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = CsvStoreAdapter::new(dir.path().join("holdings.csv"));

        let holdings = vec![
            make_holding("PETR4.SA", 100, 28.5),
            make_holding("VALE3.SA", 50, 61.2),
            make_holding("^BVSP", 1, 0.0),
        ];
        store.save(&holdings).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, holdings);
    }
}
