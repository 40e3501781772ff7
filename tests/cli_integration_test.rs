//! CLI-level integration tests with real files on disk.
//!
//! Tests cover:
//! - Config loading from INI files (load_config, config builders)
//! - CSV data directory wiring through the backtest pipeline
//! - Error paths: unreadable config, missing data file

mod common;

use common::*;
use pipsim::adapters::csv_adapter::CsvBarAdapter;
use pipsim::adapters::file_config_adapter::FileConfigAdapter;
use pipsim::cli;
use pipsim::domain::config_validation::{
    build_data_request, build_score_config, build_simulator_config,
};
use pipsim::domain::engine::IndicatorEngine;
use pipsim::domain::error::PipsimError;
use pipsim::domain::report::PerformanceReport;
use pipsim::domain::simulator::run_simulation;
use pipsim::ports::data_port::DataPort;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

const VALID_INI: &str = r#"
[data]
symbol = EURUSD
interval = M1
lookback = 500

[signal]
rsi_oversold = 40
rsi_overbought = 60
strong_threshold = 3
moderate_threshold = 2

[simulator]
spread = 0.0001
take_profit = 0.0010
stop_loss = 0.0010
hold_bars = 15

[volatility]
enabled = false
"#;

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn write_csv_dir(symbol: &str, interval: &str, len: usize) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().to_path_buf();

    let mut content = String::from("timestamp,open,high,low,close\n");
    for bar in generate_bars(len, 1.1000) {
        content.push_str(&format!(
            "{},{:.5},{:.5},{:.5},{:.5}\n",
            bar.timestamp.format("%Y-%m-%d %H:%M:%S"),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
        ));
    }
    fs::write(path.join(format!("{}_{}.csv", symbol, interval)), content).unwrap();
    (dir, path)
}

mod config_loading {
    use super::*;

    #[test]
    fn load_config_from_disk() {
        let file = write_temp_ini(VALID_INI);
        let config = cli::load_config(&file.path().to_path_buf()).unwrap();

        let request = build_data_request(&config).unwrap();
        assert_eq!(request.symbol, "EURUSD");
        assert_eq!(request.interval, "M1");
        assert_eq!(request.lookback, 500);
    }

    #[test]
    fn load_config_missing_file_is_an_exit_code() {
        let result = cli::load_config(&PathBuf::from("/nonexistent/pipsim.ini"));
        assert!(result.is_err());
    }

    #[test]
    fn all_builders_accept_the_valid_ini() {
        let config = FileConfigAdapter::from_string(VALID_INI).unwrap();
        build_data_request(&config).unwrap();
        let score = build_score_config(&config).unwrap();
        let sim = build_simulator_config(&config).unwrap();

        assert!(score.volatility.is_none());
        assert_eq!(score.max_score(), 4);
        assert_eq!(sim.hold_bars, 15);
    }

    #[test]
    fn volatility_section_switches_to_five_filters() {
        let ini = VALID_INI.replace("enabled = false", "enabled = true");
        let config = FileConfigAdapter::from_string(&ini).unwrap();
        let score = build_score_config(&config).unwrap();

        let bands = score.volatility.unwrap();
        assert!((bands.low_atr - 0.00025).abs() < 1e-12);
        assert!((bands.high_atr - 0.00060).abs() < 1e-12);
        assert_eq!(score.max_score(), 5);
    }

    #[test]
    fn invalid_threshold_combination_is_rejected() {
        let ini = VALID_INI.replace("strong_threshold = 3", "strong_threshold = 1");
        let config = FileConfigAdapter::from_string(&ini).unwrap();
        let err = build_score_config(&config).unwrap_err();
        assert!(matches!(err, PipsimError::ConfigInvalid { .. }));
    }
}

mod backtest_pipeline_on_disk {
    use super::*;

    #[test]
    fn ini_plus_csv_to_report() {
        let file = write_temp_ini(VALID_INI);
        let (_dir, data_path) = write_csv_dir("EURUSD", "M1", 400);

        let config = cli::load_config(&file.path().to_path_buf()).unwrap();
        let request = build_data_request(&config).unwrap();
        let score_config = build_score_config(&config).unwrap();
        let sim_config = build_simulator_config(&config).unwrap();

        let adapter = CsvBarAdapter::new(data_path);
        let series = adapter
            .fetch_bars(&request.symbol, &request.interval, request.lookback)
            .unwrap();
        assert_eq!(series.len(), 400);

        let snapshots = IndicatorEngine::replay(series.bars());
        let trades = run_simulation(&series, &snapshots, &score_config, &sim_config);
        let report = PerformanceReport::compute(&trades);

        assert_eq!(report.trades, trades.len());
        assert_eq!(report.wins + report.losses, report.trades);
    }

    #[test]
    fn lookback_truncates_on_disk_data() {
        let (_dir, data_path) = write_csv_dir("EURUSD", "M1", 400);
        let adapter = CsvBarAdapter::new(data_path);

        let series = adapter.fetch_bars("EURUSD", "M1", 250).unwrap();
        assert_eq!(series.len(), 250);
        assert_eq!(series.bars()[0].timestamp, timestamp(150));
    }

    #[test]
    fn missing_data_file_is_a_data_error() {
        let (_dir, data_path) = write_csv_dir("EURUSD", "M1", 10);
        let adapter = CsvBarAdapter::new(data_path);

        let err = adapter.fetch_bars("GBPUSD", "M1", 100).unwrap_err();
        assert!(matches!(err, PipsimError::Data { .. }));
    }
}
