//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvBarAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::bar::BarSeries;
use crate::domain::config_validation::{
    build_data_request, build_score_config, build_simulator_config,
};
use crate::domain::engine::{IndicatorEngine, WARMUP_BARS};
use crate::domain::error::PipsimError;
use crate::domain::indicator::IndicatorSnapshot;
use crate::domain::report::PerformanceReport;
use crate::domain::signal;
use crate::domain::simulator::run_simulation;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "pipsim", about = "Confluence-signal strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest over historical bars
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Directory holding {symbol}_{interval}.csv files
        #[arg(short, long)]
        data: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Score the most recent bar and print the live signal
    Signal {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        data: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show data range for the configured symbol
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        data: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            data,
            output,
        } => run_backtest(&config, &data, output.as_ref()),
        Command::Signal { config, data } => run_signal(&config, &data),
        Command::Validate { config } => run_validate(&config),
        Command::Info { config, data } => run_info(&config, &data),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|reason| {
        let err = PipsimError::ConfigParse {
            file: path.display().to_string(),
            reason,
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn fetch_series(config: &FileConfigAdapter, data_path: &PathBuf) -> Result<BarSeries, PipsimError> {
    let request = build_data_request(config)?;
    let adapter = CsvBarAdapter::new(data_path.clone());

    eprintln!(
        "Fetching up to {} bars for {} {}",
        request.lookback, request.symbol, request.interval
    );
    adapter.fetch_bars(&request.symbol, &request.interval, request.lookback)
}

fn run_backtest(config_path: &PathBuf, data_path: &PathBuf, output: Option<&PathBuf>) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let score_config = match build_score_config(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let sim_config = match build_simulator_config(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let series = match fetch_series(&config, data_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let minimum = WARMUP_BARS + sim_config.hold_bars + 1;
    if series.len() < minimum {
        let err = PipsimError::InsufficientData {
            bars: series.len(),
            minimum,
        };
        eprintln!("error: {err}");
        return (&err).into();
    }

    eprintln!("Running backtest over {} bars", series.len());

    let snapshots = IndicatorEngine::replay(series.bars());
    let trades = run_simulation(&series, &snapshots, &score_config, &sim_config);
    let report = PerformanceReport::compute(&trades);

    eprintln!("\n=== Backtest Results ===");
    eprintln!("Trades:        {}", report.trades);
    eprintln!("Wins:          {}", report.wins);
    eprintln!("Losses:        {}", report.losses);
    eprintln!("Win Rate:      {:.1}%", report.win_rate * 100.0);
    eprintln!("Total Pips:    {:.1}", report.total_pips);
    eprintln!("Profit Factor: {:.2}", report.profit_factor);
    eprintln!("Expectancy:    {:.2} pips/trade", report.expectancy);

    if let Some(output) = output {
        let sink = TextReportAdapter::new();
        match sink.write(&report, &trades, &output.display().to_string()) {
            Ok(()) => eprintln!("\nReport written to: {}", output.display()),
            Err(e) => {
                eprintln!("error: failed to write report: {e}");
                return (&e).into();
            }
        }
    }

    ExitCode::SUCCESS
}

fn run_signal(config_path: &PathBuf, data_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let score_config = match build_score_config(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let series = match fetch_series(&config, data_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if series.len() < WARMUP_BARS {
        let err = PipsimError::InsufficientData {
            bars: series.len(),
            minimum: WARMUP_BARS,
        };
        eprintln!("error: {err}");
        return (&err).into();
    }

    let bars = series.bars();
    let mut engine = IndicatorEngine::new();
    let mut snapshot = IndicatorSnapshot::default();
    for bar in bars {
        snapshot = engine.update(bar);
    }

    // Non-empty: the warm-up check above guarantees it.
    let last = &bars[bars.len() - 1];
    let result = signal::score(&snapshot, last.close, &score_config);

    println!("timestamp:  {}", last.timestamp.format("%Y-%m-%d %H:%M:%S"));
    println!("close:      {:.5}", last.close);
    println!("signal:     {}", result.kind);
    println!("score:      {}/{}", result.score, result.max_score);
    println!("confidence: {:.0}%", result.confidence() * 100.0);

    if let Some(bands) = &score_config.volatility {
        if let Some(atr) = snapshot.atr {
            println!("volatility: {} (ATR {:.5})", bands.classify(atr), atr);
        }
    }

    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let result = build_data_request(&config)
        .map(|_| ())
        .and_then(|()| build_score_config(&config).map(|_| ()))
        .and_then(|()| build_simulator_config(&config).map(|_| ()));

    match result {
        Ok(()) => {
            eprintln!("Configuration is valid");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(config_path: &PathBuf, data_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let request = match build_data_request(&config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let series = match fetch_series(&config, data_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match (series.bars().first(), series.last()) {
        (Some(first), Some(last)) => {
            println!(
                "{} {}: {} bars, {} to {}",
                request.symbol,
                request.interval,
                series.len(),
                first.timestamp.format("%Y-%m-%d %H:%M:%S"),
                last.timestamp.format("%Y-%m-%d %H:%M:%S"),
            );
        }
        _ => {
            eprintln!("{} {}: no data found", request.symbol, request.interval);
        }
    }

    ExitCode::SUCCESS
}
