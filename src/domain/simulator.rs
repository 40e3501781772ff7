//! Path-dependent backtest simulator.
//!
//! For each qualifying historical bar a simulated position is opened at the
//! close plus an adverse spread, then the forward window is scanned for the
//! first take-profit or stop-loss touch. Take-profit is tested before
//! stop-loss within a bar: OHLC data does not reveal the intrabar path, so
//! the tie-break is a pinned policy, not a claim about real tick order.
//! If neither level is touched within the holding window the trade closes
//! at the window-boundary close ("time exit") and is a WIN only on a
//! strictly favorable net move, however small.

use chrono::NaiveDateTime;

use crate::domain::bar::BarSeries;
use crate::domain::engine::WARMUP_BARS;
use crate::domain::indicator::IndicatorSnapshot;
use crate::domain::signal::{self, ScoreConfig, SignalKind};

/// Price-move-to-pips convention for a 4-decimal instrument.
pub const PIP_FACTOR: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Buy => "BUY",
            Direction::Sell => "SELL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "WIN",
            Outcome::Loss => "LOSS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    TakeProfit,
    StopLoss,
    Time,
}

impl ExitReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitReason::TakeProfit => "TP",
            ExitReason::StopLoss => "SL",
            ExitReason::Time => "TIME",
        }
    }
}

/// One closed simulated trade. Immutable once recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedTrade {
    pub open_index: usize,
    pub timestamp: NaiveDateTime,
    pub direction: Direction,
    pub entry_price: f64,
    pub exit_price: f64,
    pub pips: f64,
    pub outcome: Outcome,
    pub exit_reason: ExitReason,
}

/// Simulation parameters. Distances are absolute price offsets, not pips.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    pub spread: f64,
    pub tp_dist: f64,
    pub sl_dist: f64,
    pub hold_bars: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            spread: 0.0001,
            tp_dist: 0.0010,
            sl_dist: 0.0010,
            hold_bars: 15,
        }
    }
}

/// Run the simulation over a series with one precomputed snapshot per bar.
///
/// Iterates from the warm-up boundary to `len - hold_bars` (exclusive), so
/// every opened trade has a full lookahead window; the final `hold_bars`
/// bars never open a trade. A series shorter than `warmup + hold_bars`
/// yields zero trades. `snapshots` must be index-aligned with the series;
/// a length mismatch is a programming fault.
pub fn run_simulation(
    series: &BarSeries,
    snapshots: &[IndicatorSnapshot],
    score_config: &ScoreConfig,
    config: &SimulatorConfig,
) -> Vec<SimulatedTrade> {
    let bars = series.bars();
    assert_eq!(
        bars.len(),
        snapshots.len(),
        "snapshots must be aligned with the bar series"
    );

    let mut trades = Vec::new();
    let last_open = bars.len().saturating_sub(config.hold_bars);

    for i in WARMUP_BARS..last_open {
        let signal = signal::score(&snapshots[i], bars[i].close, score_config);
        let direction = match signal.kind {
            SignalKind::StrongBuy | SignalKind::Buy => Direction::Buy,
            SignalKind::StrongSell | SignalKind::Sell => Direction::Sell,
            SignalKind::Neutral => continue,
        };

        trades.push(simulate_trade(series, i, direction, config));
    }

    trades
}

/// Resolve one trade opened at `open_index`; the lookahead window must be
/// fully inside the series.
fn simulate_trade(
    series: &BarSeries,
    open_index: usize,
    direction: Direction,
    config: &SimulatorConfig,
) -> SimulatedTrade {
    let bars = series.bars();
    let bar = &bars[open_index];

    // Spread is always adverse to the trader.
    let entry = match direction {
        Direction::Buy => bar.close + config.spread,
        Direction::Sell => bar.close - config.spread,
    };

    let mut exit_price = None;
    let mut exit_reason = ExitReason::Time;

    for j in 1..=config.hold_bars {
        let future = &bars[open_index + j];
        let (tp_hit, sl_hit) = match direction {
            Direction::Buy => (
                future.high >= entry + config.tp_dist,
                future.low <= entry - config.sl_dist,
            ),
            Direction::Sell => (
                future.low <= entry - config.tp_dist,
                future.high >= entry + config.sl_dist,
            ),
        };

        // TP before SL: the same-bar race resolves in the trader's favor.
        if tp_hit {
            exit_price = Some(match direction {
                Direction::Buy => entry + config.tp_dist,
                Direction::Sell => entry - config.tp_dist,
            });
            exit_reason = ExitReason::TakeProfit;
            break;
        }
        if sl_hit {
            exit_price = Some(match direction {
                Direction::Buy => entry - config.sl_dist,
                Direction::Sell => entry + config.sl_dist,
            });
            exit_reason = ExitReason::StopLoss;
            break;
        }
    }

    let exit_price = exit_price.unwrap_or_else(|| bars[open_index + config.hold_bars].close);

    let pips = match direction {
        Direction::Buy => (exit_price - entry) * PIP_FACTOR,
        Direction::Sell => (entry - exit_price) * PIP_FACTOR,
    };

    let outcome = match exit_reason {
        ExitReason::TakeProfit => Outcome::Win,
        ExitReason::StopLoss => Outcome::Loss,
        // Time exit: strictly favorable net move wins, regardless of how
        // far short of the TP distance it stopped.
        ExitReason::Time => {
            if pips > 0.0 {
                Outcome::Win
            } else {
                Outcome::Loss
            }
        }
    };

    SimulatedTrade {
        open_index,
        timestamp: bar.timestamp,
        direction,
        entry_price: entry,
        exit_price,
        pips,
        outcome,
        exit_reason,
    }
}
