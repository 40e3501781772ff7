//! Performance statistics over a simulated trade list.

use crate::domain::simulator::{Outcome, SimulatedTrade};

/// Pure reduction over the trade record list; recomputed on demand,
/// never mutated incrementally.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceReport {
    pub trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub total_pips: f64,
    pub win_pips: f64,
    pub loss_pips: f64,
    pub profit_factor: f64,
    pub expectancy: f64,
}

impl PerformanceReport {
    pub fn compute(trades: &[SimulatedTrade]) -> Self {
        let mut wins = 0usize;
        let mut total_pips = 0.0_f64;
        let mut win_pips = 0.0_f64;
        let mut loss_pips = 0.0_f64;

        for trade in trades {
            total_pips += trade.pips;
            match trade.outcome {
                Outcome::Win => {
                    wins += 1;
                    win_pips += trade.pips;
                }
                Outcome::Loss => loss_pips += trade.pips.abs(),
            }
        }

        let count = trades.len();
        let losses = count - wins;

        let win_rate = if count > 0 {
            wins as f64 / count as f64
        } else {
            0.0
        };

        let profit_factor = if count == 0 {
            0.0
        } else if loss_pips == 0.0 {
            f64::INFINITY
        } else {
            win_pips / loss_pips
        };

        let expectancy = if count > 0 {
            total_pips / count as f64
        } else {
            0.0
        };

        PerformanceReport {
            trades: count,
            wins,
            losses,
            win_rate,
            total_pips,
            win_pips,
            loss_pips,
            profit_factor,
            expectancy,
        }
    }
}
