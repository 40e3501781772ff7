//! ATR (Average True Range) indicator.
//!
//! TrueRange[t] = max(high-low, |high-prev_close|, |low-prev_close|);
//! ATR is the plain arithmetic mean of the last n true ranges over a ring
//! buffer, NOT Wilder-smoothed. The simple-mean form is what the volatility
//! regime filter is calibrated against.
//!
//! A true range needs a previous close, so TR exists from bar 1 and ATR is
//! defined from bar index n.

use std::collections::VecDeque;

use crate::domain::bar::Bar;

/// Incremental ATR state. One `update` per bar, O(1) amortized.
#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    prev_close: Option<f64>,
    window: VecDeque<f64>,
    sum: f64,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "ATR period must be positive");
        Self {
            period,
            prev_close: None,
            window: VecDeque::with_capacity(period + 1),
            sum: 0.0,
        }
    }

    pub fn update(&mut self, bar: &Bar) -> Option<f64> {
        if let Some(prev_close) = self.prev_close {
            let tr = bar.true_range(prev_close);
            self.window.push_back(tr);
            self.sum += tr;
            if self.window.len() > self.period {
                if let Some(oldest) = self.window.pop_front() {
                    self.sum -= oldest;
                }
            }
        }
        self.prev_close = Some(bar.close);
        self.value()
    }

    pub fn value(&self) -> Option<f64> {
        if self.window.len() == self.period {
            Some(self.sum / self.period as f64)
        } else {
            None
        }
    }
}
