//! MACD (Moving Average Convergence Divergence) indicator.
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of the MACD line
//!
//! Default parameters: fast=12, slow=26, signal=9.
//! The line is defined once both EMAs are (slow - 1 bars); the signal EMA
//! is seeded over the first `signal` defined line values, so the full pair
//! is defined after slow - 1 + signal - 1 bars.

use crate::domain::indicator::Ema;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdValue {
    pub line: f64,
    pub signal: f64,
}

/// Incremental MACD state composed of three EMAs. One `update` per bar, O(1).
#[derive(Debug, Clone)]
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
    line: Option<f64>,
    signal_value: Option<f64>,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            fast: Ema::new(fast),
            slow: Ema::new(slow),
            signal: Ema::new(signal),
            line: None,
            signal_value: None,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
    }

    /// Returns `Some` only once both the line and its signal are defined.
    pub fn update(&mut self, close: f64) -> Option<MacdValue> {
        let fast = self.fast.update(close);
        let slow = self.slow.update(close);

        if let (Some(fast), Some(slow)) = (fast, slow) {
            let line = fast - slow;
            self.line = Some(line);
            self.signal_value = self.signal.update(line);
        }

        self.value()
    }

    pub fn value(&self) -> Option<MacdValue> {
        match (self.line, self.signal_value) {
            (Some(line), Some(signal)) => Some(MacdValue { line, signal }),
            _ => None,
        }
    }

    /// The line alone, defined earlier than the signal.
    pub fn line(&self) -> Option<f64> {
        self.line
    }
}
