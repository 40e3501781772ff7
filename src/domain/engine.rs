//! Indicator engine: one snapshot per bar from rolling indicator state.
//!
//! The engine owns the incremental state of every indicator the scorer
//! reads (EMA 20/50/200, RSI 14, MACD 12/26/9, ATR 14). `update` is O(1)
//! per new bar; replaying a full series from an empty engine is
//! deterministic, so no state ever needs persisting.

use crate::domain::bar::Bar;
use crate::domain::indicator::{Atr, Ema, IndicatorSnapshot, Macd, Rsi};

pub const EMA_FAST_PERIOD: usize = 20;
pub const EMA_MID_PERIOD: usize = 50;
pub const EMA_SLOW_PERIOD: usize = 200;
pub const RSI_PERIOD: usize = 14;
pub const ATR_PERIOD: usize = 14;

/// Bars required before every snapshot field is defined. EMA200 dominates
/// all other warm-up windows.
pub const WARMUP_BARS: usize = EMA_SLOW_PERIOD;

#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    ema20: Ema,
    ema50: Ema,
    ema200: Ema,
    rsi: Rsi,
    macd: Macd,
    atr: Atr,
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorEngine {
    pub fn new() -> Self {
        Self {
            ema20: Ema::new(EMA_FAST_PERIOD),
            ema50: Ema::new(EMA_MID_PERIOD),
            ema200: Ema::new(EMA_SLOW_PERIOD),
            rsi: Rsi::new(RSI_PERIOD),
            macd: Macd::with_defaults(),
            atr: Atr::new(ATR_PERIOD),
        }
    }

    /// Advance all indicators by one bar and return the resulting snapshot.
    pub fn update(&mut self, bar: &Bar) -> IndicatorSnapshot {
        let close = bar.close;
        let macd = self.macd.update(close);

        IndicatorSnapshot {
            ema20: self.ema20.update(close),
            ema50: self.ema50.update(close),
            ema200: self.ema200.update(close),
            rsi: self.rsi.update(close),
            macd: macd.map(|m| m.line),
            macd_signal: macd.map(|m| m.signal),
            atr: self.atr.update(bar),
        }
    }

    /// Compute a snapshot for every bar from a fresh engine.
    pub fn replay(bars: &[Bar]) -> Vec<IndicatorSnapshot> {
        let mut engine = Self::new();
        bars.iter().map(|bar| engine.update(bar)).collect()
    }
}
