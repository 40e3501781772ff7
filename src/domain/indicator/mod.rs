//! Technical indicator implementations.
//!
//! Each indicator is an incremental state machine: `update` consumes one bar
//! (or close) in O(1) and returns `None` until the warm-up window has elapsed.
//! Replaying a bar series from a fresh state is fully deterministic.

pub mod ema;
pub mod rsi;
pub mod macd;
pub mod atr;

pub use ema::Ema;
pub use rsi::Rsi;
pub use macd::{Macd, MacdValue};
pub use atr::Atr;

/// Per-bar computed indicator values. A field is `None` until its warm-up
/// window has elapsed; undefined values never participate in comparisons.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IndicatorSnapshot {
    pub ema20: Option<f64>,
    pub ema50: Option<f64>,
    pub ema200: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub atr: Option<f64>,
}
