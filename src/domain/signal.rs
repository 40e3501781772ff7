//! Confluence signal scoring.
//!
//! Each filter votes +1, -1 or 0; the accumulated score is classified into
//! a directional signal. A snapshot with any required field still in
//! warm-up refuses to score and yields `Neutral` — undefined indicator
//! values never reach a comparison.

use crate::domain::indicator::IndicatorSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    StrongBuy,
    Buy,
    Sell,
    StrongSell,
    Neutral,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::StrongBuy => "STRONG_BUY",
            SignalKind::Buy => "BUY",
            SignalKind::Sell => "SELL",
            SignalKind::StrongSell => "STRONG_SELL",
            SignalKind::Neutral => "NEUTRAL",
        }
    }
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signal {
    pub kind: SignalKind,
    pub score: i32,
    pub max_score: i32,
}

impl Signal {
    pub fn neutral(max_score: i32) -> Self {
        Self {
            kind: SignalKind::Neutral,
            score: 0,
            max_score,
        }
    }

    /// |score| / max_score, as a fraction in [0, 1].
    pub fn confidence(&self) -> f64 {
        self.score.unsigned_abs() as f64 / self.max_score as f64
    }

    pub fn is_actionable(&self) -> bool {
        self.kind != SignalKind::Neutral
    }
}

/// ATR regime relative to the configured bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolatilityRegime {
    Low,
    Normal,
    High,
}

impl std::fmt::Display for VolatilityRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            VolatilityRegime::Low => "LOW",
            VolatilityRegime::Normal => "NORMAL",
            VolatilityRegime::High => "HIGH",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilityBands {
    pub low_atr: f64,
    pub high_atr: f64,
}

impl VolatilityBands {
    pub fn classify(&self, atr: f64) -> VolatilityRegime {
        if atr > self.high_atr {
            VolatilityRegime::High
        } else if atr < self.low_atr {
            VolatilityRegime::Low
        } else {
            VolatilityRegime::Normal
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreConfig {
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub strong_threshold: i32,
    pub moderate_threshold: i32,
    /// Enables the fifth (volatility regime) filter when set.
    pub volatility: Option<VolatilityBands>,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        ScoreConfig {
            rsi_oversold: 40.0,
            rsi_overbought: 60.0,
            strong_threshold: 3,
            moderate_threshold: 2,
            volatility: None,
        }
    }
}

impl ScoreConfig {
    /// Number of active filters: 4, or 5 with the volatility filter.
    pub fn max_score(&self) -> i32 {
        if self.volatility.is_some() { 5 } else { 4 }
    }
}

/// Score one bar's snapshot against its close.
pub fn score(snapshot: &IndicatorSnapshot, close: f64, config: &ScoreConfig) -> Signal {
    let max_score = config.max_score();

    let (Some(ema20), Some(ema50), Some(ema200), Some(rsi), Some(macd), Some(macd_signal)) = (
        snapshot.ema20,
        snapshot.ema50,
        snapshot.ema200,
        snapshot.rsi,
        snapshot.macd,
        snapshot.macd_signal,
    ) else {
        return Signal::neutral(max_score);
    };

    let mut total = 0;

    // Trend
    total += if close > ema200 { 1 } else { -1 };
    // Crossover
    total += if ema20 > ema50 { 1 } else { -1 };
    // Momentum
    total += if macd > macd_signal { 1 } else { -1 };
    // Oscillator zone
    total += if rsi < config.rsi_oversold {
        1
    } else if rsi > config.rsi_overbought {
        -1
    } else {
        0
    };

    // Volatility regime (configuration-gated fifth filter)
    if let Some(bands) = &config.volatility {
        let Some(atr) = snapshot.atr else {
            return Signal::neutral(max_score);
        };
        total += match bands.classify(atr) {
            VolatilityRegime::High => 1,
            VolatilityRegime::Low => -1,
            VolatilityRegime::Normal => 0,
        };
    }

    Signal {
        kind: classify(total, config),
        score: total,
        max_score,
    }
}

/// Strong thresholds take priority over moderate; the moderate BUY/SELL
/// tier only exists in the 4-filter variant.
fn classify(total: i32, config: &ScoreConfig) -> SignalKind {
    if total >= config.strong_threshold {
        SignalKind::StrongBuy
    } else if total <= -config.strong_threshold {
        SignalKind::StrongSell
    } else if config.volatility.is_none() && total == config.moderate_threshold {
        SignalKind::Buy
    } else if config.volatility.is_none() && total == -config.moderate_threshold {
        SignalKind::Sell
    } else {
        SignalKind::Neutral
    }
}
