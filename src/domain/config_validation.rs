//! Typed configuration loading and validation.
//!
//! All thresholds are checked at load time; an invalid combination is a
//! fatal `ConfigInvalid`, never a fault surfaced mid-simulation.

use crate::domain::error::PipsimError;
use crate::domain::signal::{ScoreConfig, VolatilityBands};
use crate::domain::simulator::SimulatorConfig;
use crate::ports::config_port::ConfigPort;

/// What to ask the data source for.
#[derive(Debug, Clone, PartialEq)]
pub struct DataRequest {
    pub symbol: String,
    pub interval: String,
    pub lookback: usize,
}

pub fn build_data_request(config: &dyn ConfigPort) -> Result<DataRequest, PipsimError> {
    let symbol = match config.get_string("data", "symbol") {
        Some(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => {
            return Err(PipsimError::ConfigMissing {
                section: "data".to_string(),
                key: "symbol".to_string(),
            });
        }
    };

    let interval = config
        .get_string("data", "interval")
        .unwrap_or_else(|| "M1".to_string());

    let lookback = config.get_int("data", "lookback", 20_000);
    if lookback < 1 {
        return Err(PipsimError::ConfigInvalid {
            section: "data".to_string(),
            key: "lookback".to_string(),
            reason: "lookback must be at least 1".to_string(),
        });
    }

    Ok(DataRequest {
        symbol,
        interval,
        lookback: lookback as usize,
    })
}

pub fn build_score_config(config: &dyn ConfigPort) -> Result<ScoreConfig, PipsimError> {
    let defaults = ScoreConfig::default();

    let rsi_oversold = config.get_double("signal", "rsi_oversold", defaults.rsi_oversold);
    let rsi_overbought = config.get_double("signal", "rsi_overbought", defaults.rsi_overbought);
    validate_rsi_zones(rsi_oversold, rsi_overbought)?;

    let strong_threshold = config.get_int(
        "signal",
        "strong_threshold",
        defaults.strong_threshold as i64,
    ) as i32;
    let moderate_threshold = config.get_int(
        "signal",
        "moderate_threshold",
        defaults.moderate_threshold as i64,
    ) as i32;
    validate_thresholds(strong_threshold, moderate_threshold)?;

    let volatility = if config.get_bool("volatility", "enabled", false) {
        let low_atr = config.get_double("volatility", "low_atr", 0.00025);
        let high_atr = config.get_double("volatility", "high_atr", 0.00060);
        validate_volatility_bands(low_atr, high_atr)?;
        Some(VolatilityBands { low_atr, high_atr })
    } else {
        None
    };

    Ok(ScoreConfig {
        rsi_oversold,
        rsi_overbought,
        strong_threshold,
        moderate_threshold,
        volatility,
    })
}

pub fn build_simulator_config(config: &dyn ConfigPort) -> Result<SimulatorConfig, PipsimError> {
    let defaults = SimulatorConfig::default();

    let spread = config.get_double("simulator", "spread", defaults.spread);
    if spread < 0.0 {
        return Err(invalid("simulator", "spread", "spread must be non-negative"));
    }

    let tp_dist = config.get_double("simulator", "take_profit", defaults.tp_dist);
    if tp_dist <= 0.0 {
        return Err(invalid(
            "simulator",
            "take_profit",
            "take_profit must be positive",
        ));
    }

    let sl_dist = config.get_double("simulator", "stop_loss", defaults.sl_dist);
    if sl_dist <= 0.0 {
        return Err(invalid(
            "simulator",
            "stop_loss",
            "stop_loss must be positive",
        ));
    }

    let hold_bars = config.get_int("simulator", "hold_bars", defaults.hold_bars as i64);
    if hold_bars < 1 {
        return Err(invalid(
            "simulator",
            "hold_bars",
            "hold_bars must be at least 1",
        ));
    }

    Ok(SimulatorConfig {
        spread,
        tp_dist,
        sl_dist,
        hold_bars: hold_bars as usize,
    })
}

fn validate_rsi_zones(oversold: f64, overbought: f64) -> Result<(), PipsimError> {
    if !(0.0..=100.0).contains(&oversold) {
        return Err(invalid(
            "signal",
            "rsi_oversold",
            "rsi_oversold must be between 0 and 100",
        ));
    }
    if !(0.0..=100.0).contains(&overbought) {
        return Err(invalid(
            "signal",
            "rsi_overbought",
            "rsi_overbought must be between 0 and 100",
        ));
    }
    if oversold >= overbought {
        return Err(invalid(
            "signal",
            "rsi_oversold",
            "rsi_oversold must be below rsi_overbought",
        ));
    }
    Ok(())
}

fn validate_thresholds(strong: i32, moderate: i32) -> Result<(), PipsimError> {
    if moderate < 1 {
        return Err(invalid(
            "signal",
            "moderate_threshold",
            "moderate_threshold must be at least 1",
        ));
    }
    if strong <= moderate {
        return Err(invalid(
            "signal",
            "strong_threshold",
            "strong_threshold must be above moderate_threshold",
        ));
    }
    Ok(())
}

fn validate_volatility_bands(low_atr: f64, high_atr: f64) -> Result<(), PipsimError> {
    if low_atr < 0.0 {
        return Err(invalid(
            "volatility",
            "low_atr",
            "low_atr must be non-negative",
        ));
    }
    if low_atr >= high_atr {
        return Err(invalid(
            "volatility",
            "low_atr",
            "low_atr must be below high_atr",
        ));
    }
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> PipsimError {
    PipsimError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
