#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use pipsim::domain::bar::{Bar, BarSeries};
use pipsim::domain::error::PipsimError;
use pipsim::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<Bar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<Bar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_bars(
        &self,
        symbol: &str,
        _interval: &str,
        count: usize,
    ) -> Result<BarSeries, PipsimError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(PipsimError::Data {
                reason: reason.clone(),
            });
        }
        let mut bars = self.data.get(symbol).cloned().unwrap_or_default();
        if bars.len() > count {
            bars.drain(..bars.len() - count);
        }
        BarSeries::from_bars(bars)
    }
}

pub fn timestamp(minute: usize) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + Duration::minutes(minute as i64)
}

pub fn make_bar(minute: usize, close: f64) -> Bar {
    Bar {
        timestamp: timestamp(minute),
        open: close,
        high: close + 0.0002,
        low: close - 0.0002,
        close,
    }
}

pub fn flat_bar(minute: usize, price: f64) -> Bar {
    Bar {
        timestamp: timestamp(minute),
        open: price,
        high: price,
        low: price,
        close: price,
    }
}

/// Mildly oscillating series around a base price; enough variation to keep
/// every indicator live without ever being flat.
pub fn generate_bars(len: usize, base: f64) -> Vec<Bar> {
    (0..len)
        .map(|i| make_bar(i, base + ((i * 7) % 13) as f64 * 0.0002))
        .collect()
}
