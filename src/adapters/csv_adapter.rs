//! CSV file bar data adapter.
//!
//! Bars live in `{symbol}_{interval}.csv` under a base directory, columns
//! `timestamp,open,high,low,close` with `%Y-%m-%d %H:%M:%S` timestamps in
//! ascending order.

use chrono::NaiveDateTime;
use std::fs;
use std::path::PathBuf;

use crate::domain::bar::{Bar, BarSeries};
use crate::domain::error::PipsimError;
use crate::ports::data_port::DataPort;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct CsvBarAdapter {
    base_path: PathBuf,
}

impl CsvBarAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str, interval: &str) -> PathBuf {
        self.base_path.join(format!("{}_{}.csv", symbol, interval))
    }
}

impl DataPort for CsvBarAdapter {
    fn fetch_bars(
        &self,
        symbol: &str,
        interval: &str,
        count: usize,
    ) -> Result<BarSeries, PipsimError> {
        let path = self.csv_path(symbol, interval);
        let content = fs::read_to_string(&path).map_err(|e| PipsimError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| PipsimError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let timestamp_str = record.get(0).ok_or_else(|| PipsimError::Data {
                reason: "missing timestamp column".into(),
            })?;
            let timestamp = NaiveDateTime::parse_from_str(timestamp_str, TIMESTAMP_FORMAT)
                .map_err(|e| PipsimError::Data {
                    reason: format!("invalid timestamp format: {}", e),
                })?;

            let open = parse_price(&record, 1, "open")?;
            let high = parse_price(&record, 2, "high")?;
            let low = parse_price(&record, 3, "low")?;
            let close = parse_price(&record, 4, "close")?;

            bars.push(Bar {
                timestamp,
                open,
                high,
                low,
                close,
            });
        }

        // Only the most recent `count` bars.
        if bars.len() > count {
            bars.drain(..bars.len() - count);
        }

        BarSeries::from_bars(bars)
    }
}

fn parse_price(
    record: &csv::StringRecord,
    index: usize,
    column: &str,
) -> Result<f64, PipsimError> {
    let value: f64 = record
        .get(index)
        .ok_or_else(|| PipsimError::Data {
            reason: format!("missing {} column", column),
        })?
        .parse()
        .map_err(|e| PipsimError::Data {
            reason: format!("invalid {} value: {}", column, e),
        })?;

    // parse::<f64>() accepts "NaN" and "inf"; neither is a price.
    if !value.is_finite() {
        return Err(PipsimError::Data {
            reason: format!("non-finite {} value", column),
        });
    }
    Ok(value)
}
