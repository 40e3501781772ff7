//! OHLC bar representation and ordered bar history.

use chrono::NaiveDateTime;

use crate::domain::error::PipsimError;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    /// max(high - low, |high - prev_close|, |low - prev_close|)
    pub fn true_range(&self, prev_close: f64) -> f64 {
        let hl = self.high - self.low;
        let hc = (self.high - prev_close).abs();
        let lc = (self.low - prev_close).abs();
        hl.max(hc).max(lc)
    }
}

/// Ordered OHLC history: strictly increasing timestamps, no duplicates.
#[derive(Debug, Clone, Default)]
pub struct BarSeries {
    bars: Vec<Bar>,
}

impl BarSeries {
    pub fn new() -> Self {
        Self { bars: Vec::new() }
    }

    /// Validates the whole sequence; rejects duplicate or out-of-order timestamps.
    pub fn from_bars(bars: Vec<Bar>) -> Result<Self, PipsimError> {
        let mut series = Self::new();
        for bar in bars {
            series.push(bar)?;
        }
        Ok(series)
    }

    pub fn push(&mut self, bar: Bar) -> Result<(), PipsimError> {
        if let Some(last) = self.bars.last() {
            if bar.timestamp <= last.timestamp {
                return Err(PipsimError::Data {
                    reason: format!(
                        "bar at {} is not after previous bar at {}",
                        bar.timestamp, last.timestamp
                    ),
                });
            }
        }
        self.bars.push(bar);
        Ok(())
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, minute, 0)
            .unwrap()
    }

    fn make_bar(minute: u32, close: f64) -> Bar {
        Bar {
            timestamp: ts(minute),
            open: close,
            high: close,
            low: close,
            close,
        }
    }

    #[test]
    fn true_range_hl_dominates() {
        let bar = Bar {
            timestamp: ts(0),
            open: 1.1000,
            high: 1.1020,
            low: 1.0980,
            close: 1.1010,
        };
        // high-low=0.0040, |high-1.1000|=0.0020, |low-1.1000|=0.0020
        assert!((bar.true_range(1.1000) - 0.0040).abs() < f64::EPSILON);
    }

    #[test]
    fn true_range_gap_up() {
        let bar = Bar {
            timestamp: ts(0),
            open: 1.1000,
            high: 1.1020,
            low: 1.0980,
            close: 1.1010,
        };
        // |1.1020 - 1.0900| = 0.0120 dominates
        assert!((bar.true_range(1.0900) - 0.0120).abs() < 1e-12);
    }

    #[test]
    fn true_range_gap_down() {
        let bar = Bar {
            timestamp: ts(0),
            open: 1.1000,
            high: 1.1020,
            low: 1.0980,
            close: 1.1010,
        };
        // |1.0980 - 1.1100| = 0.0120 dominates
        assert!((bar.true_range(1.1100) - 0.0120).abs() < 1e-12);
    }

    #[test]
    fn push_accepts_increasing_timestamps() {
        let mut series = BarSeries::new();
        series.push(make_bar(0, 1.1)).unwrap();
        series.push(make_bar(1, 1.2)).unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn push_rejects_duplicate_timestamp() {
        let mut series = BarSeries::new();
        series.push(make_bar(0, 1.1)).unwrap();
        let err = series.push(make_bar(0, 1.2)).unwrap_err();
        assert!(matches!(err, PipsimError::Data { .. }));
    }

    #[test]
    fn push_rejects_out_of_order_timestamp() {
        let mut series = BarSeries::new();
        series.push(make_bar(5, 1.1)).unwrap();
        let err = series.push(make_bar(3, 1.2)).unwrap_err();
        assert!(matches!(err, PipsimError::Data { .. }));
    }

    #[test]
    fn from_bars_validates_sequence() {
        let ok = BarSeries::from_bars(vec![make_bar(0, 1.1), make_bar(1, 1.2)]);
        assert!(ok.is_ok());

        let bad = BarSeries::from_bars(vec![make_bar(1, 1.1), make_bar(0, 1.2)]);
        assert!(bad.is_err());
    }

    #[test]
    fn empty_series() {
        let series = BarSeries::new();
        assert!(series.is_empty());
        assert!(series.last().is_none());
    }
}
