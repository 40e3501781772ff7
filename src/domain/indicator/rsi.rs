//! RSI (Relative Strength Index) indicator.
//!
//! Uses Wilder's smoothing for average gain/loss:
//! - First averages: simple mean of gains/losses over the first n changes
//! - Subsequent: avg = avg_prev + (1/n) * (value - avg_prev)
//!
//! RSI = 100 - 100/(1 + avg_gain/avg_loss).
//! Edge cases are explicit, never a division fault:
//! - avg_loss == 0 and avg_gain > 0  => RSI = 100
//! - avg_loss == 0 and avg_gain == 0 => RSI = 50
//!
//! Warmup: n price changes are needed, so the first n bars are undefined.

/// Incremental Wilder RSI state. One `update` per bar close, O(1).
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    prev_close: Option<f64>,
    seed_gain_sum: f64,
    seed_loss_sum: f64,
    seed_count: usize,
    averages: Option<(f64, f64)>,
    value: Option<f64>,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "RSI period must be positive");
        Self {
            period,
            prev_close: None,
            seed_gain_sum: 0.0,
            seed_loss_sum: 0.0,
            seed_count: 0,
            averages: None,
            value: None,
        }
    }

    pub fn update(&mut self, close: f64) -> Option<f64> {
        let Some(prev) = self.prev_close else {
            self.prev_close = Some(close);
            return None;
        };
        self.prev_close = Some(close);

        let change = close - prev;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        match self.averages {
            Some((avg_gain, avg_loss)) => {
                let n = self.period as f64;
                let next_gain = avg_gain + (gain - avg_gain) / n;
                let next_loss = avg_loss + (loss - avg_loss) / n;
                self.averages = Some((next_gain, next_loss));
                self.value = Some(Self::rsi_from(next_gain, next_loss));
            }
            None => {
                self.seed_gain_sum += gain;
                self.seed_loss_sum += loss;
                self.seed_count += 1;
                if self.seed_count == self.period {
                    let avg_gain = self.seed_gain_sum / self.period as f64;
                    let avg_loss = self.seed_loss_sum / self.period as f64;
                    self.averages = Some((avg_gain, avg_loss));
                    self.value = Some(Self::rsi_from(avg_gain, avg_loss));
                }
            }
        }
        self.value
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    fn rsi_from(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            if avg_gain > 0.0 { 100.0 } else { 50.0 }
        } else {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay(prices: &[f64], period: usize) -> Vec<Option<f64>> {
        let mut rsi = Rsi::new(period);
        prices.iter().map(|&c| rsi.update(c)).collect()
    }

    #[test]
    fn rsi_single_bar_undefined() {
        let values = replay(&[100.0], 14);
        assert!(values[0].is_none());
    }

    #[test]
    fn rsi_warmup_period() {
        let prices: Vec<f64> = (0..15).map(|i| 100.0 + (i % 5) as f64 * 2.0).collect();
        let values = replay(&prices, 14);

        for (i, value) in values.iter().enumerate().take(14) {
            assert!(value.is_none(), "bar {} should be undefined", i);
        }
        assert!(values[14].is_some(), "bar 14 should be defined");
    }

    #[test]
    fn rsi_all_gains_is_100() {
        let prices: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
        let values = replay(&prices, 14);
        assert!((values[14].unwrap() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rsi_all_losses_is_0() {
        let prices: Vec<f64> = (0..15).map(|i| 100.0 - i as f64).collect();
        let values = replay(&prices, 14);
        assert!((values[14].unwrap() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rsi_flat_prices_is_neutral_50() {
        let values = replay(&[100.0; 16], 14);
        assert!((values[14].unwrap() - 50.0).abs() < f64::EPSILON);
        assert!((values[15].unwrap() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rsi_in_range() {
        let prices: Vec<f64> = (0..30)
            .map(|i| 100.0 + ((i % 7) as f64 - 3.0) * 2.0)
            .collect();
        let values = replay(&prices, 14);

        for value in values.into_iter().flatten() {
            assert!((0.0..=100.0).contains(&value), "RSI {} out of range", value);
        }
    }

    #[test]
    fn rsi_wilder_smoothing_step() {
        // 3 gains of 1.0 seed avg_gain=1.0, avg_loss=0.0; then a loss of 2.0.
        let values = replay(&[100.0, 101.0, 102.0, 103.0, 101.0], 3);

        let avg_gain = 1.0 + (0.0 - 1.0) / 3.0;
        let avg_loss = 0.0 + (2.0 - 0.0) / 3.0;
        let expected = 100.0 - 100.0 / (1.0 + avg_gain / avg_loss);
        assert!((values[4].unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn rsi_known_calculation_bullish() {
        let prices = [
            44.0, 44.25, 44.5, 43.75, 44.5, 44.25, 44.75, 45.25, 45.5, 45.25, 45.5, 46.0, 46.25,
            46.0, 46.5,
        ];
        let values = replay(&prices, 14);

        let rsi = values[14].unwrap();
        assert!(rsi > 50.0 && rsi < 100.0, "RSI {} not in bullish territory", rsi);
    }
}
