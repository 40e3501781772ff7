//! Market data access port trait.

use crate::domain::bar::BarSeries;
use crate::domain::error::PipsimError;

/// Source of historical bars. Implementations must return bars in strictly
/// ascending timestamp order; the core treats a short or empty result as
/// "insufficient data", not a fatal error.
pub trait DataPort {
    /// Fetch up to the most recent `count` bars for a symbol/interval.
    fn fetch_bars(
        &self,
        symbol: &str,
        interval: &str,
        count: usize,
    ) -> Result<BarSeries, PipsimError>;
}
