//! Report generation port trait.

use crate::domain::error::PipsimError;
use crate::domain::report::PerformanceReport;
use crate::domain::simulator::SimulatedTrade;

/// Sink for backtest results. The report and the trade records are plain
/// data; how they are rendered is the adapter's business.
pub trait ReportPort {
    fn write(
        &self,
        report: &PerformanceReport,
        trades: &[SimulatedTrade],
        output_path: &str,
    ) -> Result<(), PipsimError>;
}
