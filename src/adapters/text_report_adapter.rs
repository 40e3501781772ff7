//! Plain-text report file adapter.

use std::fmt::Write as _;
use std::fs;

use crate::domain::error::PipsimError;
use crate::domain::report::PerformanceReport;
use crate::domain::simulator::SimulatedTrade;
use crate::ports::report_port::ReportPort;

pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn new() -> Self {
        Self
    }

    fn render(report: &PerformanceReport, trades: &[SimulatedTrade]) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "=== Backtest Report ===");
        let _ = writeln!(out, "Trades:        {}", report.trades);
        let _ = writeln!(out, "Wins:          {}", report.wins);
        let _ = writeln!(out, "Losses:        {}", report.losses);
        let _ = writeln!(out, "Win rate:      {:.2}%", report.win_rate * 100.0);
        let _ = writeln!(out, "Total pips:    {:.1}", report.total_pips);
        let _ = writeln!(out, "Profit factor: {:.2}", report.profit_factor);
        let _ = writeln!(out, "Expectancy:    {:.2} pips/trade", report.expectancy);

        if !trades.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "{:<20} {:<5} {:>9} {:>9} {:>7}  {:<5} {}",
                "timestamp", "dir", "entry", "exit", "pips", "exit", "result"
            );
            for trade in trades {
                let _ = writeln!(
                    out,
                    "{:<20} {:<5} {:>9.5} {:>9.5} {:>7.1}  {:<5} {}",
                    trade.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    trade.direction.as_str(),
                    trade.entry_price,
                    trade.exit_price,
                    trade.pips,
                    trade.exit_reason.as_str(),
                    trade.outcome.as_str(),
                );
            }
        }

        out
    }
}

impl Default for TextReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for TextReportAdapter {
    fn write(
        &self,
        report: &PerformanceReport,
        trades: &[SimulatedTrade],
        output_path: &str,
    ) -> Result<(), PipsimError> {
        fs::write(output_path, Self::render(report, trades))?;
        Ok(())
    }
}
