//! Plain-text session report adapter.

use std::fmt::Write as _;
use std::fs;

use chrono::Local;

use crate::domain::error::TickersimError;
use crate::domain::metrics::Metrics;
use crate::domain::session::Session;
use crate::ports::report_port::ReportPort;

#[derive(Default)]
pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn new() -> Self {
        TextReportAdapter
    }
}

impl ReportPort for TextReportAdapter {
    fn write(
        &self,
        session: &Session,
        metrics: &Metrics,
        output_path: &str,
    ) -> Result<(), TickersimError> {
        let content = render(session, metrics);
        fs::write(output_path, content)?;
        Ok(())
    }
}

/// Render the session summary as plain text. Writing into a String is
/// infallible, so the fmt results are discarded.
pub fn render(session: &Session, metrics: &Metrics) -> String {
    let mut out = String::new();
    let asset = session.selected_asset();

    let _ = writeln!(out, "Session Report");
    let _ = writeln!(out, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out);

    let _ = writeln!(out, "Selection");
    let _ = writeln!(out, "  Asset:       {} ({})", asset.symbol, asset.name);
    let _ = writeln!(out, "  Timeframe:   {}", session.timeframe());
    let _ = writeln!(out, "  Ref Price:   ${:.2}", asset.price);
    let _ = writeln!(out, "  24h Change:  {:+.2}%", asset.change_24h);
    let _ = writeln!(out);

    let _ = writeln!(out, "Portfolio Metrics");
    let _ = writeln!(out, "  Total Value:  ${:.2}", metrics.total_value);
    let _ = writeln!(out, "  Position P&L: ${:.2}", metrics.pnl);
    let _ = writeln!(out, "  Return:       {:.2}%", metrics.pnl_percent);
    let _ = writeln!(out, "  Daily Change: ${:.2}", metrics.daily_change);
    let _ = writeln!(out);

    let _ = writeln!(out, "Positions");
    for pos in session.positions() {
        let _ = writeln!(
            out,
            "  {:<6} {:>10} @ ${:<10.2} mark ${:<10.2} P&L ${:.2}",
            pos.symbol, pos.quantity, pos.entry_price, pos.current_price, pos.pnl,
        );
    }
    let _ = writeln!(out);

    if let (Some(first), Some(last)) = (session.portfolio().first(), session.portfolio().last()) {
        let _ = writeln!(out, "Portfolio Walk ({} days)", session.portfolio().len());
        let _ = writeln!(out, "  Day {:>2}: ${:.2}", first.day, first.value);
        let _ = writeln!(out, "  Day {:>2}: ${:.2}", last.day, last.value);
        let _ = writeln!(out);
    }

    let path = session.price_history();
    if let (Some(first), Some(last)) = (path.first(), path.last()) {
        let high = path.iter().map(|p| p.price).fold(f64::MIN, f64::max);
        let low = path.iter().map(|p| p.price).fold(f64::MAX, f64::min);
        let _ = writeln!(out, "Price Path ({} points)", path.len());
        let _ = writeln!(out, "  Open:  ${:.2}", first.price);
        let _ = writeln!(out, "  Close: ${:.2}", last.price);
        let _ = writeln!(out, "  High:  ${:.2}", high);
        let _ = writeln!(out, "  Low:   ${:.2}", low);
        let _ = writeln!(out);
    }

    if !session.alerts().is_empty() {
        let _ = writeln!(out, "Recent Activity");
        for entry in session.alerts().entries() {
            let _ = writeln!(out, "  [{}] {}", entry.timestamp, entry.message);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::asset::default_catalog;
    use crate::domain::path::generate_path;
    use crate::domain::position::reference_book;
    use crate::domain::session::{OrderSide, SessionConfig};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::TempDir;

    fn sample_session() -> Session {
        let mut rng = StdRng::seed_from_u64(21);
        let mut session = Session::start(
            &mut rng,
            default_catalog(),
            reference_book(),
            &SessionConfig::default(),
        )
        .unwrap();

        let request = session.request_path();
        let series = generate_path(
            &mut rng,
            request.base_price,
            request.volatility,
            request.point_count,
        );
        session.publish_path(&request, series);
        session.place_order(OrderSide::Buy, 0.25).unwrap();
        session
    }

    #[test]
    fn render_includes_selection_and_metrics() {
        let session = sample_session();
        let metrics = session.metrics();
        let report = render(&session, &metrics);

        assert!(report.contains("BTC (Bitcoin)"));
        assert!(report.contains("Timeframe:   1H"));
        assert!(report.contains(&format!("Total Value:  ${:.2}", metrics.total_value)));
        assert!(report.contains("Price Path (60 points)"));
        assert!(report.contains("Buy order logged: 0.25 BTC"));
    }

    #[test]
    fn render_lists_every_position() {
        let session = sample_session();
        let report = render(&session, &session.metrics());
        for pos in session.positions() {
            assert!(report.contains(&pos.symbol));
        }
    }

    #[test]
    fn write_creates_the_report_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");
        let session = sample_session();

        TextReportAdapter::new()
            .write(&session, &session.metrics(), path.to_str().unwrap())
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Session Report"));
    }
}
