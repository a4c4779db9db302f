//! Derived P&L metrics.

use serde::Serialize;

use super::portfolio::{INITIAL_VALUE, PortfolioPoint};
use super::position::Position;
use super::round2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub total_value: f64,
    pub pnl: f64,
    pub pnl_percent: f64,
    pub daily_change: f64,
}

impl Metrics {
    /// The defined default for an empty portfolio series.
    pub fn zeroed() -> Self {
        Metrics {
            total_value: 0.0,
            pnl: 0.0,
            pnl_percent: 0.0,
            daily_change: 0.0,
        }
    }

    /// Compute the summary figures from the latest portfolio point and the
    /// static position book.
    ///
    /// `pnl` sums the positions' marks rather than reading the walk's own
    /// pnl; the two figures come from unrelated sources and can diverge.
    pub fn compute(series: &[PortfolioPoint], positions: &[Position]) -> Self {
        let Some(latest) = series.last() else {
            return Metrics::zeroed();
        };

        let total_value = latest.value;
        let pnl = positions.iter().map(|p| p.pnl).sum();
        let pnl_percent = round2((total_value - INITIAL_VALUE) / INITIAL_VALUE * 100.0);
        let daily_change = if series.len() >= 2 {
            latest.value - series[series.len() - 2].value
        } else {
            0.0
        };

        Metrics {
            total_value,
            pnl,
            pnl_percent,
            daily_change,
        }
    }
}
