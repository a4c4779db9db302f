//! Session portfolio walk.

use rand::Rng;
use serde::Serialize;

use super::round2;

/// Account value every walk starts from.
pub const INITIAL_VALUE: f64 = 100_000.0;

/// Length of the walk in days.
pub const PORTFOLIO_DAYS: usize = 30;

/// Uniform draws below this bias shrink the account, giving the walk a
/// slight negative drift.
const DRIFT_BIAS: f64 = 0.48;

const DAILY_SCALE: f64 = 0.02;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioPoint {
    pub day: usize,
    pub value: f64,
    pub pnl: f64,
}

/// Simulate the 30-day account-value trajectory.
///
/// A multiplicative random walk: each day moves the value by up to ±2% of
/// itself, centered slightly below the midpoint. Generated once per session
/// and never regenerated on asset or timeframe changes. `pnl` is always the
/// quoted value minus [`INITIAL_VALUE`].
pub fn generate_portfolio<R: Rng + ?Sized>(rng: &mut R) -> Vec<PortfolioPoint> {
    let mut points = Vec::with_capacity(PORTFOLIO_DAYS);
    let mut value = INITIAL_VALUE;

    for day in 0..PORTFOLIO_DAYS {
        value += (rng.random::<f64>() - DRIFT_BIAS) * value * DAILY_SCALE;
        let quoted = round2(value);
        points.push(PortfolioPoint {
            day,
            value: quoted,
            pnl: quoted - INITIAL_VALUE,
        });
    }

    points
}
