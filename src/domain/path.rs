//! Synthetic price path generation.

use rand::Rng;
use serde::Serialize;

use super::round2;

/// Volatility applied when the config does not override it.
pub const DEFAULT_VOLATILITY: f64 = 0.02;

/// The trend bias is redrawn every this many steps.
const TREND_REDRAW_INTERVAL: usize = 10;

const VOLUME_SCALE: f64 = 1_000_000.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    pub time: usize,
    pub price: f64,
    pub volume: f64,
}

/// Forward-simulate a single price path with short-run momentum.
///
/// Starting from `base_price`, each step applies a uniform shock biased by a
/// trend term that is redrawn from ±0.25 every tenth step, scaled by
/// `volatility` and the current price. Emitted prices are quoted to cents;
/// the running price keeps full precision between steps. No floor is
/// enforced, so a long path under high volatility can walk below zero — an
/// accepted approximation.
///
/// A `point_count` of zero yields an empty path. Pure given the generator:
/// reseeding reproduces the path exactly.
pub fn generate_path<R: Rng + ?Sized>(
    rng: &mut R,
    base_price: f64,
    volatility: f64,
    point_count: usize,
) -> Vec<PricePoint> {
    let mut points = Vec::with_capacity(point_count);
    let mut price = base_price;
    let mut trend = 0.0;

    for time in 0..point_count {
        if time % TREND_REDRAW_INTERVAL == 0 {
            trend = (rng.random::<f64>() - 0.5) * 0.5;
        }
        let delta = (rng.random::<f64>() - 0.5 + trend) * volatility * price;
        price += delta;
        points.push(PricePoint {
            time,
            price: round2(price),
            volume: rng.random::<f64>() * VOLUME_SCALE,
        });
    }

    points
}
