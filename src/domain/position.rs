//! Static position book reference data.

use serde::Serialize;

use super::round2;

/// One held position. Immutable reference data for the session: marks are
/// the catalog's reference prices, not the simulated path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Position {
    pub symbol: String,
    pub quantity: f64,
    pub entry_price: f64,
    pub current_price: f64,
    pub pnl: f64,
}

impl Position {
    pub fn new(symbol: &str, quantity: f64, entry_price: f64, current_price: f64) -> Self {
        Position {
            symbol: symbol.to_string(),
            quantity,
            entry_price,
            current_price,
            pnl: round2((current_price - entry_price) * quantity),
        }
    }
}

/// The seeded four-position reference book, marked at the catalog's
/// reference prices.
pub fn reference_book() -> Vec<Position> {
    vec![
        Position::new("BTC", 0.5, 40120.00, 43250.50),
        Position::new("ETH", 4.0, 2405.10, 2280.75),
        Position::new("SOL", 25.0, 88.60, 98.32),
        Position::new("AVAX", 60.0, 41.25, 36.45),
    ]
}
