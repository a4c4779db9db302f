//! Asset catalog reference data.

use serde::Serialize;

/// One tradeable asset as shown in the market list. The `price` is the
/// reference price a fresh path starts from; `volume` and `market_cap` are
/// display labels, not simulated quantities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Asset {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change_24h: f64,
    pub volume: String,
    pub market_cap: String,
}

impl Asset {
    pub fn new(
        symbol: &str,
        name: &str,
        price: f64,
        change_24h: f64,
        volume: &str,
        market_cap: &str,
    ) -> Self {
        Asset {
            symbol: symbol.to_string(),
            name: name.to_string(),
            price,
            change_24h,
            volume: volume.to_string(),
            market_cap: market_cap.to_string(),
        }
    }
}

/// The seeded four-asset catalog.
pub fn default_catalog() -> Vec<Asset> {
    vec![
        Asset::new("BTC", "Bitcoin", 43250.50, 2.45, "28.5B", "845B"),
        Asset::new("ETH", "Ethereum", 2280.75, -1.23, "15.2B", "274B"),
        Asset::new("SOL", "Solana", 98.32, 5.67, "2.8B", "42B"),
        Asset::new("AVAX", "Avalanche", 36.45, -2.89, "845M", "13.4B"),
    ]
}

/// Case-insensitive catalog lookup.
pub fn find<'a>(catalog: &'a [Asset], symbol: &str) -> Option<&'a Asset> {
    catalog.iter().find(|a| a.symbol.eq_ignore_ascii_case(symbol))
}
