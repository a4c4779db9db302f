//! Session state and the delayed-publish protocol.
//!
//! A [`Session`] owns everything the presentation layer reads: the asset
//! catalog, the static position book, the selection state, the generated
//! series, and the activity log. Engine calls stay pure; the session only
//! sequences them. Path publication is guarded by a monotonic generation
//! counter so a slow result can never overwrite a newer selection.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use rand::Rng;

use super::alert::{AlertKind, AlertLog};
use super::asset::Asset;
use super::error::TickersimError;
use super::metrics::Metrics;
use super::path::{DEFAULT_VOLATILITY, PricePoint};
use super::portfolio::{PortfolioPoint, generate_portfolio};
use super::position::Position;
use super::timeframe::Timeframe;

/// Artificial delay the driver honors between issuing a path request and
/// publishing its result, modeling the loading state.
pub const PATH_PUBLISH_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => f.write_str("Buy"),
            OrderSide::Sell => f.write_str("Sell"),
        }
    }
}

impl FromStr for OrderSide {
    type Err = TickersimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(OrderSide::Buy),
            "sell" => Ok(OrderSide::Sell),
            other => Err(TickersimError::InvalidOrder {
                reason: format!("side must be buy or sell, got {other}"),
            }),
        }
    }
}

/// Initial selection and tuning for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub asset: String,
    pub timeframe: Timeframe,
    pub volatility: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            asset: "BTC".to_string(),
            timeframe: Timeframe::default(),
            volatility: DEFAULT_VOLATILITY,
        }
    }
}

/// An outstanding path request. Carries everything the driver needs to run
/// the generator plus the generation number that gates publication.
#[derive(Debug, Clone, PartialEq)]
pub struct PathRequest {
    generation: u64,
    announce: bool,
    pub symbol: String,
    pub base_price: f64,
    pub volatility: f64,
    pub point_count: usize,
}

/// Outcome of [`Session::publish_path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Publish {
    Applied,
    Superseded,
}

#[derive(Debug)]
pub struct Session {
    catalog: Vec<Asset>,
    positions: Vec<Position>,
    selected: usize,
    timeframe: Timeframe,
    volatility: f64,
    portfolio: Vec<PortfolioPoint>,
    price_history: Vec<PricePoint>,
    loading: bool,
    request_seq: u64,
    alerts: AlertLog,
}

impl Session {
    /// Open a session: runs the portfolio walk exactly once and selects the
    /// configured asset. The price history starts empty until the first
    /// request is published.
    pub fn start<R: Rng + ?Sized>(
        rng: &mut R,
        catalog: Vec<Asset>,
        positions: Vec<Position>,
        config: &SessionConfig,
    ) -> Result<Self, TickersimError> {
        let selected = catalog
            .iter()
            .position(|a| a.symbol.eq_ignore_ascii_case(&config.asset))
            .ok_or_else(|| TickersimError::UnknownAsset {
                symbol: config.asset.clone(),
            })?;

        Ok(Session {
            catalog,
            positions,
            selected,
            timeframe: config.timeframe,
            volatility: config.volatility,
            portfolio: generate_portfolio(rng),
            price_history: Vec::new(),
            loading: false,
            request_seq: 0,
            alerts: AlertLog::new(),
        })
    }

    pub fn catalog(&self) -> &[Asset] {
        &self.catalog
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn selected_asset(&self) -> &Asset {
        &self.catalog[self.selected]
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn portfolio(&self) -> &[PortfolioPoint] {
        &self.portfolio
    }

    pub fn price_history(&self) -> &[PricePoint] {
        &self.price_history
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn alerts(&self) -> &AlertLog {
        &self.alerts
    }

    /// Request a path for the current selection.
    pub fn request_path(&mut self) -> PathRequest {
        self.issue_request(false)
    }

    /// Switch the selected asset and request a fresh path for it.
    pub fn select_asset(&mut self, symbol: &str) -> Result<PathRequest, TickersimError> {
        let idx = self
            .catalog
            .iter()
            .position(|a| a.symbol.eq_ignore_ascii_case(symbol))
            .ok_or_else(|| TickersimError::UnknownAsset {
                symbol: symbol.to_string(),
            })?;
        self.selected = idx;
        Ok(self.issue_request(false))
    }

    /// Switch the timeframe and request a fresh path at its resolution.
    pub fn select_timeframe(&mut self, timeframe: Timeframe) -> PathRequest {
        self.timeframe = timeframe;
        self.issue_request(false)
    }

    /// Re-request the current selection. The completion is announced in the
    /// activity log once published.
    pub fn refresh(&mut self) -> PathRequest {
        self.issue_request(true)
    }

    fn issue_request(&mut self, announce: bool) -> PathRequest {
        self.request_seq += 1;
        self.loading = true;
        let asset = &self.catalog[self.selected];
        PathRequest {
            generation: self.request_seq,
            announce,
            symbol: asset.symbol.clone(),
            base_price: asset.price,
            volatility: self.volatility,
            point_count: self.timeframe.point_count(),
        }
    }

    /// Publish a generated path. Applied only when `request` is still the
    /// latest one issued; a superseded result is discarded and the loading
    /// flag stays up for the newer request.
    pub fn publish_path(&mut self, request: &PathRequest, series: Vec<PricePoint>) -> Publish {
        if request.generation != self.request_seq {
            return Publish::Superseded;
        }
        self.price_history = series;
        self.loading = false;
        if request.announce {
            self.alerts.push("Market data refreshed", AlertKind::Info);
        }
        Publish::Applied
    }

    /// Log an order against the selected asset. Nothing executes; the order
    /// only appends to the activity log. Returns the alert id.
    pub fn place_order(&mut self, side: OrderSide, quantity: f64) -> Result<u64, TickersimError> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(TickersimError::InvalidOrder {
                reason: format!("quantity must be positive, got {quantity}"),
            });
        }
        let symbol = &self.catalog[self.selected].symbol;
        let message = format!("{side} order logged: {quantity} {symbol}");
        Ok(self.alerts.push(message, AlertKind::Success))
    }

    /// Summary figures for the current portfolio walk and position book.
    pub fn metrics(&self) -> Metrics {
        Metrics::compute(&self.portfolio, &self.positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::asset::default_catalog;
    use crate::domain::path::generate_path;
    use crate::domain::portfolio::PORTFOLIO_DAYS;
    use crate::domain::position::reference_book;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session(seed: u64) -> Session {
        let mut rng = StdRng::seed_from_u64(seed);
        Session::start(
            &mut rng,
            default_catalog(),
            reference_book(),
            &SessionConfig::default(),
        )
        .unwrap()
    }

    fn fulfil(request: &PathRequest, seed: u64) -> Vec<PricePoint> {
        let mut rng = StdRng::seed_from_u64(seed);
        generate_path(
            &mut rng,
            request.base_price,
            request.volatility,
            request.point_count,
        )
    }

    #[test]
    fn start_rejects_unknown_asset() {
        let mut rng = StdRng::seed_from_u64(0);
        let config = SessionConfig {
            asset: "DOGE".to_string(),
            ..SessionConfig::default()
        };
        let err =
            Session::start(&mut rng, default_catalog(), reference_book(), &config).unwrap_err();
        assert!(matches!(err, TickersimError::UnknownAsset { symbol } if symbol == "DOGE"));
    }

    #[test]
    fn start_runs_the_walk_once_and_leaves_history_empty() {
        let session = session(1);
        assert_eq!(session.portfolio().len(), PORTFOLIO_DAYS);
        assert!(session.price_history().is_empty());
        assert!(!session.is_loading());
    }

    #[test]
    fn request_and_publish_round_trip() {
        let mut session = session(1);
        let request = session.request_path();
        assert!(session.is_loading());
        assert_eq!(request.point_count, 60);
        assert_eq!(request.symbol, "BTC");

        let series = fulfil(&request, 9);
        assert_eq!(session.publish_path(&request, series), Publish::Applied);
        assert!(!session.is_loading());
        assert_eq!(session.price_history().len(), 60);
    }

    #[test]
    fn superseded_publish_is_discarded() {
        let mut session = session(1);
        let stale = session.request_path();
        let fresh = session.select_timeframe(Timeframe::OneWeek);

        let stale_series = fulfil(&stale, 2);
        assert_eq!(
            session.publish_path(&stale, stale_series),
            Publish::Superseded
        );
        assert!(session.price_history().is_empty());
        assert!(session.is_loading());

        let fresh_series = fulfil(&fresh, 3);
        assert_eq!(session.publish_path(&fresh, fresh_series), Publish::Applied);
        assert_eq!(session.price_history().len(), 7);
    }

    #[test]
    fn select_asset_switches_the_base_price() {
        let mut session = session(1);
        let request = session.select_asset("eth").unwrap();
        assert_eq!(request.symbol, "ETH");
        assert!((request.base_price - 2280.75).abs() < f64::EPSILON);
        assert_eq!(session.selected_asset().name, "Ethereum");
    }

    #[test]
    fn select_asset_unknown_symbol_errors_without_state_change() {
        let mut session = session(1);
        assert!(session.select_asset("XRP").is_err());
        assert_eq!(session.selected_asset().symbol, "BTC");
        assert!(!session.is_loading());
    }

    #[test]
    fn refresh_announces_only_when_applied() {
        let mut session = session(1);

        let stale = session.refresh();
        let fresh = session.refresh();

        let stale_series = fulfil(&stale, 4);
        session.publish_path(&stale, stale_series);
        assert!(session.alerts().is_empty());

        let fresh_series = fulfil(&fresh, 5);
        session.publish_path(&fresh, fresh_series);
        assert_eq!(session.alerts().len(), 1);
        assert_eq!(
            session.alerts().latest().unwrap().message,
            "Market data refreshed"
        );
        assert_eq!(session.alerts().latest().unwrap().kind, AlertKind::Info);
    }

    #[test]
    fn path_regeneration_leaves_the_walk_alone() {
        let mut session = session(1);
        let before = session.portfolio().to_vec();

        let request = session.refresh();
        let series = fulfil(&request, 6);
        session.publish_path(&request, series);

        assert_eq!(session.portfolio(), before.as_slice());
    }

    #[test]
    fn order_appends_without_executing() {
        let mut session = session(1);
        let book = session.positions().to_vec();

        session.place_order(OrderSide::Buy, 0.5).unwrap();

        let entry = session.alerts().latest().unwrap();
        assert_eq!(entry.message, "Buy order logged: 0.5 BTC");
        assert_eq!(entry.kind, AlertKind::Success);
        assert_eq!(session.positions(), book.as_slice());
    }

    #[test]
    fn order_rejects_non_positive_quantity() {
        let mut session = session(1);
        assert!(session.place_order(OrderSide::Sell, 0.0).is_err());
        assert!(session.place_order(OrderSide::Sell, -1.0).is_err());
        assert!(session.place_order(OrderSide::Sell, f64::NAN).is_err());
        assert!(session.alerts().is_empty());
    }

    #[test]
    fn metrics_match_direct_computation() {
        let session = session(8);
        let expected = Metrics::compute(session.portfolio(), session.positions());
        assert_eq!(session.metrics(), expected);
    }

    #[test]
    fn order_side_parsing() {
        assert_eq!("buy".parse::<OrderSide>().unwrap(), OrderSide::Buy);
        assert_eq!(" SELL ".parse::<OrderSide>().unwrap(), OrderSide::Sell);
        assert!("hold".parse::<OrderSide>().is_err());
    }
}
