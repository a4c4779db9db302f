//! Series export port trait.

use std::path::Path;

use crate::domain::error::TickersimError;
use crate::domain::path::PricePoint;
use crate::domain::portfolio::PortfolioPoint;

/// Port for writing generated series to files the presentation layer can
/// load.
pub trait ExportPort {
    fn export_prices(&self, series: &[PricePoint], output_path: &Path)
    -> Result<(), TickersimError>;

    fn export_portfolio(
        &self,
        series: &[PortfolioPoint],
        output_path: &Path,
    ) -> Result<(), TickersimError>;
}
