//! CSV series export adapter.

use std::path::Path;

use serde::Serialize;

use crate::domain::error::TickersimError;
use crate::domain::path::PricePoint;
use crate::domain::portfolio::PortfolioPoint;
use crate::ports::export_port::ExportPort;

#[derive(Default)]
pub struct CsvExportAdapter;

impl CsvExportAdapter {
    pub fn new() -> Self {
        CsvExportAdapter
    }
}

/// Serialize records to a CSV file, headers included.
pub fn write_series<T: Serialize>(records: &[T], path: &Path) -> Result<(), TickersimError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| TickersimError::Export {
        reason: format!("failed to open {}: {}", path.display(), e),
    })?;
    for record in records {
        writer.serialize(record).map_err(|e| TickersimError::Export {
            reason: format!("CSV write error: {e}"),
        })?;
    }
    writer.flush()?;
    Ok(())
}

impl ExportPort for CsvExportAdapter {
    fn export_prices(
        &self,
        series: &[PricePoint],
        output_path: &Path,
    ) -> Result<(), TickersimError> {
        write_series(series, output_path)
    }

    fn export_portfolio(
        &self,
        series: &[PortfolioPoint],
        output_path: &Path,
    ) -> Result<(), TickersimError> {
        write_series(series, output_path)
    }
}
