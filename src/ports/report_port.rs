//! Report generation port trait.

use crate::domain::error::TickersimError;
use crate::domain::metrics::Metrics;
use crate::domain::session::Session;

/// Port for writing session summary reports.
pub trait ReportPort {
    fn write(
        &self,
        session: &Session,
        metrics: &Metrics,
        output_path: &str,
    ) -> Result<(), TickersimError>;
}
