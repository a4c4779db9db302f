//! Domain error types.

/// Top-level error type for tickersim.
#[derive(Debug, thiserror::Error)]
pub enum TickersimError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown asset {symbol}")]
    UnknownAsset { symbol: String },

    #[error("unknown timeframe {value} (expected 1h, 24h or 7d)")]
    UnknownTimeframe { value: String },

    #[error("invalid order: {reason}")]
    InvalidOrder { reason: String },

    #[error("export error: {reason}")]
    Export { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TickersimError> for std::process::ExitCode {
    fn from(err: &TickersimError) -> Self {
        let code: u8 = match err {
            TickersimError::Io(_) => 1,
            TickersimError::ConfigParse { .. } | TickersimError::ConfigInvalid { .. } => 2,
            TickersimError::UnknownAsset { .. } | TickersimError::UnknownTimeframe { .. } => 3,
            TickersimError::InvalidOrder { .. } => 4,
            TickersimError::Export { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
