//! Configuration validation.
//!
//! Validates all simulation config fields before a session runs.

use std::str::FromStr;

use super::error::TickersimError;
use super::path::DEFAULT_VOLATILITY;
use super::timeframe::Timeframe;
use crate::ports::config_port::ConfigPort;

pub fn validate_simulation_config(config: &dyn ConfigPort) -> Result<(), TickersimError> {
    validate_volatility(config)?;
    validate_timeframe(config)?;
    validate_seed(config)?;
    validate_asset(config)?;
    Ok(())
}

fn validate_volatility(config: &dyn ConfigPort) -> Result<(), TickersimError> {
    let value = config.get_double("simulation", "volatility", DEFAULT_VOLATILITY);
    if !(value > 0.0 && value < 1.0) {
        return Err(TickersimError::ConfigInvalid {
            section: "simulation".to_string(),
            key: "volatility".to_string(),
            reason: "volatility must be between 0 and 1 (exclusive)".to_string(),
        });
    }
    Ok(())
}

fn validate_timeframe(config: &dyn ConfigPort) -> Result<(), TickersimError> {
    match config.get_string("simulation", "timeframe") {
        None => Ok(()),
        Some(s) => match Timeframe::from_str(&s) {
            Ok(_) => Ok(()),
            Err(_) => Err(TickersimError::ConfigInvalid {
                section: "simulation".to_string(),
                key: "timeframe".to_string(),
                reason: format!("unknown timeframe {s} (expected 1h, 24h or 7d)"),
            }),
        },
    }
}

fn validate_seed(config: &dyn ConfigPort) -> Result<(), TickersimError> {
    match config.get_string("simulation", "seed") {
        None => Ok(()),
        Some(s) if s.trim().parse::<u64>().is_ok() => Ok(()),
        Some(_) => Err(TickersimError::ConfigInvalid {
            section: "simulation".to_string(),
            key: "seed".to_string(),
            reason: "seed must be a non-negative integer".to_string(),
        }),
    }
}

fn validate_asset(config: &dyn ConfigPort) -> Result<(), TickersimError> {
    match config.get_string("simulation", "asset") {
        Some(s) if s.trim().is_empty() => Err(TickersimError::ConfigInvalid {
            section: "simulation".to_string(),
            key: "asset".to_string(),
            reason: "asset must not be empty".to_string(),
        }),
        // Whether the symbol exists is checked against the catalog at
        // session start.
        _ => Ok(()),
    }
}
