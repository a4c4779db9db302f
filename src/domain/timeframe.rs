//! Chart timeframe selection and its path-length mapping.

use std::fmt;
use std::str::FromStr;

use super::error::TickersimError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeframe {
    #[default]
    OneHour,
    OneDay,
    OneWeek,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::OneHour, Timeframe::OneDay, Timeframe::OneWeek];

    /// Number of points a generated path carries at this resolution.
    pub fn point_count(&self) -> usize {
        match self {
            Timeframe::OneHour => 60,
            Timeframe::OneDay => 24,
            Timeframe::OneWeek => 7,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::OneHour => "1H",
            Timeframe::OneDay => "24H",
            Timeframe::OneWeek => "7D",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Timeframe {
    type Err = TickersimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1h" => Ok(Timeframe::OneHour),
            "24h" => Ok(Timeframe::OneDay),
            "7d" => Ok(Timeframe::OneWeek),
            _ => Err(TickersimError::UnknownTimeframe {
                value: s.to_string(),
            }),
        }
    }
}
