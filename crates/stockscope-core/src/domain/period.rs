use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Duration;

use crate::ValidationError;

/// How far back a price query reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "1y")]
    OneYear,
}

impl Period {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneDay => "1d",
            Self::FiveDays => "5d",
            Self::OneMonth => "1mo",
            Self::OneYear => "1y",
        }
    }

    /// Calendar span covered by the period. Months count as 30 days and years as 365.
    pub const fn span(self) -> Duration {
        match self {
            Self::OneDay => Duration::days(1),
            Self::FiveDays => Duration::days(5),
            Self::OneMonth => Duration::days(30),
            Self::OneYear => Duration::days(365),
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1d" => Ok(Self::OneDay),
            "5d" => Ok(Self::FiveDays),
            "1mo" => Ok(Self::OneMonth),
            "1y" => Ok(Self::OneYear),
            other => Err(ValidationError::InvalidPeriod {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_period() {
        assert_eq!(Period::from_str(" 1MO ").expect("must parse"), Period::OneMonth);
    }

    #[test]
    fn rejects_invalid_period() {
        let err = Period::from_str("3mo").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidPeriod { .. }));
    }
}
