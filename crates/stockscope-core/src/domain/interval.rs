use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Duration;

use crate::ValidationError;

/// Sampling granularity of a fetched price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "1wk")]
    OneWeek,
}

impl Interval {
    pub const ALL: [Self; 4] = [
        Self::FiveMinutes,
        Self::ThirtyMinutes,
        Self::FourHours,
        Self::OneWeek,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FiveMinutes => "5m",
            Self::ThirtyMinutes => "30m",
            Self::FourHours => "4h",
            Self::OneWeek => "1wk",
        }
    }

    /// Wall-clock length of one sample.
    pub const fn duration(self) -> Duration {
        match self {
            Self::FiveMinutes => Duration::minutes(5),
            Self::ThirtyMinutes => Duration::minutes(30),
            Self::FourHours => Duration::hours(4),
            Self::OneWeek => Duration::weeks(1),
        }
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "5m" => Ok(Self::FiveMinutes),
            "30m" => Ok(Self::ThirtyMinutes),
            "4h" => Ok(Self::FourHours),
            "1wk" => Ok(Self::OneWeek),
            other => Err(ValidationError::InvalidInterval {
                value: other.to_owned(),
            }),
        }
    }
}
