use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{Interval, Period};

/// Human time-range selection offered to the user.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "1 Day")]
    OneDay,
    #[serde(rename = "5 Days")]
    FiveDays,
    #[serde(rename = "1 Month")]
    OneMonth,
    #[serde(rename = "1 Year")]
    OneYear,
}

impl TimeRange {
    /// Selections in display order.
    pub const ALL: [Self; 4] = [Self::OneDay, Self::FiveDays, Self::OneMonth, Self::OneYear];

    pub const fn label(self) -> &'static str {
        match self {
            Self::OneDay => "1 Day",
            Self::FiveDays => "5 Days",
            Self::OneMonth => "1 Month",
            Self::OneYear => "1 Year",
        }
    }

    /// Match a label, ignoring surrounding whitespace and ASCII case.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|range| range.label().eq_ignore_ascii_case(label))
    }

    pub const fn query_parameters(self) -> QueryParameters {
        match self {
            Self::OneDay => QueryParameters::new(Period::OneDay, Interval::FiveMinutes),
            Self::FiveDays => QueryParameters::new(Period::FiveDays, Interval::ThirtyMinutes),
            Self::OneMonth => QueryParameters::new(Period::OneMonth, Interval::FourHours),
            Self::OneYear => QueryParameters::new(Period::OneYear, Interval::OneWeek),
        }
    }
}

impl Display for TimeRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Provider query pair derived from a [`TimeRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryParameters {
    pub period: Period,
    pub interval: Interval,
}

impl QueryParameters {
    pub const fn new(period: Period, interval: Interval) -> Self {
        Self { period, interval }
    }
}

impl Default for QueryParameters {
    fn default() -> Self {
        TimeRange::default().query_parameters()
    }
}

impl Display for QueryParameters {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.period, self.interval)
    }
}

/// Map a time-range label to query parameters.
///
/// Never fails: labels outside [`TimeRange::ALL`] resolve to the "1 Day"
/// parameters (`1d`/`5m`).
pub fn resolve(label: &str) -> QueryParameters {
    TimeRange::from_label(label)
        .unwrap_or_default()
        .query_parameters()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_every_label() {
        let expected = [
            ("1 Day", Period::OneDay, Interval::FiveMinutes),
            ("5 Days", Period::FiveDays, Interval::ThirtyMinutes),
            ("1 Month", Period::OneMonth, Interval::FourHours),
            ("1 Year", Period::OneYear, Interval::OneWeek),
        ];

        for (label, period, interval) in expected {
            assert_eq!(resolve(label), QueryParameters::new(period, interval), "{label}");
        }
    }

    #[test]
    fn unknown_labels_fall_back_to_one_day() {
        for label in ["", "2 Days", "1 Decade", "1d", "One Year"] {
            assert_eq!(resolve(label), QueryParameters::new(Period::OneDay, Interval::FiveMinutes));
        }
    }

    #[test]
    fn tolerates_case_and_padding() {
        assert_eq!(TimeRange::from_label("  1 year "), Some(TimeRange::OneYear));
        assert_eq!(resolve("5 DAYS").period, Period::FiveDays);
    }

    #[test]
    fn labels_round_trip_through_from_label() {
        for range in TimeRange::ALL {
            assert_eq!(TimeRange::from_label(range.label()), Some(range));
        }
    }
}
