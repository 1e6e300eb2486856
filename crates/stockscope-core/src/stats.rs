//! Descriptive statistics over a single [`PriceSeries`].
//!
//! Both reducers are pure: they borrow one series and derive fresh values
//! from it, so figures for different tickers are never mixed.

use serde::{Deserialize, Serialize};

use crate::{PriceSeries, StatsError, UtcDateTime};

/// Summary of one ticker's closing prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    pub max_time: UtcDateTime,
    pub min_time: UtcDateTime,
}

/// Trailing moving average of closes for one window size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverage {
    pub window: usize,
    pub values: Vec<Option<f64>>,
}

impl MovingAverage {
    pub fn compute(series: &PriceSeries, window: usize) -> Result<Self, StatsError> {
        Ok(Self {
            window,
            values: moving_average(series, window)?,
        })
    }

    /// Most recent defined value, if the series is at least `window` long.
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }
}

/// Reduce a series to mean, max and min with the timestamps of the extremes.
///
/// Ties keep the earliest point in sequence order.
pub fn summarize(series: &PriceSeries) -> Result<SummaryStats, StatsError> {
    let (first, rest) = series
        .points
        .split_first()
        .ok_or_else(|| StatsError::EmptySeries {
            symbol: series.symbol.to_string(),
        })?;

    let mut sum = first.close;
    let mut max = first;
    let mut min = first;
    for point in rest {
        sum += point.close;
        if point.close > max.close {
            max = point;
        }
        if point.close < min.close {
            min = point;
        }
    }

    let count = series.points.len();
    Ok(SummaryStats {
        count,
        mean: sum / count as f64,
        max: max.close,
        min: min.close,
        max_time: max.timestamp,
        min_time: min.timestamp,
    })
}

/// Reject window sizes that can never produce an average.
pub fn validate_window(window: usize) -> Result<(), StatsError> {
    if window == 0 {
        return Err(StatsError::InvalidWindow { window });
    }
    Ok(())
}

/// Rolling mean of closes over `window` points.
///
/// The output is aligned with the input; the first `window - 1` positions are
/// `None` because the window is not yet full.
pub fn moving_average(series: &PriceSeries, window: usize) -> Result<Vec<Option<f64>>, StatsError> {
    validate_window(window)?;

    let closes: Vec<f64> = series.closes().collect();
    let mut values = Vec::with_capacity(closes.len());
    let mut sum = 0.0;
    for (index, close) in closes.iter().enumerate() {
        sum += close;
        if index >= window {
            sum -= closes[index - window];
        }
        if index + 1 >= window {
            values.push(Some(sum / window as f64));
        } else {
            values.push(None);
        }
    }

    Ok(values)
}
