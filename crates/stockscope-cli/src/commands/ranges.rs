use serde::Serialize;
use stockscope_core::{Interval, Period, TimeRange};

use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct RangeRow {
    label: &'static str,
    period: Period,
    interval: Interval,
    default: bool,
}

#[derive(Debug, Serialize)]
struct RangesResponseData {
    ranges: Vec<RangeRow>,
}

pub fn run() -> Result<CommandResult, CliError> {
    let rows: Vec<RangeRow> = TimeRange::ALL
        .into_iter()
        .map(|range| {
            let params = range.query_parameters();
            RangeRow {
                label: range.label(),
                period: params.period,
                interval: params.interval,
                default: range == TimeRange::default(),
            }
        })
        .collect();

    let mut table = vec![format!("{:<10} {:<7} {:<9}", "label", "period", "interval")];
    table.extend(rows.iter().map(|row| {
        let marker = if row.default { "  (default)" } else { "" };
        format!("{:<10} {:<7} {:<9}{marker}", row.label, row.period.as_str(), row.interval.as_str())
    }));

    let data = serde_json::to_value(RangesResponseData { ranges: rows })?;
    Ok(CommandResult::ok(data).with_table(table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_all_ranges_with_one_default() {
        let result = run().expect("ranges");
        let ranges = result.data["ranges"].as_array().expect("array");

        assert_eq!(ranges.len(), 4);
        assert_eq!(ranges[2]["label"], "1 Month");
        assert_eq!(ranges[2]["interval"], "4h");
        assert_eq!(ranges.iter().filter(|row| row["default"] == true).count(), 1);
        assert_eq!(result.table.len(), 5);
    }
}
