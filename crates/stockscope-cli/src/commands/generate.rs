use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;
use stockscope_core::{
    GenerateOutcome, PriceSource, QueryParameters, Session, Symbol, TickerReport, TimeRange,
};

use crate::cli::GenerateArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct GenerateResponseData<'a> {
    range: TimeRange,
    params: QueryParameters,
    reports: &'a [TickerReport],
    exported: &'a [PathBuf],
}

pub async fn run<S: PriceSource>(
    args: &GenerateArgs,
    session: &mut Session<S>,
) -> Result<CommandResult, CliError> {
    let symbols = parse_tickers(&args.tickers)?;

    let started = Instant::now();
    let outcome = session
        .generate(symbols, &args.range, &args.moving_averages)
        .await?;
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let exported = match args.export {
        Some(format) => session.export(&args.out_dir, format.into())?,
        None => Vec::new(),
    };

    let data = serde_json::to_value(GenerateResponseData {
        range: outcome.range,
        params: outcome.params,
        reports: &outcome.reports,
        exported: &exported,
    })?;

    let mut result = CommandResult::ok(data)
        .with_table(table_lines(&outcome, &exported))
        .with_latency(latency_ms)
        .with_source(outcome.source);
    if TimeRange::from_label(&args.range).is_none() {
        result = result.with_warning(format!(
            "unrecognized time range '{}', using '{}'",
            args.range, outcome.range
        ));
    }
    Ok(result)
}

/// Split arguments on commas and whitespace, the way a single entry box accepts "AAPL, MSFT".
fn parse_tickers(raw: &[String]) -> Result<Vec<Symbol>, CliError> {
    let symbols = raw
        .iter()
        .flat_map(|arg| arg.split(|ch: char| ch == ',' || ch.is_whitespace()))
        .filter(|token| !token.is_empty())
        .map(Symbol::parse)
        .collect::<Result<Vec<_>, _>>()?;

    if symbols.is_empty() {
        return Err(CliError::Command(String::from("at least one ticker is required")));
    }
    Ok(symbols)
}

fn table_lines(outcome: &GenerateOutcome, exported: &[PathBuf]) -> Vec<String> {
    let mut lines = vec![format!("range     : {} ({})", outcome.range, outcome.params)];

    for report in &outcome.reports {
        let stats = &report.stats;
        lines.push(String::new());
        lines.push(format!("{} ({} points)", report.symbol, stats.count));
        lines.push(format!("  mean    {:>12.4}", stats.mean));
        lines.push(format!("  max     {:>12.4}  at {}", stats.max, stats.max_time));
        lines.push(format!("  min     {:>12.4}  at {}", stats.min, stats.min_time));
        for average in &report.moving_averages {
            let label = format!("ma({})", average.window);
            match average.last() {
                Some(value) => lines.push(format!("  {label:<7} {value:>12.4}  latest")),
                None => lines.push(format!("  {label:<7} {:>12}  window longer than series", "-")),
            }
        }
    }

    if !exported.is_empty() {
        lines.push(String::new());
        lines.push(String::from("exported:"));
        lines.extend(exported.iter().map(|path| format!("  {}", path.display())));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockscope_core::{ExportFormat, SyntheticSource, UtcDateTime};

    use crate::cli::ExportFormatArg;

    fn args(tickers: &[&str], range: &str) -> GenerateArgs {
        GenerateArgs {
            tickers: tickers.iter().map(|t| t.to_string()).collect(),
            range: range.to_string(),
            moving_averages: vec![20],
            export: None,
            out_dir: PathBuf::from("."),
        }
    }

    fn session() -> Session<SyntheticSource> {
        let anchor = UtcDateTime::parse("2024-06-28T20:00:00Z").expect("timestamp");
        Session::new(SyntheticSource::new(anchor))
    }

    #[test]
    fn splits_comma_and_space_separated_tickers() {
        let raw = vec![String::from("aapl, msft"), String::from("GOOG")];
        let symbols = parse_tickers(&raw).expect("valid tickers");
        let names: Vec<&str> = symbols.iter().map(Symbol::as_str).collect();
        assert_eq!(names, vec!["AAPL", "MSFT", "GOOG"]);
    }

    #[test]
    fn blank_ticker_input_is_rejected() {
        let err = parse_tickers(&[String::from(" , ")]).expect_err("must fail");
        assert!(matches!(err, CliError::Command(_)));
    }

    #[tokio::test]
    async fn reports_every_ticker_and_warns_on_fallback() {
        let mut session = session();
        let result = run(&args(&["AAPL,MSFT"], "2 Weeks"), &mut session)
            .await
            .expect("generate succeeds");

        assert_eq!(result.data["reports"].as_array().map(Vec::len), Some(2));
        assert_eq!(result.data["range"], "1 Day");
        assert_eq!(result.data["params"]["interval"], "5m");
        assert_eq!(result.warnings.len(), 1);
        assert!(result.table.iter().any(|line| line.starts_with("MSFT")));
    }

    #[tokio::test]
    async fn exports_when_requested() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut generate = args(&["AAPL"], "1 Month");
        generate.export = Some(ExportFormatArg::Csv);
        generate.out_dir = dir.path().to_path_buf();

        let mut session = session();
        let result = run(&generate, &mut session).await.expect("generate succeeds");

        let expected = dir
            .path()
            .join(stockscope_core::export_file_name(
                &Symbol::parse("AAPL").expect("symbol"),
                stockscope_core::resolve("1 Month"),
                ExportFormat::Csv,
            ));
        assert!(expected.exists());
        assert_eq!(result.data["exported"][0], expected.display().to_string());
        assert!(result.warnings.is_empty());
    }
}
