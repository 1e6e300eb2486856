use serde::Serialize;
use serde_json::Value;
use stockscope_core::{SourceId, UtcDateTime};

use crate::cli::OutputFormat;
use crate::commands::CommandResult;
use crate::error::CliError;

/// Metadata printed alongside every command payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceId>,
    pub generated_at: UtcDateTime,
    pub latency_ms: u64,
    pub warnings: Vec<String>,
}

/// JSON document written to stdout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub meta: Meta,
    pub data: Value,
}

impl Envelope {
    pub fn from_result(result: &CommandResult) -> Self {
        Self {
            meta: Meta {
                source: result.source,
                generated_at: UtcDateTime::now(),
                latency_ms: result.latency_ms,
                warnings: result.warnings.clone(),
            },
            data: result.data.clone(),
        }
    }
}

pub fn render(result: &CommandResult, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let envelope = Envelope::from_result(result);
            let payload = if pretty {
                serde_json::to_string_pretty(&envelope)?
            } else {
                serde_json::to_string(&envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => render_table(result)?,
    }

    Ok(())
}

fn render_table(result: &CommandResult) -> Result<(), CliError> {
    if let Some(source) = result.source {
        println!("source    : {source}");
        println!("latency_ms: {}", result.latency_ms);
    }

    if !result.warnings.is_empty() {
        println!("warnings:");
        for warning in &result.warnings {
            println!("  - {warning}");
        }
    }

    if result.table.is_empty() {
        for line in serde_json::to_string_pretty(&result.data)?.lines() {
            println!("{line}");
        }
    } else {
        for line in &result.table {
            println!("{line}");
        }
    }

    Ok(())
}
