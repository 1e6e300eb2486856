mod generate;
mod ranges;

use serde_json::Value;
use stockscope_core::{HttpAuth, ReqwestHttpClient, Session, SourceId, SyntheticSource, YahooAdapter};
use std::sync::Arc;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    /// Human-readable lines for `--format table`; empty means "print the data".
    pub table: Vec<String>,
    pub warnings: Vec<String>,
    pub latency_ms: u64,
    pub source: Option<SourceId>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            table: Vec::new(),
            warnings: Vec::new(),
            latency_ms: 0,
            source: None,
        }
    }

    pub fn with_table(mut self, table: Vec<String>) -> Self {
        self.table = table;
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    pub fn with_source(mut self, source: SourceId) -> Self {
        self.source = Some(source);
        self
    }
}

pub async fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    match &cli.command {
        Command::Generate(args) => {
            if cli.offline {
                let mut session = Session::new(SyntheticSource::default());
                generate::run(args, &mut session).await
            } else {
                let adapter = YahooAdapter::new(Arc::new(ReqwestHttpClient::new()))
                    .with_auth(HttpAuth::from_env())
                    .with_timeout_ms(cli.timeout_ms);
                let mut session = Session::new(adapter);
                generate::run(args, &mut session).await
            }
        }
        Command::Ranges => ranges::run(),
    }
}
