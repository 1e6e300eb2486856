use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log settings read from the environment.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_level: String,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
        }
    }
}

/// Install a stderr subscriber so stdout carries only command output.
pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_new(&config.log_level).or_else(|_| EnvFilter::try_new("warn"))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}
