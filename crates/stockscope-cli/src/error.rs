use stockscope_core::{CoreError, SourceError, SourceErrorKind};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] stockscope_core::ValidationError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<SourceError> for CliError {
    fn from(error: SourceError) -> Self {
        Self::Core(CoreError::Source(error))
    }
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::Command(_) => 2,
            Self::Core(error) => match error {
                CoreError::Validation(_) | CoreError::Stats(_) | CoreError::NothingFetched => 2,
                CoreError::Source(source) => match source.kind() {
                    SourceErrorKind::InvalidTicker | SourceErrorKind::InvalidRequest => 2,
                    SourceErrorKind::Transport | SourceErrorKind::RateLimited => 3,
                    SourceErrorKind::Internal => 1,
                },
                CoreError::Export(_) => 10,
            },
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
