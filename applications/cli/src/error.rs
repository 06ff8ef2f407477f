/// CLI error types
use cadence_core::CadenceError;
use cadence_playback::PlaybackError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CadenceError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Short name of the error kind for the diagnostic line
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::Config(_) => "config",
            CliError::Core(err) | CliError::Playback(PlaybackError::Core(err)) => err.kind(),
            CliError::Playback(PlaybackError::NotBound) => "not_bound",
            CliError::Playback(PlaybackError::UnknownStrategy(_)) => "unknown_strategy",
            CliError::Json(_) => "json",
            CliError::Io(_) => "io",
        }
    }
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
