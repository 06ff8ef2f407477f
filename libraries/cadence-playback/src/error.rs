//! Error types for playback

use cadence_core::CadenceError;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// No playlist has been bound to the player
    #[error("No playlist bound")]
    NotBound,

    /// Unknown strategy name
    #[error("Unknown playback strategy: {0}")]
    UnknownStrategy(String),

    /// Error from the item or playlist layer
    #[error(transparent)]
    Core(#[from] CadenceError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
