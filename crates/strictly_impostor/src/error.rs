//! Error types for session setup and the external collaborators.

use derive_more::{Display, Error};
use tracing::instrument;

/// Configuration rejected by [`GameConfig::validate`](crate::GameConfig::validate).
///
/// These are the only errors a player can provoke. None of them is fatal:
/// the group fixes the configuration and starts again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ValidationError {
    /// Player count is outside `[MIN_PLAYERS, MAX_PLAYERS]`.
    #[display("player count out of range")]
    PlayerCountOutOfRange,

    /// No impostor requested.
    #[display("impostor count too low")]
    ImpostorCountTooLow,

    /// Impostor count leaves no civilian.
    #[display("impostor count too high")]
    ImpostorCountTooHigh,

    /// The enabled categories select no word pair.
    #[display("no categories enabled")]
    NoCategoriesEnabled,
}

/// Settings store error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for StoreError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Encoding error: {}", err))
    }
}

impl From<toml::ser::Error> for StoreError {
    #[track_caller]
    fn from(err: toml::ser::Error) -> Self {
        Self::new(format!("Serialization error: {}", err))
    }
}

/// Word bank loading error.
#[derive(Debug, Clone, Display, Error)]
#[display("Word bank error: {} at {}:{}", message, file, line)]
pub struct WordBankError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl WordBankError {
    /// Creates a new word bank error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
