//! Error types for settings persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a [`SettingsStore`](super::SettingsStore).
///
/// These never escape [`ConnectionSettings`](super::ConnectionSettings): a failed
/// load falls back to defaults and a failed save keeps the in-memory value.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file: {0}")]
    Parse(String),

    #[error("failed to encode settings: {0}")]
    Encode(String),
}
