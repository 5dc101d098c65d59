//! Clipboard error types

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while writing to the clipboard
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("No clipboard command available (tried: {tried})")]
    NoBackend { tried: String },

    #[error("Failed to start {command}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} exited with status {code:?}")]
    Exited { command: String, code: Option<i32> },

    #[error("{command} timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClipboardError {
    /// The command could not be found, so another backend may still work
    pub fn is_missing_command(&self) -> bool {
        matches!(
            self,
            ClipboardError::Spawn { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
