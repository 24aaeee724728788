//! Event log errors.

use std::path::PathBuf;

/// Errors that can occur while loading or saving an event log.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("Event log not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to access event log: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid event on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize event: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to replace {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LogError {
    /// Whether this error means the log file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LogError::NotFound { .. })
    }
}
