//! Errors surfaced at the coordinator boundary

use std::path::PathBuf;

use crate::types::WindowId;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Cannot open a file with an empty path")]
    EmptyPath,

    #[error("Window {0} is not open")]
    UnknownWindow(WindowId),

    #[error("Failed to load '{}' into window {window}: {source}", path.display())]
    Load {
        window: WindowId,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create window: {0:#}")]
    WindowCreation(anyhow::Error),

    #[error(transparent)]
    Settings(#[from] anyhow::Error),
}

impl SessionError {
    /// Misuse by the caller rather than a runtime condition
    pub fn is_precondition(&self) -> bool {
        matches!(self, SessionError::EmptyPath | SessionError::UnknownWindow(_))
    }
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;
