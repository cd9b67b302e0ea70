//! Error types shared across camtrail crates.

/// Top-level error type for camtrail operations.
#[derive(Debug, thiserror::Error)]
pub enum CamtrailError {
    #[error("Recording error: {message}")]
    Recording { message: String },

    #[error("Playback error: {message}")]
    Playback { message: String },

    #[error("Smoothing error: {message}")]
    Smoothing { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Invalid export options: {}", violations.join("; "))]
    InvalidOptions { violations: Vec<String> },

    #[error("No recorded data available")]
    NoData,

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Clipboard error: {message}")]
    Clipboard { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using CamtrailError.
pub type CamtrailResult<T> = Result<T, CamtrailError>;

impl CamtrailError {
    pub fn recording(msg: impl Into<String>) -> Self {
        Self::Recording {
            message: msg.into(),
        }
    }

    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback {
            message: msg.into(),
        }
    }

    pub fn smoothing(msg: impl Into<String>) -> Self {
        Self::Smoothing {
            message: msg.into(),
        }
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn clipboard(msg: impl Into<String>) -> Self {
        Self::Clipboard {
            message: msg.into(),
        }
    }

    /// Whether this error came from option validation rather than missing data
    /// or an environment failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidOptions { .. })
    }
}
