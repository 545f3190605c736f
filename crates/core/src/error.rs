use thiserror::Error;

#[derive(Error, Debug)]
pub enum KratkoError {
    #[error("Transcript unavailable from {source_name}: {reason}")]
    TranscriptUnavailable { source_name: String, reason: String },

    #[error("Transcript is empty")]
    EmptyTranscript,

    #[error("Summarization backend unavailable: {reason}")]
    RemoteUnavailable { reason: String },

    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Background task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

/// What a caller can tell apart when a request fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TranscriptUnavailable,
    BackendUnavailable,
    Internal,
}

impl KratkoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KratkoError::TranscriptUnavailable { .. } | KratkoError::EmptyTranscript => {
                ErrorKind::TranscriptUnavailable
            }
            KratkoError::RemoteUnavailable { .. } | KratkoError::MissingApiKey { .. } => {
                ErrorKind::BackendUnavailable
            }
            KratkoError::IoError(_) | KratkoError::JsonError(_) | KratkoError::TaskFailed(_) => {
                ErrorKind::Internal
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, KratkoError>;
