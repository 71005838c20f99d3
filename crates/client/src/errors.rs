//! Error types for the client library.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The server answered with a non-2xx status.
    #[error("Server error {status}: {message}")]
    Api {
        status: u16,
        code: Option<u16>,
        message: String,
    },

    /// The server could not be reached or the body could not be read.
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot is not valid JSON: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Domain failure from the direct path or local validation.
    #[error(transparent)]
    Core(#[from] investai_core::Error),

    /// No step of the fallback chain could answer.
    #[error("No data available for {0}")]
    Unavailable(String),
}

impl ClientError {
    /// The server could not serve the call at all: unreachable or a 5xx.
    /// Only these failures move on to the next step of the fallback chain.
    pub fn is_unavailable(&self) -> bool {
        match self {
            ClientError::Transport(_) => true,
            ClientError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}
