use thiserror::Error;

/// Failures that can occur while exchanging messages with the model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// Non-success status, transport failure, or an undecodable reply body.
    #[error("network error: {0}")]
    Network(String),

    /// Reply text that could not be formatted. Absorbed by the formatter.
    #[error("format error: {0}")]
    Format(String),

    #[error("a reply is already pending")]
    Busy,

    #[error("no reply is pending")]
    NotPending,

    #[error("configuration error: {0}")]
    Config(String),
}

impl ChatError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        ChatError::Format(err.to_string())
    }
}

pub type ChatResult<T> = Result<T, ChatError>;
