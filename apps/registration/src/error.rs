use reqwest::StatusCode;
use thiserror::Error;

use crate::errors::domain::DomainError;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Server error: {status}")]
    Server { status: StatusCode },
    #[error("API error {status}: {body}")]
    Api { status: StatusCode, body: String },
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Not logged in")]
    NotLoggedIn,
    #[error("Decode error: {detail}")]
    Decode { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Session error: {detail}")]
    Session { detail: String },
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ClientError {
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn session(detail: impl Into<String>) -> Self {
        Self::Session {
            detail: detail.into(),
        }
    }

    pub fn decode(detail: impl Into<String>) -> Self {
        Self::Decode {
            detail: detail.into(),
        }
    }

    /// HTTP status behind this error, when it came from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Server { status } | ClientError::Api { status, .. } => Some(*status),
            ClientError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            ClientError::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::decode(e.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        ClientError::session(e.to_string())
    }
}
