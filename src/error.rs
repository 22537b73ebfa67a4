//! Error types shared by the client, the accessors and the view controllers

use thiserror::Error;

/// Failure of a remote call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Connection, timeout or body-read failure
    #[error("request failed: {0}")]
    Transport(String),

    /// Non-success HTTP status
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Refresh token rejected; stored credentials have been cleared
    #[error("session expired, please sign in again")]
    SessionExpired,

    /// Response body did not match the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Short text for alerts and status lines
    pub fn summary(&self) -> String {
        match self {
            ApiError::Status { status, .. } => format!("server returned {}", status),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Transport("request timed out".to_string())
        } else if e.is_connect() {
            ApiError::Transport(format!("connection failed: {}", e))
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Client-side form validation failure; never reaches the network
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Invalid JSON format: {0}")]
    InvalidJson(String),

    #[error("HTTP status must be a number between 100 and 599, got '{0}'")]
    InvalidStatus(String),

    #[error("unknown HTTP method '{0}'")]
    UnknownMethod(String),

    #[error("type the project name exactly to confirm")]
    ConfirmationMismatch,
}
