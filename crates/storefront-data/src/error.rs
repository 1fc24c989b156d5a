//! API client error types.

use thiserror::Error;

/// Errors that can occur when talking to the backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("Transport failed: {0}")]
    Transport(String),

    /// Non-2xx response.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Failed to parse the response body.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// Failed to encode the request body.
    #[error("JSON error: {0}")]
    Json(String),
}

impl FetchError {
    /// HTTP status, if the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the backend reported an unknown resource.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Transport(_) | FetchError::Timeout => true,
            FetchError::Http { status, .. } => (500..600).contains(status),
            FetchError::Parse(_) | FetchError::Json(_) => false,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Json(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(FetchError::Transport("reset".into()).is_transient());
        assert!(FetchError::Timeout.is_transient());
        assert!(FetchError::Http { status: 503, message: String::new() }.is_transient());
        assert!(!FetchError::Http { status: 404, message: String::new() }.is_transient());
        assert!(!FetchError::Parse("eof".into()).is_transient());
    }

    #[test]
    fn test_not_found() {
        let err = FetchError::Http { status: 404, message: "no item 7".into() };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "HTTP 404: no item 7");
        assert!(!FetchError::Timeout.is_not_found());
    }
}
