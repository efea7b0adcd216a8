use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The request guard refused the URL; nothing was sent
    #[error("Blocked request to untrusted host: {0}")]
    BlockedHost(String),

    #[error("HTTP transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upstream rejected request to {url}: HTTP {status}")]
    UpstreamRejected { status: u16, url: String },

    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("No README for {0}")]
    NoReadme(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get a sanitized error message safe for logging
    /// Filters out potentially sensitive information
    pub fn log_safe(&self) -> String {
        match self {
            // Transport errors can embed full request URLs
            Error::Transport(_) => "External HTTP request failed".to_string(),

            Error::Internal(msg) => {
                let lower = msg.to_lowercase();
                if lower.contains("password")
                    || lower.contains("secret")
                    || lower.contains("token")
                    || lower.contains("key")
                {
                    "Internal error (details redacted)".to_string()
                } else {
                    format!("Internal error: {msg}")
                }
            }

            Error::BlockedHost(url) => format!("Blocked request to untrusted host: {url}"),
            Error::UpstreamRejected { status, .. } => format!("Upstream returned HTTP {status}"),
            Error::MalformedResponse(msg) => format!("Malformed upstream response: {msg}"),
            Error::NoReadme(repo) => format!("No README for {repo}"),
            Error::Config(msg) => format!("Configuration error: {msg}"),
        }
    }

    /// Whether this is the expected "repository has no README" outcome
    pub fn is_no_readme(&self) -> bool {
        matches!(self, Error::NoReadme(_))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("Request error: {}", self.log_safe());

        let (status, error_message) = match &self {
            Error::BlockedHost(_) => (StatusCode::FORBIDDEN, "Blocked host".to_string()),
            Error::Transport(_) | Error::UpstreamRejected { .. } | Error::MalformedResponse(_) => (
                StatusCode::BAD_GATEWAY,
                "External service error".to_string(),
            ),
            Error::NoReadme(_) => (StatusCode::NOT_FOUND, "Not found".to_string()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_safe_redacts_sensitive_internal_errors() {
        let err = Error::Internal("bad token abc123".to_string());
        assert_eq!(err.log_safe(), "Internal error (details redacted)");

        let err = Error::Internal("pool exhausted".to_string());
        assert_eq!(err.log_safe(), "Internal error: pool exhausted");
    }

    #[test]
    fn test_upstream_rejected_hides_url_in_log() {
        let err = Error::UpstreamRejected {
            status: 503,
            url: "https://api.github.com/users/someone".to_string(),
        };
        assert_eq!(err.log_safe(), "Upstream returned HTTP 503");
    }

    #[test]
    fn test_blocked_host_maps_to_forbidden() {
        let response = Error::BlockedHost("https://evil.example".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
