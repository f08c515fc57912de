//! Errors produced by the catalog API client.

use thiserror::Error;

/// Errors from the catalog API client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("invalid request URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Transport failure, timeout or non-2xx status
    #[error("network error{}: {reason}", status_suffix(.status))]
    Network { status: Option<u16>, reason: String },

    /// The payload did not have the expected shape
    #[error("unexpected response shape: {0}")]
    Schema(String),

    #[error("search query is empty")]
    EmptyQuery,
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

impl ApiError {
    /// HTTP status of the failed response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Network { status, .. } => *status,
            _ => None,
        }
    }

    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else {
            err.to_string()
        };
        ApiError::Network {
            status: err.status().map(|s| s.as_u16()),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_display() {
        let with_status = ApiError::Network {
            status: Some(502),
            reason: "Bad Gateway".to_string(),
        };
        assert_eq!(with_status.to_string(), "network error (status 502): Bad Gateway");
        assert_eq!(with_status.status(), Some(502));

        let without = ApiError::Network {
            status: None,
            reason: "request timed out".to_string(),
        };
        assert_eq!(without.to_string(), "network error: request timed out");
        assert_eq!(without.status(), None);
    }

    #[test]
    fn test_schema_error_has_no_status() {
        let err = ApiError::Schema("missing field `judul`".to_string());
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("judul"));
    }
}
