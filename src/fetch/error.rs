//! Failure taxonomy for backend reads.

use thiserror::Error;

/// Why the backend did not produce a usable answer.
///
/// Read paths never surface this to their callers: [`FetchResult::absorb`]
/// maps it to fallback data with `is_real == false`.
///
/// [`FetchResult::absorb`]: super::FetchResult::absorb
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unreachable {
    /// No complete response before the deadline
    #[error("request timeout after {0}ms")]
    Timeout(u64),

    /// Connection refused, DNS failure, reset, TLS failure
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Backend answered with a non-2xx status
    #[error("HTTP error: {0}")]
    HttpStatus(u16),

    /// Body was not the expected JSON shape
    #[error("invalid response: {0}")]
    Parse(String),
}

impl Unreachable {
    /// Classify a reqwest error.
    pub(crate) fn from_reqwest(e: reqwest::Error, timeout_ms: u64) -> Self {
        if e.is_timeout() {
            Unreachable::Timeout(timeout_ms)
        } else if e.is_decode() {
            Unreachable::Parse(e.to_string())
        } else if let Some(status) = e.status() {
            Unreachable::HttpStatus(status.as_u16())
        } else {
            Unreachable::ConnectionFailed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        assert_eq!(
            Unreachable::Timeout(2000).to_string(),
            "request timeout after 2000ms"
        );
    }

    #[test]
    fn test_http_status_display() {
        assert_eq!(Unreachable::HttpStatus(503).to_string(), "HTTP error: 503");
    }

    #[test]
    fn test_connection_display() {
        let err = Unreachable::ConnectionFailed("refused".to_string());
        assert_eq!(err.to_string(), "connection failed: refused");
    }
}
