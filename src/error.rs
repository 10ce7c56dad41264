//! Typed errors for the listing pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Errors are layered:
//! [`SecurityError`] for pre-fetch validation failures, [`FetchError`]
//! for retrieval failures, and [`PipelineError`] as the boundary type
//! callers match on.

use thiserror::Error;

/// Errors that can occur during a pipeline invocation.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input is not a well-formed http(s) URL
    #[error("invalid URL: {input}")]
    InvalidUrl { input: String },

    /// Pre-fetch safety validation failed
    #[error("security error: {0}")]
    Security(#[from] SecurityError),

    /// Retrieval failed after the retry budget was exhausted
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
}

/// Security-related errors, primarily for SSRF protection.
#[derive(Debug, Error)]
pub enum SecurityError {
    /// Host is blocked outright (e.g., localhost, metadata services)
    #[error("blocked host: {0}")]
    BlockedHost(String),

    /// Host resolves to a private/loopback/reserved address
    #[error("host {host} resolves to blocked address {ip}")]
    BlockedAddress { host: String, ip: String },

    /// Host fails the configured domain allow-list
    #[error("domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// robots.txt disallows the path for our user agent
    #[error("robots.txt disallows: {url}")]
    RobotsDisallowed { url: String },
}

/// Errors that can occur while fetching a document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Non-retriable HTTP status
    #[error("HTTP {status} fetching {url}")]
    Status { status: u16, url: String },

    /// Transport-level failure (connect, TLS, timeout, body read)
    #[error("transport error fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Retry budget exhausted on transient failures
    #[error("retries exhausted fetching {url} after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        last_error: String,
    },
}

/// Stable error classification for diagnostics and job reporting.
///
/// End users see "could not retrieve or analyze this listing"; the kind
/// is what gets logged and attached to the failed job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidUrl,
    SsrfBlocked,
    DomainNotAllowed,
    RobotsDisallowed,
    NetworkError,
}

impl PipelineError {
    /// Classify this error for diagnostics.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUrl { .. } => ErrorKind::InvalidUrl,
            Self::Security(e) => match e {
                SecurityError::BlockedHost(_) | SecurityError::BlockedAddress { .. } => {
                    ErrorKind::SsrfBlocked
                }
                SecurityError::DomainNotAllowed(_) => ErrorKind::DomainNotAllowed,
                SecurityError::RobotsDisallowed { .. } => ErrorKind::RobotsDisallowed,
            },
            Self::Fetch(_) => ErrorKind::NetworkError,
        }
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Result type alias for security checks.
pub type SecurityResult<T> = std::result::Result<T, SecurityError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let invalid = PipelineError::InvalidUrl {
            input: "data:text/html".into(),
        };
        assert_eq!(invalid.kind(), ErrorKind::InvalidUrl);

        let ssrf = PipelineError::Security(SecurityError::BlockedAddress {
            host: "internal.example".into(),
            ip: "10.0.0.1".into(),
        });
        assert_eq!(ssrf.kind(), ErrorKind::SsrfBlocked);

        let robots = PipelineError::Security(SecurityError::RobotsDisallowed {
            url: "https://example.com/private".into(),
        });
        assert_eq!(robots.kind(), ErrorKind::RobotsDisallowed);

        let network = PipelineError::Fetch(FetchError::Status {
            status: 404,
            url: "https://example.com/gone".into(),
        });
        assert_eq!(network.kind(), ErrorKind::NetworkError);
    }
}
