//! Fetched document with content and fetch metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A document retrieved by the fetcher.
///
/// `url` is the final URL after redirects, which the pipeline re-runs
/// through the safety gate before extraction. The content hash ties the
/// raw extraction record back to the exact bytes it was derived from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Final URL the body was served from (post-redirect)
    pub url: String,

    /// Response body as text
    pub content: String,

    /// SHA-256 hash of the content
    pub content_hash: String,

    /// HTTP status code of the final response
    pub status: u16,

    /// Content-Type header if present
    pub content_type: Option<String>,

    /// When the document was fetched
    pub fetched_at: DateTime<Utc>,
}

impl Document {
    /// Create a document, hashing the content.
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let content_hash = Self::hash_content(&content);

        Self {
            url: url.into(),
            content,
            content_hash,
            status: 200,
            content_type: None,
            fetched_at: Utc::now(),
        }
    }

    /// Calculate the SHA-256 hash of content.
    pub fn hash_content(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Set the HTTP status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Set the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Check whether the document has any non-whitespace content.
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }
}
