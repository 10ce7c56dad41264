//! Mock implementations for testing.
//!
//! [`MockFetcher`] serves canned documents keyed by canonical URL and
//! records every fetch attempt, so tests can assert that blocked URLs
//! never produce an outbound call.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::canonical::CanonicalUrl;
use crate::error::{FetchError, FetchResult};
use crate::fetch::Fetcher;
use crate::types::document::Document;

/// Canned-response fetcher for tests.
///
/// # Example
///
/// ```rust
/// use listing_pipeline::testing::MockFetcher;
/// use listing_pipeline::Document;
///
/// let mock = MockFetcher::new()
///     .with_document(Document::new("https://example.com/", "<html></html>"));
/// ```
#[derive(Default)]
pub struct MockFetcher {
    /// Canned documents indexed by requested URL
    documents: Arc<RwLock<HashMap<String, Document>>>,
    /// URLs that fail with a fixed HTTP status
    failures: Arc<RwLock<HashMap<String, u16>>>,
    /// Every URL passed to fetch, in order
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    /// Create an empty mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document served for its own URL.
    pub fn add_document(&self, document: Document) {
        self.add_document_at(document.url.clone(), document);
    }

    /// Add a document served for a different request URL (redirects).
    pub fn add_document_at(&self, request_url: impl Into<String>, document: Document) {
        self.documents
            .write()
            .unwrap()
            .insert(request_url.into(), document);
    }

    /// Make a URL fail with the given HTTP status.
    pub fn fail_with_status(&self, url: impl Into<String>, status: u16) {
        self.failures.write().unwrap().insert(url.into(), status);
    }

    /// Builder form of [`add_document`](Self::add_document).
    pub fn with_document(self, document: Document) -> Self {
        self.add_document(document);
        self
    }

    /// Builder form of [`add_document_at`](Self::add_document_at).
    pub fn with_document_at(self, request_url: impl Into<String>, document: Document) -> Self {
        self.add_document_at(request_url, document);
        self
    }

    /// Number of fetch attempts made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// The URLs fetched, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

impl Clone for MockFetcher {
    fn clone(&self) -> Self {
        Self {
            documents: Arc::clone(&self.documents),
            failures: Arc::clone(&self.failures),
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &CanonicalUrl) -> FetchResult<Document> {
        let key = url.as_str().to_string();
        self.calls.write().unwrap().push(key.clone());

        if let Some(status) = self.failures.read().unwrap().get(&key) {
            return Err(FetchError::Status {
                status: *status,
                url: key,
            });
        }

        match self.documents.read().unwrap().get(&key) {
            Some(document) => Ok(document.clone()),
            None => Err(FetchError::RetriesExhausted {
                url: key,
                attempts: 1,
                last_error: "no canned document".to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
