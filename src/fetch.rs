//! Document retrieval with bounded timeout, retry, and backoff.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::canonical::CanonicalUrl;
use crate::error::{FetchError, FetchResult};
use crate::types::config::PipelineConfig;
use crate::types::document::Document;

/// HTTP statuses worth retrying; everything else fails immediately.
const TRANSIENT_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Fetcher trait for retrieving documents.
///
/// The pipeline depends on this trait rather than on a concrete client
/// so tests can substitute a canned implementation and prove that
/// blocked URLs never reach the network.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch a single document.
    async fn fetch(&self, url: &CanonicalUrl) -> FetchResult<Document>;

    /// Fetcher name for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Fetcher backed by `reqwest` with retry and exponential backoff.
///
/// Retries are limited to transport failures and the transient HTTP
/// statuses (429, 500, 502, 503, 504); other statuses fail on the first
/// response. Redirects are followed by the client; the returned
/// [`Document`] carries the final URL so the caller can re-validate it.
pub struct HttpFetcher {
    client: reqwest::Client,
    config: PipelineConfig,
}

impl HttpFetcher {
    /// Build a fetcher from pipeline configuration.
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(config.timeout())
                .build()
                .expect("Failed to create HTTP client"),
            config: config.clone(),
        }
    }

    async fn fetch_once(&self, url: &CanonicalUrl) -> Result<Document, Attempt> {
        let response = self
            .client
            .get(url.as_str())
            .header("User-Agent", &self.config.user_agent)
            .send()
            .await
            .map_err(|e| Attempt::transient(format!("transport error: {e}")))?;

        let status = response.status().as_u16();

        if !response.status().is_success() {
            if TRANSIENT_STATUSES.contains(&status) {
                return Err(Attempt::transient(format!("HTTP {status}")));
            }
            return Err(Attempt::fatal(FetchError::Status {
                status,
                url: url.as_str().to_string(),
            }));
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.text().await.map_err(|e| {
            Attempt::fatal(FetchError::Transport {
                url: url.as_str().to_string(),
                source: Box::new(e),
            })
        })?;

        let mut document = Document::new(final_url.as_str(), body).with_status(status);
        if let Some(ct) = content_type {
            document = document.with_content_type(ct);
        }
        Ok(document)
    }
}

/// One failed attempt, either retriable or final.
enum Attempt {
    Transient(String),
    Fatal(FetchError),
}

impl Attempt {
    fn transient(reason: String) -> Self {
        Self::Transient(reason)
    }

    fn fatal(error: FetchError) -> Self {
        Self::Fatal(error)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &CanonicalUrl) -> FetchResult<Document> {
        let attempts = self.config.retries + 1;
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            debug!(url = %url, attempt = attempt, "HTTP fetch starting");

            match self.fetch_once(url).await {
                Ok(document) => {
                    debug!(
                        url = %url,
                        final_url = %document.url,
                        content_length = document.content.len(),
                        "HTTP fetch succeeded"
                    );
                    return Ok(document);
                }
                Err(Attempt::Fatal(e)) => {
                    warn!(url = %url, error = %e, "HTTP fetch failed, not retriable");
                    return Err(e);
                }
                Err(Attempt::Transient(reason)) => {
                    warn!(
                        url = %url,
                        attempt = attempt,
                        reason = %reason,
                        "HTTP fetch failed, transient"
                    );
                    last_error = reason;
                    if attempt < attempts {
                        tokio::time::sleep(self.config.backoff_delay(attempt)).await;
                    }
                }
            }
        }

        Err(FetchError::RetriesExhausted {
            url: url.as_str().to_string(),
            attempts,
            last_error,
        })
    }

    fn name(&self) -> &str {
        "http"
    }
}
