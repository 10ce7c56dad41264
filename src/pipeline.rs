//! Pipeline orchestrator: canonicalize, gate, fetch, extract, normalize.
//!
//! The pipeline is a pure function of its input URL plus the network
//! response. It holds configuration and collaborators but no mutable
//! state; concurrent invocations never contend.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::canonical::CanonicalUrl;
use crate::error::{PipelineError, Result, SecurityError};
use crate::extract::ExtractorRegistry;
use crate::fetch::{Fetcher, HttpFetcher};
use crate::normalize::Normalizer;
use crate::robots;
use crate::security::UrlValidator;
use crate::types::config::PipelineConfig;
use crate::types::listing::NormalizedListing;
use crate::types::record::RawExtractionRecord;

/// Successful pipeline output: the canonical URL actually extracted
/// from, the raw evidence, and the typed listing.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeOutcome {
    /// Final canonical URL (post-redirect, re-validated)
    pub url: CanonicalUrl,

    /// Raw field text plus provenance
    pub raw: RawExtractionRecord,

    /// Typed, comparable listing fields
    pub normalized: NormalizedListing,
}

/// The fetch-validate-extract-normalize pipeline.
///
/// Constructed once from a [`PipelineConfig`] and shared by reference;
/// every run owns its URL, document, record, and listing outright.
pub struct Pipeline {
    config: PipelineConfig,
    validator: UrlValidator,
    fetcher: Arc<dyn Fetcher>,
    registry: ExtractorRegistry,
    normalizer: Normalizer,
}

impl Pipeline {
    /// Build a pipeline with the HTTP fetcher and default extractors.
    pub fn new(config: PipelineConfig) -> Self {
        let fetcher = Arc::new(HttpFetcher::new(&config));
        Self::with_fetcher(config, fetcher)
    }

    /// Build a pipeline around a custom fetcher (tests use this to
    /// prove blocked URLs never reach the network).
    pub fn with_fetcher(config: PipelineConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        let validator =
            UrlValidator::new().with_allowed_domains(config.allowed_domains.iter().cloned());
        Self {
            config,
            validator,
            fetcher,
            registry: ExtractorRegistry::default(),
            normalizer: Normalizer::new(),
        }
    }

    /// Replace the extractor registry.
    pub fn with_registry(mut self, registry: ExtractorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Run the full pipeline for one untrusted input URL.
    ///
    /// Validation and safety failures abort before any content request;
    /// fetch failures abort with no partial output. Missing fields are
    /// never errors.
    pub async fn run(&self, input: &str) -> Result<ScrapeOutcome> {
        let url = CanonicalUrl::parse(input)?;
        debug!(url = %url, "pipeline starting");

        self.validator.validate_with_dns(&url).await?;

        if self.config.respect_robots {
            self.check_robots(&url).await?;
        }

        let document = self.fetcher.fetch(&url).await?;

        // Hardening: redirects may land anywhere, so the final URL goes
        // back through the whole safety gate before extraction.
        let final_url = CanonicalUrl::parse(&document.url)?;
        if final_url != url {
            debug!(url = %url, final_url = %final_url, "re-validating redirect target");
            self.validator.validate_with_dns(&final_url).await?;
        }

        let extractor = self.registry.dispatch(final_url.host());
        let raw = extractor.extract(&document, &final_url);

        if raw.is_empty() {
            // Informational only: an all-null record is a valid result
            warn!(url = %final_url, extractor = extractor.name(), "extraction matched nothing");
        } else {
            info!(
                url = %final_url,
                extractor = extractor.name(),
                snippets = raw.provenance.len(),
                "extraction produced fields"
            );
        }

        let normalized = self.normalizer.normalize(&raw);

        Ok(ScrapeOutcome {
            url: final_url,
            raw,
            normalized,
        })
    }

    async fn check_robots(&self, url: &CanonicalUrl) -> Result<()> {
        let robots = robots::fetch_robots_txt(self.fetcher.as_ref(), url).await;
        if !robots.is_allowed(&self.config.user_agent, url.path()) {
            return Err(PipelineError::Security(SecurityError::RobotsDisallowed {
                url: url.as_str().to_string(),
            }));
        }
        Ok(())
    }
}
