//! Extractor dispatch: host-pattern registry with a generic fallback.
//!
//! Every extractor satisfies one contract: given a document and its
//! canonical URL, produce a raw record plus provenance. Adding support
//! for a new site means registering a new implementation, never
//! branching inside an existing one.

pub mod generic;
pub mod greenst;
pub mod html;

use std::sync::Arc;

use crate::canonical::CanonicalUrl;
use crate::types::document::Document;
use crate::types::record::RawExtractionRecord;

pub use generic::GenericExtractor;
pub use greenst::GreenstExtractor;

/// A site extractor: document + URL in, raw record + provenance out.
///
/// Implementations must never fail; unmatched or malformed content
/// yields an all-`None` record.
pub trait Extractor: Send + Sync {
    /// Extract raw field text from the document.
    fn extract(&self, document: &Document, url: &CanonicalUrl) -> RawExtractionRecord;

    /// Extractor name for logging.
    fn name(&self) -> &str;
}

/// Registry mapping host patterns to site-specific extractors.
///
/// A pattern matches when it appears as a substring of the host. If
/// exactly one registered extractor matches, it handles the document;
/// otherwise the generic fallback does.
pub struct ExtractorRegistry {
    entries: Vec<(String, Arc<dyn Extractor>)>,
    fallback: Arc<dyn Extractor>,
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new().register("greenstrealty.com", Arc::new(GreenstExtractor))
    }
}

impl ExtractorRegistry {
    /// Create an empty registry with the generic fallback.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            fallback: Arc::new(GenericExtractor),
        }
    }

    /// Register a site-specific extractor for a host pattern.
    pub fn register(mut self, pattern: impl Into<String>, extractor: Arc<dyn Extractor>) -> Self {
        self.entries
            .push((pattern.into().to_lowercase(), extractor));
        self
    }

    /// Select the extractor for a host.
    pub fn dispatch(&self, host: &str) -> &dyn Extractor {
        let host = host.to_lowercase();
        let mut matches = self
            .entries
            .iter()
            .filter(|(pattern, _)| host.contains(pattern.as_str()));

        match (matches.next(), matches.next()) {
            (Some((_, extractor)), None) => extractor.as_ref(),
            // Zero or ambiguous matches fall back to the generic path
            _ => self.fallback.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_known_host() {
        let registry = ExtractorRegistry::default();
        assert_eq!(registry.dispatch("www.greenstrealty.com").name(), "greenstrealty");
        assert_eq!(registry.dispatch("greenstrealty.com").name(), "greenstrealty");
    }

    #[test]
    fn test_dispatch_unknown_host_falls_back() {
        let registry = ExtractorRegistry::default();
        assert_eq!(registry.dispatch("example.com").name(), "generic");
    }

    #[test]
    fn test_ambiguous_match_falls_back() {
        let registry = ExtractorRegistry::new()
            .register("realty.com", Arc::new(GreenstExtractor))
            .register("greenstrealty.com", Arc::new(GreenstExtractor));

        assert_eq!(registry.dispatch("www.greenstrealty.com").name(), "generic");
        assert_eq!(registry.dispatch("otherrealty.com").name(), "greenstrealty");
    }
}
