//! Conservative fallback extractor for unknown sites.

use regex::Regex;

use crate::canonical::CanonicalUrl;
use crate::extract::html;
use crate::extract::Extractor;
use crate::types::document::Document;
use crate::types::record::{ProvenanceSnippet, RawExtractionRecord};

/// Best-effort extractor for hosts with no registered implementation.
///
/// Only a currency-like pattern (`$` plus three or more digits,
/// optionally comma-grouped) is trusted enough to populate a field;
/// every other field stays `None` rather than risking a false positive.
pub struct GenericExtractor;

impl Extractor for GenericExtractor {
    fn extract(&self, document: &Document, url: &CanonicalUrl) -> RawExtractionRecord {
        let mut record = RawExtractionRecord::new();

        let text = html::visible_text(&document.content);
        let price_pattern = Regex::new(r"\$\s?[\d,]{3,}").unwrap();

        if let Some(price) = price_pattern.find(&text) {
            record.set_field("price_text", price.as_str(), "currency-pattern", url.as_str());
        } else {
            record
                .provenance
                .push(ProvenanceSnippet::source_only(url.as_str()));
        }

        record
    }

    fn name(&self) -> &str {
        "generic"
    }
}
