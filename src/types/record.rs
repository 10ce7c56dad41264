//! Raw extraction output: per-field text plus its evidence trail.

use serde::{Deserialize, Serialize};

/// Evidence for one raw field: which locator produced which text, from
/// which URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvenanceSnippet {
    /// Selector or label that matched, when one applies
    pub locator: Option<String>,

    /// The extracted text
    pub text: Option<String>,

    /// URL the text came from
    pub source: String,
}

impl ProvenanceSnippet {
    /// Evidence from a named locator.
    pub fn new(
        locator: impl Into<String>,
        text: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            locator: Some(locator.into()),
            text: Some(text.into()),
            source: source.into(),
        }
    }

    /// Evidence carrying only the source URL, for extractions that
    /// matched nothing.
    pub fn source_only(source: impl Into<String>) -> Self {
        Self {
            locator: None,
            text: None,
            source: source.into(),
        }
    }
}

/// Raw per-field text extracted from one document, created once per
/// fetch and never mutated.
///
/// Every field is optional; an all-`None` record is the correct result
/// for content that matched nothing, never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawExtractionRecord {
    pub price_text: Option<String>,
    pub beds_text: Option<String>,
    pub baths_text: Option<String>,
    pub sqft_text: Option<String>,
    pub address_text: Option<String>,
    pub agent_name_text: Option<String>,
    pub agent_phone_text: Option<String>,
    pub description_text: Option<String>,

    /// Ordered evidence for the fields above
    #[serde(default)]
    pub provenance: Vec<ProvenanceSnippet>,
}

impl RawExtractionRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field carries any text.
    pub fn is_empty(&self) -> bool {
        self.price_text.is_none()
            && self.beds_text.is_none()
            && self.baths_text.is_none()
            && self.sqft_text.is_none()
            && self.address_text.is_none()
            && self.agent_name_text.is_none()
            && self.agent_phone_text.is_none()
            && self.description_text.is_none()
    }

    /// Record a field value together with its evidence.
    pub fn set_field(
        &mut self,
        field: &str,
        value: impl Into<String>,
        locator: impl Into<String>,
        source: &str,
    ) {
        let value = value.into();
        let slot = match field {
            "price_text" => &mut self.price_text,
            "beds_text" => &mut self.beds_text,
            "baths_text" => &mut self.baths_text,
            "sqft_text" => &mut self.sqft_text,
            "address_text" => &mut self.address_text,
            "agent_name_text" => &mut self.agent_name_text,
            "agent_phone_text" => &mut self.agent_phone_text,
            "description_text" => &mut self.description_text,
            _ => return,
        };
        self.provenance
            .push(ProvenanceSnippet::new(locator, value.clone(), source));
        *slot = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record() {
        let record = RawExtractionRecord::new();
        assert!(record.is_empty());
        assert!(record.provenance.is_empty());
    }

    #[test]
    fn test_set_field_records_provenance() {
        let mut record = RawExtractionRecord::new();
        record.set_field(
            "price_text",
            "$1995",
            ".prop-profile-mobile-info-data",
            "https://example.com/p/1",
        );

        assert!(!record.is_empty());
        assert_eq!(record.price_text.as_deref(), Some("$1995"));
        assert_eq!(record.provenance.len(), 1);
        let snippet = &record.provenance[0];
        assert_eq!(
            snippet.locator.as_deref(),
            Some(".prop-profile-mobile-info-data")
        );
        assert_eq!(snippet.text.as_deref(), Some("$1995"));
        assert_eq!(snippet.source, "https://example.com/p/1");
    }
}
