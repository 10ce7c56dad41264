//! Site-specific extractor for GreenstRealty listing pages.
//!
//! These pages carry a labeled info block (`Price : $1995`, `Beds : 3`,
//! ...) in a `.prop-profile-mobile-info-data` element, and the street
//! address inside the meta description ("Located at 3310 Stoneway in
//! Boulder Ridge...").

use regex::Regex;

use crate::canonical::CanonicalUrl;
use crate::extract::html;
use crate::extract::Extractor;
use crate::types::document::Document;
use crate::types::record::RawExtractionRecord;

const INFO_BLOCK_CLASS: &str = "prop-profile-mobile-info-data";
const TITLE_CLASS: &str = "prop-profile-slider-title";

pub struct GreenstExtractor;

impl GreenstExtractor {
    /// Capture the value following a label within the info block text.
    fn labeled_value(block: &str, pattern: &str) -> Option<String> {
        Regex::new(pattern)
            .ok()?
            .captures(block)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

impl Extractor for GreenstExtractor {
    fn extract(&self, document: &Document, url: &CanonicalUrl) -> RawExtractionRecord {
        let mut record = RawExtractionRecord::new();
        let source = url.as_str();
        let locator = format!(".{INFO_BLOCK_CLASS}");

        if let Some(inner) = html::element_inner(&document.content, INFO_BLOCK_CLASS) {
            // One labeled field per line once <br> separators become newlines
            let block = html::visible_text(&inner);

            let fields = [
                ("price_text", r"(?im)Price\s*:\s*(.+)$"),
                ("beds_text", r"(?i)Beds\s*:\s*([\d.]+)"),
                ("baths_text", r"(?i)Baths\s*:\s*([\d.]+)"),
                ("sqft_text", r"(?i)Sq\s*Ft\s*:\s*(\d+)"),
            ];

            for (field, pattern) in fields {
                if let Some(value) = Self::labeled_value(&block, pattern) {
                    record.set_field(field, value, &locator, source);
                }
            }
        }

        if let Some(description) = html::meta_content(&document.content, "description") {
            record.set_field(
                "description_text",
                &description,
                r#"meta[name="description"]"#,
                source,
            );

            // Street address sits between "Located at" and "in"/"available";
            // this broker lists exclusively in Champaign, IL.
            let addr_pattern = Regex::new(r"Located at\s+(.*?)\s+(?:in|available)").unwrap();
            if let Some(street) = addr_pattern
                .captures(&description)
                .and_then(|cap| cap.get(1))
            {
                record.set_field(
                    "address_text",
                    format!("{}, Champaign, IL", street.as_str()),
                    r#"meta[name="description"]"#,
                    source,
                );
            }
        }

        // Slider title as the address fallback when the meta route fails
        if record.address_text.is_none() {
            if let Some(title) = html::element_inner(&document.content, TITLE_CLASS) {
                let title = html::visible_text(&title);
                if !title.is_empty() {
                    record.set_field("address_text", title, format!(".{TITLE_CLASS}"), source);
                }
            }
        }

        record
    }

    fn name(&self) -> &str {
        "greenstrealty"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING_HTML: &str = r#"
        <html>
        <head>
            <meta name="description" content="Located at 3310-3316 Stoneway in Boulder Ridge, this 3 bedroom offers space and comfort." />
        </head>
        <body>
            <h2 class="prop-profile-slider-title">3310 Stoneway</h2>
            <div class="prop-profile-mobile-info-data">
                Price : $665/Bed | $1995<br>
                Beds : 3<br>
                Baths : 2.5<br>
                Sq Ft : 1470
            </div>
        </body>
        </html>
    "#;

    fn extract(content: &str) -> RawExtractionRecord {
        let url = CanonicalUrl::parse("https://www.greenstrealty.com/listing/42").unwrap();
        let document = Document::new(url.as_str(), content);
        GreenstExtractor.extract(&document, &url)
    }

    #[test]
    fn test_extracts_labeled_fields() {
        let record = extract(LISTING_HTML);

        assert_eq!(record.price_text.as_deref(), Some("$665/Bed | $1995"));
        assert_eq!(record.beds_text.as_deref(), Some("3"));
        assert_eq!(record.baths_text.as_deref(), Some("2.5"));
        assert_eq!(record.sqft_text.as_deref(), Some("1470"));
    }

    #[test]
    fn test_address_from_meta_description() {
        let record = extract(LISTING_HTML);
        assert_eq!(
            record.address_text.as_deref(),
            Some("3310-3316 Stoneway, Champaign, IL")
        );
        assert!(record
            .description_text
            .as_deref()
            .unwrap()
            .starts_with("Located at"));
    }

    #[test]
    fn test_each_field_carries_a_snippet() {
        let record = extract(LISTING_HTML);
        let info_snippets = record
            .provenance
            .iter()
            .filter(|s| s.locator.as_deref() == Some(".prop-profile-mobile-info-data"))
            .count();
        assert_eq!(info_snippets, 4);
    }

    #[test]
    fn test_title_fallback_when_meta_missing() {
        let html = r#"
            <h2 class="prop-profile-slider-title">507 W Green St</h2>
            <div class="prop-profile-mobile-info-data">Price : $900</div>
        "#;
        let record = extract(html);
        assert_eq!(record.address_text.as_deref(), Some("507 W Green St"));
    }

    #[test]
    fn test_malformed_markup_yields_empty_record() {
        let record = extract("<div class=\"unrelated\">nothing to see</div>");
        assert!(record.is_empty());
        assert!(record.provenance.is_empty());
    }
}
