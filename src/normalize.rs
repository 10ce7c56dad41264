//! Conversion of raw field text into typed, comparable values.
//!
//! Every rule here is deterministic: the same raw record always yields
//! the same typed fields, `normalized_at` aside. Missing or unparseable
//! text becomes `None`, never a fabricated placeholder.

use chrono::Utc;
use regex::Regex;

use crate::types::listing::{Address, Agent, NormalizedListing};
use crate::types::record::RawExtractionRecord;

/// Parse a price by stripping every non-digit character.
///
/// No decimal handling: `"$425,000"` is 425000, `"USD 1,234,567"` is
/// 1234567.
pub fn parse_price(text: Option<&str>) -> Option<i64> {
    let digits: String = text?.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Parse a bed count. `"studio"` (any case) is 0.0; otherwise the first
/// number in the text, fractional or integer.
pub fn parse_beds(text: Option<&str>) -> Option<f64> {
    let text = text?.to_lowercase();
    if text.contains("studio") {
        return Some(0.0);
    }
    let number = Regex::new(r"\d+(\.\d+)?").unwrap();
    number.find(&text)?.as_str().parse().ok()
}

/// Parse a bath count; same rule as beds.
pub fn parse_baths(text: Option<&str>) -> Option<f64> {
    parse_beds(text)
}

/// Parse square footage; same digit-stripping rule as price.
pub fn parse_sqft(text: Option<&str>) -> Option<i64> {
    parse_price(text)
}

/// Pluggable address parsing strategy.
///
/// The default is a comma-split heuristic; swapping in a real postal
/// parser or geocoder touches nothing but the [`Normalizer`]
/// construction.
pub trait AddressParser: Send + Sync {
    fn parse(&self, text: &str) -> Address;
}

/// Naive comma-split address heuristic.
///
/// First segment → line1, second → city; the third is split by a
/// two-letter-code-plus-optional-5-digit pattern into state/zip, or
/// kept whole as the state when the pattern finds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicAddressParser;

impl AddressParser for HeuristicAddressParser {
    fn parse(&self, text: &str) -> Address {
        let parts: Vec<&str> = text.split(',').map(str::trim).collect();
        let mut address = Address {
            line1: parts.first().filter(|p| !p.is_empty()).map(|p| p.to_string()),
            city: parts.get(1).filter(|p| !p.is_empty()).map(|p| p.to_string()),
            ..Address::default()
        };

        if let Some(region) = parts.get(2) {
            let state_zip = Regex::new(r"([A-Za-z]{2})\s*(\d{5})?").unwrap();
            match state_zip.captures(region) {
                Some(cap) => {
                    address.state = cap.get(1).map(|m| m.as_str().to_string());
                    address.zip = cap.get(2).map(|m| m.as_str().to_string());
                }
                None => address.state = Some(region.to_string()),
            }
        }

        address
    }
}

/// Normalizer turning a raw extraction record into a typed listing.
pub struct Normalizer {
    address_parser: Box<dyn AddressParser>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    /// Create a normalizer with the heuristic address parser.
    pub fn new() -> Self {
        Self {
            address_parser: Box::new(HeuristicAddressParser),
        }
    }

    /// Use a custom address parsing strategy.
    pub fn with_address_parser(parser: Box<dyn AddressParser>) -> Self {
        Self {
            address_parser: parser,
        }
    }

    /// Derive the typed listing, stamping `normalized_at` with the
    /// current time.
    pub fn normalize(&self, raw: &RawExtractionRecord) -> NormalizedListing {
        NormalizedListing {
            price: parse_price(raw.price_text.as_deref()),
            beds: parse_beds(raw.beds_text.as_deref()),
            baths: parse_baths(raw.baths_text.as_deref()),
            sqft: parse_sqft(raw.sqft_text.as_deref()),
            address: raw
                .address_text
                .as_deref()
                .map(|text| self.address_parser.parse(text))
                .unwrap_or_default(),
            agent: Agent {
                name: raw.agent_name_text.clone(),
                phone: raw.agent_phone_text.clone(),
            },
            description: raw.description_text.clone(),
            normalized_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price(Some("$425,000")), Some(425_000));
        assert_eq!(parse_price(Some("USD 1,234,567")), Some(1_234_567));
        assert_eq!(parse_price(Some("")), None);
        assert_eq!(parse_price(Some("call for price")), None);
        assert_eq!(parse_price(None), None);
    }

    #[test]
    fn test_parse_beds() {
        assert_eq!(parse_beds(Some("Studio")), Some(0.0));
        assert_eq!(parse_beds(Some("2 beds")), Some(2.0));
        assert_eq!(parse_beds(Some("3.5")), Some(3.5));
        assert_eq!(parse_beds(Some("spacious")), None);
        assert_eq!(parse_beds(None), None);
    }

    #[test]
    fn test_parse_baths_reuses_beds_rule() {
        assert_eq!(parse_baths(Some("2.5 baths")), Some(2.5));
        assert_eq!(parse_baths(Some("studio")), Some(0.0));
    }

    #[test]
    fn test_parse_sqft() {
        assert_eq!(parse_sqft(Some("1,400 sqft")), Some(1_400));
        assert_eq!(parse_sqft(Some("no data")), None);
    }

    #[test]
    fn test_address_full() {
        let parsed = HeuristicAddressParser.parse("123 Main St, Urbana, IL 61801");
        assert_eq!(parsed.line1.as_deref(), Some("123 Main St"));
        assert_eq!(parsed.city.as_deref(), Some("Urbana"));
        assert_eq!(parsed.state.as_deref(), Some("IL"));
        assert_eq!(parsed.zip.as_deref(), Some("61801"));
    }

    #[test]
    fn test_address_partial() {
        let parsed = HeuristicAddressParser.parse("456 Oak Ave, Champaign");
        assert_eq!(parsed.line1.as_deref(), Some("456 Oak Ave"));
        assert_eq!(parsed.city.as_deref(), Some("Champaign"));
        assert_eq!(parsed.state, None);
        assert_eq!(parsed.zip, None);

        let just_line = HeuristicAddressParser.parse("789 Pine Rd");
        assert_eq!(just_line.line1.as_deref(), Some("789 Pine Rd"));
        assert_eq!(just_line.city, None);
    }

    #[test]
    fn test_address_state_without_zip() {
        let parsed = HeuristicAddressParser.parse("12 Elm, Urbana, IL");
        assert_eq!(parsed.state.as_deref(), Some("IL"));
        assert_eq!(parsed.zip, None);
    }

    #[test]
    fn test_normalize_idempotent_modulo_timestamp() {
        let raw = RawExtractionRecord {
            price_text: Some("$1995".into()),
            beds_text: Some("3".into()),
            baths_text: Some("2.5".into()),
            sqft_text: Some("1470".into()),
            address_text: Some("123 Main St, Urbana, IL 61801".into()),
            ..RawExtractionRecord::default()
        };

        let normalizer = Normalizer::new();
        let a = normalizer.normalize(&raw);
        let b = normalizer.normalize(&raw);

        assert_eq!(a.price, b.price);
        assert_eq!(a.beds, b.beds);
        assert_eq!(a.baths, b.baths);
        assert_eq!(a.sqft, b.sqft);
        assert_eq!(a.address, b.address);
        assert_eq!(a.agent, b.agent);
        assert_eq!(a.description, b.description);
    }

    #[test]
    fn test_normalize_all_null_record() {
        let listing = Normalizer::new().normalize(&RawExtractionRecord::new());
        assert_eq!(listing.price, None);
        assert_eq!(listing.beds, None);
        assert_eq!(listing.address, crate::types::listing::Address::default());
    }

    proptest! {
        #[test]
        fn prop_field_parsers_never_panic(text in ".*") {
            let _ = parse_price(Some(&text));
            let _ = parse_beds(Some(&text));
            let _ = parse_sqft(Some(&text));
            let _ = HeuristicAddressParser.parse(&text);
        }

        #[test]
        fn prop_price_is_digits_only(text in ".*") {
            if let Some(price) = parse_price(Some(&text)) {
                prop_assert!(price >= 0);
            }
        }
    }
}
