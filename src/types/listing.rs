//! Normalized listing: the typed, immutable output of the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Heuristically split postal address. Every segment is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

/// Listing agent contact, passed through verbatim from extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Typed listing derived deterministically from a raw extraction
/// record. Re-normalizing the same record yields the same fields,
/// `normalized_at` aside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedListing {
    /// Whole-currency price (no minor units)
    pub price: Option<i64>,

    /// Bedroom count; 0.0 means studio
    pub beds: Option<f64>,

    /// Bathroom count, fractional values allowed
    pub baths: Option<f64>,

    /// Interior square footage
    pub sqft: Option<i64>,

    pub address: Address,

    pub agent: Agent,

    pub description: Option<String>,

    /// When normalization ran (not when the page was fetched)
    pub normalized_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_nulls() {
        let listing = NormalizedListing {
            price: Some(425_000),
            beds: None,
            baths: Some(2.5),
            sqft: None,
            address: Address::default(),
            agent: Agent::default(),
            description: None,
            normalized_at: Utc::now(),
        };

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["price"], 425_000);
        assert!(json["beds"].is_null());
        assert_eq!(json["baths"], 2.5);
        assert!(json["address"]["line1"].is_null());
    }
}
