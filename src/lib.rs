//! Safe Listing Retrieval & Extraction Pipeline
//!
//! Accepts a listing URL from an untrusted caller, safely retrieves the
//! page, extracts real-estate attributes, and normalizes them into
//! typed, comparable fields with an evidence trail for every value.
//!
//! # Design Philosophy
//!
//! - Every safety check runs before any content fetch
//! - Absence is `None`, never a fabricated placeholder
//! - Evidence-grounded: each raw field carries a provenance snippet
//! - Stateless: each invocation owns its values outright
//!
//! # Usage
//!
//! ```rust,ignore
//! use listing_pipeline::{Pipeline, PipelineConfig};
//!
//! let pipeline = Pipeline::new(PipelineConfig::default());
//! let outcome = pipeline.run("https://www.greenstrealty.com/listing/42").await?;
//! println!("{:?} at {:?}", outcome.normalized.price, outcome.normalized.address);
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - URL canonicalization
//! - [`security`] - SSRF protection and the domain allow-list
//! - [`robots`] - optional robots.txt gate
//! - [`fetch`] - bounded-retry document retrieval
//! - [`extract`] - host-pattern extractor dispatch
//! - [`normalize`] - typed field parsing
//! - [`pipeline`] - the orchestrator
//! - [`testing`] - mock implementations for tests

pub mod canonical;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod pipeline;
pub mod robots;
pub mod security;
pub mod testing;
pub mod types;

// Re-export core types at crate root
pub use canonical::CanonicalUrl;
pub use error::{ErrorKind, FetchError, PipelineError, SecurityError};
pub use extract::{Extractor, ExtractorRegistry, GenericExtractor, GreenstExtractor};
pub use fetch::{Fetcher, HttpFetcher};
pub use normalize::{AddressParser, HeuristicAddressParser, Normalizer};
pub use pipeline::{Pipeline, ScrapeOutcome};
pub use robots::RobotsTxt;
pub use security::UrlValidator;
pub use types::{
    config::PipelineConfig,
    document::Document,
    listing::{Address, Agent, NormalizedListing},
    record::{ProvenanceSnippet, RawExtractionRecord},
};
