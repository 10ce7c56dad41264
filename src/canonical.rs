//! Canonical URL type - the validated form used throughout the pipeline.
//!
//! Canonicalization is the first gate on untrusted input: trim, default
//! the scheme to `https`, strip the fragment, and require an http(s)
//! scheme and a non-empty host. Everything downstream works with
//! [`CanonicalUrl`], never with the caller's raw string.

use crate::error::PipelineError;

/// A canonicalized http(s) URL with a guaranteed non-empty host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalUrl(url::Url);

impl CanonicalUrl {
    /// Canonicalize a free-form input string.
    ///
    /// Rules:
    /// - surrounding whitespace is trimmed
    /// - a missing scheme defaults to `https`
    /// - the fragment is stripped
    /// - schemes other than `http`/`https` are rejected
    /// - a URL without a host is rejected
    pub fn parse(input: &str) -> Result<Self, PipelineError> {
        let trimmed = input.trim();
        let invalid = || PipelineError::InvalidUrl {
            input: input.to_string(),
        };

        if trimmed.is_empty() {
            return Err(invalid());
        }

        let mut parsed = match url::Url::parse(trimmed) {
            Ok(url) => url,
            // Scheme-less input like "example.com/listing" parses as a
            // relative reference; retry with the default scheme.
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                url::Url::parse(&format!("https://{trimmed}")).map_err(|_| invalid())?
            }
            Err(_) => return Err(invalid()),
        };

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid());
        }

        parsed.set_fragment(None);

        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(invalid());
        }

        Ok(Self(parsed))
    }

    /// Wrap an already-parsed URL, enforcing the same invariants.
    ///
    /// Used to re-canonicalize the final URL after redirects.
    pub fn from_url(url: url::Url) -> Result<Self, PipelineError> {
        Self::parse(url.as_str())
    }

    /// The canonical textual form.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The URL scheme (`http` or `https`).
    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    /// The host. Guaranteed present by construction.
    pub fn host(&self) -> &str {
        self.0.host_str().unwrap_or_default()
    }

    /// The path component.
    pub fn path(&self) -> &str {
        self.0.path()
    }

    /// The explicit or scheme-default port.
    pub fn port_or_default(&self) -> u16 {
        self.0.port_or_known_default().unwrap_or(match self.scheme() {
            "https" => 443,
            _ => 80,
        })
    }

    /// The robots.txt URL for this host.
    pub fn robots_url(&self) -> String {
        format!("{}://{}/robots.txt", self.scheme(), self.authority())
    }

    /// Host plus non-default port, as it appears in the URL.
    pub fn authority(&self) -> String {
        match self.0.port() {
            Some(port) => format!("{}:{}", self.host(), port),
            None => self.host().to_string(),
        }
    }

    /// Access the underlying parsed URL.
    pub fn as_url(&self) -> &url::Url {
        &self.0
    }
}

impl std::fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl serde::Serialize for CanonicalUrl {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
