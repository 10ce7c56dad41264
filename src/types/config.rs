//! Pipeline configuration.
//!
//! One value, constructed by the caller and passed in at build time.
//! The pipeline never reads ambient global state at call time.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a [`Pipeline`](crate::pipeline::Pipeline).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Per-request timeout in seconds. Default: 15.
    pub timeout_secs: u64,

    /// Retries after the initial attempt, on transient failures only.
    /// Default: 2.
    pub retries: u32,

    /// Exponential backoff factor in seconds. The delay before retry
    /// `n` (1-based) is `backoff_factor * 2^(n-1)`. Default: 0.5.
    pub backoff_factor: f64,

    /// User-Agent header sent with every request.
    pub user_agent: String,

    /// Optional domain allow-list (exact host or subdomain of an
    /// entry). Empty means any public domain is allowed.
    #[serde(default)]
    pub allowed_domains: Vec<String>,

    /// Check robots.txt before fetching. Disabled by default; when the
    /// robots resource cannot be retrieved the path is treated as
    /// allowed.
    pub respect_robots: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            retries: 2,
            backoff_factor: 0.5,
            user_agent: "PropertyOracleBot/1.0".to_string(),
            allowed_domains: Vec::new(),
            respect_robots: false,
        }
    }
}

impl PipelineConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the retry budget.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Set the backoff factor.
    pub fn with_backoff_factor(mut self, factor: f64) -> Self {
        self.backoff_factor = factor;
        self
    }

    /// Set the User-Agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Restrict fetches to the given domain suffixes.
    pub fn with_allowed_domains(
        mut self,
        domains: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.allowed_domains = domains.into_iter().map(Into::into).collect();
        self
    }

    /// Enable the robots.txt check.
    pub fn with_robots_check(mut self) -> Self {
        self.respect_robots = true;
        self
    }

    /// The per-request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Backoff delay before the given 1-based retry attempt.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(16);
        Duration::from_secs_f64(self.backoff_factor * f64::from(1u32 << exp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert_eq!(config.retries, 2);
        assert!(!config.respect_robots);
        assert!(config.allowed_domains.is_empty());
    }

    #[test]
    fn test_backoff_doubles() {
        let config = PipelineConfig::default();
        assert_eq!(config.backoff_delay(1), Duration::from_millis(500));
        assert_eq!(config.backoff_delay(2), Duration::from_secs(1));
        assert_eq!(config.backoff_delay(3), Duration::from_secs(2));
    }

    #[test]
    fn test_builder() {
        let config = PipelineConfig::new()
            .with_timeout_secs(10)
            .with_retries(1)
            .with_user_agent("TestBot/0.1")
            .with_allowed_domains(["example.com"])
            .with_robots_check();

        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.retries, 1);
        assert_eq!(config.user_agent, "TestBot/0.1");
        assert_eq!(config.allowed_domains, vec!["example.com".to_string()]);
        assert!(config.respect_robots);
    }
}
