//! robots.txt parsing and the optional robots gate.
//!
//! The check is opt-in via [`PipelineConfig::respect_robots`] and fails
//! open: a robots resource that cannot be retrieved never blocks a
//! fetch on its own.
//!
//! [`PipelineConfig::respect_robots`]: crate::types::config::PipelineConfig

use std::collections::HashMap;

use crate::canonical::CanonicalUrl;
use crate::fetch::Fetcher;

/// Parsed robots.txt rules.
#[derive(Debug, Clone, Default)]
pub struct RobotsTxt {
    /// Rules per user-agent (lowercase)
    rules: HashMap<String, AgentRules>,

    /// Default rules (for *)
    default_rules: AgentRules,
}

/// Rules for a specific user-agent.
#[derive(Debug, Clone, Default)]
struct AgentRules {
    /// Disallowed path prefixes
    disallow: Vec<String>,

    /// Allowed path prefixes (override disallow)
    allow: Vec<String>,
}

impl RobotsTxt {
    /// Parse robots.txt content.
    pub fn parse(content: &str) -> Self {
        let mut robots = Self::default();
        let mut current_agents: Vec<String> = Vec::new();
        let mut current_rules = AgentRules::default();

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((directive, value)) = line.split_once(':') {
                let directive = directive.trim().to_lowercase();
                let value = value.trim();

                match directive.as_str() {
                    "user-agent" => {
                        // A new agent group after rules closes the previous group
                        if !current_rules.disallow.is_empty() || !current_rules.allow.is_empty() {
                            robots.store(&current_agents, current_rules);
                            current_rules = AgentRules::default();
                            current_agents.clear();
                        }
                        current_agents.push(value.to_lowercase());
                    }
                    "disallow" => {
                        if !value.is_empty() {
                            current_rules.disallow.push(value.to_string());
                        }
                    }
                    "allow" => {
                        if !value.is_empty() {
                            current_rules.allow.push(value.to_string());
                        }
                    }
                    _ => {}
                }
            }
        }

        robots.store(&current_agents, current_rules);
        robots
    }

    fn store(&mut self, agents: &[String], rules: AgentRules) {
        for agent in agents {
            if agent == "*" {
                self.default_rules = rules.clone();
            } else {
                self.rules.insert(agent.clone(), rules.clone());
            }
        }
    }

    /// Check if a path is allowed for a user-agent.
    pub fn is_allowed(&self, user_agent: &str, path: &str) -> bool {
        let agent_lower = user_agent.to_lowercase();

        let rules = self
            .rules
            .get(&agent_lower)
            .or_else(|| {
                // Product tokens usually appear inside a longer UA string
                self.rules
                    .iter()
                    .find(|(k, _)| agent_lower.contains(k.as_str()))
                    .map(|(_, v)| v)
            })
            .unwrap_or(&self.default_rules);

        // Allow rules take precedence
        for allow in &rules.allow {
            if path.starts_with(allow) {
                return true;
            }
        }

        for disallow in &rules.disallow {
            if disallow == "/" || path.starts_with(disallow) {
                return false;
            }
        }

        true
    }
}

/// Fetch and parse robots.txt for the host of `url`.
///
/// Any failure to retrieve or read the resource yields permissive
/// default rules.
pub async fn fetch_robots_txt(fetcher: &dyn Fetcher, url: &CanonicalUrl) -> RobotsTxt {
    let robots_url = match CanonicalUrl::parse(&url.robots_url()) {
        Ok(robots_url) => robots_url,
        Err(_) => return RobotsTxt::default(),
    };

    match fetcher.fetch(&robots_url).await {
        Ok(document) => RobotsTxt::parse(&document.content),
        Err(e) => {
            tracing::debug!(url = %robots_url, error = %e, "robots.txt unreachable, allowing");
            RobotsTxt::default()
        }
    }
}
