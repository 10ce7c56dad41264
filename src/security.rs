//! URL validation for SSRF protection.
//!
//! Validates canonical URLs before any content fetch to prevent:
//! - Access to internal services (localhost, 127.0.0.1)
//! - Access to private IP ranges (10.x, 172.16.x, 192.168.x)
//! - Access to cloud metadata services (169.254.x)
//! - Hostnames whose DNS records point at any of the above
//!
//! Every check here runs before the fetcher issues its GET; the only
//! network side effect is the DNS lookup itself.

use std::collections::HashSet;
use std::net::IpAddr;

use crate::canonical::CanonicalUrl;
use crate::error::{SecurityError, SecurityResult};

/// URL validator enforcing the pipeline's network-safety rules.
#[derive(Debug, Clone)]
pub struct UrlValidator {
    /// Blocked hostnames
    blocked_hosts: HashSet<String>,

    /// Blocked CIDR ranges
    blocked_cidrs: Vec<ipnet::IpNet>,

    /// Optional domain allow-list (exact host or subdomain of an entry).
    /// Empty means any public domain is allowed.
    allowed_domains: Vec<String>,
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlValidator {
    /// Create a validator with the default security rules.
    pub fn new() -> Self {
        Self {
            blocked_hosts: [
                "localhost",
                "127.0.0.1",
                "::1",
                "[::1]",
                "0.0.0.0",
                "metadata.google.internal",
                "metadata.gke.internal",
                "instance-data",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            blocked_cidrs: vec![
                "0.0.0.0/8".parse().unwrap(),      // "This network"
                "10.0.0.0/8".parse().unwrap(),
                "100.64.0.0/10".parse().unwrap(),  // Carrier-grade NAT
                "127.0.0.0/8".parse().unwrap(),    // Loopback
                "169.254.0.0/16".parse().unwrap(), // Link-local / cloud metadata
                "172.16.0.0/12".parse().unwrap(),
                "192.168.0.0/16".parse().unwrap(),
                "224.0.0.0/4".parse().unwrap(),    // Multicast
                "240.0.0.0/4".parse().unwrap(),    // Reserved
                "::1/128".parse().unwrap(),        // IPv6 loopback
                "fc00::/7".parse().unwrap(),       // IPv6 private
                "fe80::/10".parse().unwrap(),      // IPv6 link-local
                "ff00::/8".parse().unwrap(),       // IPv6 multicast
            ],
            allowed_domains: Vec::new(),
        }
    }

    /// Restrict fetches to the given domain suffixes.
    ///
    /// A host passes if it equals an entry or is a subdomain of one.
    pub fn with_allowed_domains(
        mut self,
        domains: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.allowed_domains = domains
            .into_iter()
            .map(|d| d.into().to_lowercase())
            .collect();
        self
    }

    /// Block an additional host.
    pub fn block_host(mut self, host: impl Into<String>) -> Self {
        self.blocked_hosts.insert(host.into());
        self
    }

    /// Block an additional CIDR range.
    pub fn block_cidr(mut self, cidr: ipnet::IpNet) -> Self {
        self.blocked_cidrs.push(cidr);
        self
    }

    /// Validate a URL without touching the network.
    ///
    /// Checks the blocked-host set, the domain allow-list, and (for IP
    /// literals) the blocked CIDR ranges.
    pub fn validate(&self, url: &CanonicalUrl) -> SecurityResult<()> {
        let host = url.host();

        if self.blocked_hosts.contains(host) {
            return Err(SecurityError::BlockedHost(host.to_string()));
        }

        if !self.domain_allowed(host) {
            return Err(SecurityError::DomainNotAllowed(host.to_string()));
        }

        if let Ok(ip) = host.trim_matches(['[', ']']).parse::<IpAddr>() {
            self.check_ip(host, ip)?;
        }

        Ok(())
    }

    /// Validate a URL and resolve DNS to check the actual addresses.
    ///
    /// This catches hostnames that resolve to internal IPs (including
    /// DNS rebinding setups). If **any** resolved address is blocked,
    /// the URL is rejected. A failed resolution is treated as "not
    /// proven unsafe" and allowed through; an unreachable host surfaces
    /// later as a fetch error.
    pub async fn validate_with_dns(&self, url: &CanonicalUrl) -> SecurityResult<()> {
        self.validate(url)?;

        let host = url.host();

        // IP literals were already checked against the CIDR table.
        if host.trim_matches(['[', ']']).parse::<IpAddr>().is_ok() {
            return Ok(());
        }

        let lookup = format!("{}:{}", host, url.port_or_default());
        let addrs = match tokio::net::lookup_host(&lookup).await {
            Ok(addrs) => addrs,
            Err(e) => {
                tracing::debug!(host = %host, error = %e, "DNS resolution failed, proceeding");
                return Ok(());
            }
        };

        for addr in addrs {
            self.check_ip(host, addr.ip())?;
        }

        Ok(())
    }

    fn check_ip(&self, host: &str, ip: IpAddr) -> SecurityResult<()> {
        for cidr in &self.blocked_cidrs {
            if cidr.contains(&ip) {
                return Err(SecurityError::BlockedAddress {
                    host: host.to_string(),
                    ip: ip.to_string(),
                });
            }
        }
        Ok(())
    }

    fn domain_allowed(&self, host: &str) -> bool {
        if self.allowed_domains.is_empty() {
            return true;
        }
        let host = host.to_lowercase();
        self.allowed_domains
            .iter()
            .any(|d| host == *d || host.ends_with(&format!(".{d}")))
    }
}
