//! URL handling for cagecrawl
//!
//! Provides the normalization applied before the frontier's seen-check and
//! the admission policy deciding which discovered URLs are worth queuing.

mod normalize;

pub use normalize::normalize_url;

use crate::config::AdmissionConfig;
use url::Url;

/// Decides which discovered URLs are eligible for the frontier
///
/// A URL is admitted only when all three hold:
/// 1. its host is one of the allowed domains (or a subdomain of one),
/// 2. its string contains at least one allow pattern,
/// 3. its string contains no block pattern.
///
/// The patterns are plain substrings supplied by configuration; the engine
/// has no knowledge of any site's path scheme.
#[derive(Debug, Clone)]
pub struct AdmissionPolicy {
    allowed_domains: Vec<String>,
    allow: Vec<String>,
    block: Vec<String>,
}

impl AdmissionPolicy {
    pub fn from_config(config: &AdmissionConfig) -> Self {
        Self {
            allowed_domains: config
                .allowed_domains
                .iter()
                .map(|d| d.to_lowercase())
                .collect(),
            allow: config.allow.clone(),
            block: config.block.clone(),
        }
    }

    /// Returns whether a normalized URL passes the policy
    pub fn admits(&self, url: &Url) -> bool {
        let host = match url.host_str() {
            Some(h) => h.to_lowercase(),
            None => return false,
        };

        if !self
            .allowed_domains
            .iter()
            .any(|d| host == *d || host.ends_with(&format!(".{}", d)))
        {
            return false;
        }

        let url_str = url.as_str();
        if !self.allow.iter().any(|p| url_str.contains(p.as_str())) {
            return false;
        }

        !self.block.iter().any(|p| url_str.contains(p.as_str()))
    }
}
