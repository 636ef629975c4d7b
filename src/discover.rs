//! Resource discovery boundary
//!
//! Turning a starting URL into the list of downloadable resource URLs is a
//! caller concern (page scraping, API listings, hand-written lists). The
//! pipeline only depends on this trait, so any of those can be plugged in.

use crate::error::Result;
use async_trait::async_trait;

/// Produces the ordered list of resource URLs reachable from a starting URL.
#[async_trait]
pub trait ResourceDiscovery: Send + Sync {
    /// Resolve `url` to the resource URLs it refers to, in download order.
    async fn discover_resources(&self, url: &str) -> Result<Vec<String>>;
}

/// Discovery that always yields a fixed, pre-computed list, ignoring the
/// starting URL. Useful when the caller already holds the resource URLs.
#[derive(Debug, Clone, Default)]
pub struct FixedListDiscovery {
    urls: Vec<String>,
}

impl FixedListDiscovery {
    /// Wrap an already-known list of resource URLs
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl ResourceDiscovery for FixedListDiscovery {
    async fn discover_resources(&self, _url: &str) -> Result<Vec<String>> {
        Ok(self.urls.clone())
    }
}
