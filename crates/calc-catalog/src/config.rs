//! Catalog configuration

use crate::cache::TemplateCache;
use crate::filter::{CatalogFilterState, SortBy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Catalog view defaults and cache sizing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Sort applied when the catalog opens
    pub default_sort: SortBy,
    /// Whether the catalog opens with only verified templates
    pub show_only_verified: bool,
    /// Maximum number of cached templates
    pub cache_capacity: u64,
    /// Seconds an opened template stays cached; unset keeps it until evicted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_ttl_secs: Option<u64>,
    /// Number of entries in the trending strip
    pub trending_limit: usize,
}

impl CatalogConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With default sort
    #[inline]
    #[must_use]
    pub fn with_default_sort(mut self, sort_by: SortBy) -> Self {
        self.default_sort = sort_by;
        self
    }

    /// With cache capacity
    #[inline]
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// With cache expiry
    #[inline]
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl_secs = Some(ttl.as_secs());
        self
    }

    /// Template cache sized and timed by this configuration
    #[must_use]
    pub fn build_cache(&self) -> TemplateCache {
        match self.cache_ttl_secs {
            Some(secs) => TemplateCache::with_ttl(self.cache_capacity, Duration::from_secs(secs)),
            None => TemplateCache::new(self.cache_capacity),
        }
    }

    /// Filter state a fresh catalog view starts with
    #[must_use]
    pub fn initial_filters(&self) -> CatalogFilterState {
        CatalogFilterState::default()
            .with_sort(self.default_sort)
            .verified_only(self.show_only_verified)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_sort: SortBy::Popular,
            show_only_verified: true,
            cache_capacity: 256,
            cache_ttl_secs: None,
            trending_limit: 5,
        }
    }
}
