//! Template cache using moka
//!
//! Opening a template from the catalog goes through [`TemplateCache`], so
//! repeated visits to the same calculation page do not hit the repository.
//! Entries are invalidated when a write (favorite toggle, usage) changes them
//! and dropped wholesale when the catalog is refreshed.

use crate::error::CatalogError;
use crate::repository::TemplateRepository;
use calc_template::{CalculationTemplate, TemplateId};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Id-keyed cache of shared templates
#[derive(Debug, Clone)]
pub struct TemplateCache {
    inner: Cache<TemplateId, Arc<CalculationTemplate>>,
}

impl TemplateCache {
    /// Create new cache with max capacity
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
        }
    }

    /// Create cache whose entries expire `ttl` after insertion
    #[inline]
    #[must_use]
    pub fn with_ttl(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Cached template, if present
    #[inline]
    pub async fn get(&self, id: &TemplateId) -> Option<Arc<CalculationTemplate>> {
        self.inner.get(id).await
    }

    /// Insert or replace
    #[inline]
    pub async fn insert(&self, template: Arc<CalculationTemplate>) {
        self.inner.insert(template.id.clone(), template).await;
    }

    /// Cached template, or fetch it from `repository` and cache it
    ///
    /// # Errors
    /// Whatever the repository returns; failures are not cached.
    pub async fn get_or_fetch(
        &self,
        id: &TemplateId,
        repository: &dyn TemplateRepository,
    ) -> Result<Arc<CalculationTemplate>, CatalogError> {
        if let Some(cached) = self.get(id).await {
            return Ok(cached);
        }

        let template = Arc::new(repository.get_template(id).await?);
        self.insert(Arc::clone(&template)).await;
        Ok(template)
    }

    /// Invalidate one entry
    #[inline]
    pub async fn invalidate(&self, id: &TemplateId) {
        self.inner.invalidate(id).await;
    }

    /// Invalidate all entries
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

impl Default for TemplateCache {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryTemplateRepository;

    #[tokio::test]
    async fn fetches_once_then_serves_cached() {
        let repo = InMemoryTemplateRepository::from_templates([CalculationTemplate::new(
            "a", "A", "electrical",
        )])
        .unwrap();
        let cache = TemplateCache::new(16);
        let id = TemplateId::new("a");

        assert!(cache.get(&id).await.is_none());
        let first = cache.get_or_fetch(&id, &repo).await.unwrap();
        let second = cache.get_or_fetch(&id, &repo).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        cache.invalidate(&id).await;
        assert!(cache.get(&id).await.is_none());
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let repo = InMemoryTemplateRepository::from_templates([CalculationTemplate::new(
            "a", "A", "electrical",
        )])
        .unwrap();
        let cache = TemplateCache::with_ttl(16, Duration::from_millis(50));
        let id = TemplateId::new("a");

        cache.get_or_fetch(&id, &repo).await.unwrap();
        assert!(cache.get(&id).await.is_some());
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(cache.get(&id).await.is_none());
    }

    #[tokio::test]
    async fn invalidate_all_drops_every_entry() {
        let repo = InMemoryTemplateRepository::from_templates([
            CalculationTemplate::new("a", "A", "electrical"),
            CalculationTemplate::new("b", "B", "hydraulic"),
        ])
        .unwrap();
        let cache = TemplateCache::new(16);
        for id in ["a", "b"] {
            cache.get_or_fetch(&TemplateId::new(id), &repo).await.unwrap();
        }

        cache.invalidate_all();
        assert!(cache.get(&TemplateId::new("a")).await.is_none());
        assert!(cache.get(&TemplateId::new("b")).await.is_none());
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let repo = InMemoryTemplateRepository::new();
        let cache = TemplateCache::default();
        let id = TemplateId::new("missing");
        assert!(matches!(
            cache.get_or_fetch(&id, &repo).await,
            Err(CatalogError::NotFound(_))
        ));
        assert!(cache.get(&id).await.is_none());
    }
}
