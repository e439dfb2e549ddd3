//! Catalog controller
//!
//! [`Catalog`] owns one catalog view: its filter state, the whole template
//! collection fetched from the repository, and a template cache for opening
//! calculation pages. Every filter, category included, applies locally on
//! the next [`Catalog::results`] call, so sidebar counts and the trending
//! strip always see the full catalog.

use crate::cache::TemplateCache;
use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::filter::{CatalogFilterState, SortBy, TemplateFilterEngine};
use crate::repository::TemplateRepository;
use calc_template::{CalculationTemplate, Difficulty, TemplateId};
use std::collections::BTreeMap;
use std::sync::Arc;

/// One searchable, filterable catalog view
pub struct Catalog {
    repository: Arc<dyn TemplateRepository>,
    cache: TemplateCache,
    config: CatalogConfig,
    engine: TemplateFilterEngine,
    filters: CatalogFilterState,
    templates: Vec<CalculationTemplate>,
    needs_refresh: bool,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("filters", &self.filters)
            .field("templates", &self.templates.len())
            .field("needs_refresh", &self.needs_refresh)
            .finish_non_exhaustive()
    }
}

impl Catalog {
    /// Create a catalog view; call [`Self::refresh`] before reading results
    #[must_use]
    pub fn new(repository: Arc<dyn TemplateRepository>, config: CatalogConfig) -> Self {
        Self {
            repository,
            cache: config.build_cache(),
            filters: config.initial_filters(),
            config,
            engine: TemplateFilterEngine::new(),
            templates: Vec::new(),
            needs_refresh: true,
        }
    }

    /// Fetch the full collection from the repository
    ///
    /// # Errors
    /// Repository failures; the previous collection is kept.
    pub async fn refresh(&mut self) -> Result<usize, CatalogError> {
        let templates = self
            .repository
            .list_templates(&CatalogFilterState::unfiltered())
            .await?;
        tracing::info!(templates = templates.len(), "catalog refreshed");
        self.cache.invalidate_all();
        self.templates = templates;
        self.needs_refresh = false;
        Ok(self.templates.len())
    }

    /// Filtered and sorted templates
    #[must_use]
    pub fn results(&self) -> Vec<CalculationTemplate> {
        self.engine.apply(&self.templates, &self.filters)
    }

    /// Current filter state
    #[inline]
    #[must_use]
    pub fn filters(&self) -> &CatalogFilterState {
        &self.filters
    }

    /// Whether no refresh has succeeded yet
    #[inline]
    #[must_use]
    pub fn needs_refresh(&self) -> bool {
        self.needs_refresh
    }

    /// Templates from the last refresh, unfiltered
    #[inline]
    #[must_use]
    pub fn fetched(&self) -> &[CalculationTemplate] {
        &self.templates
    }

    /// Set the search term; applies on the next [`Self::results`]
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filters.search_term = term.into();
    }

    /// Change category; the subcategory is cleared with it
    pub fn set_category(&mut self, category: Option<String>) {
        if self.filters.category != category {
            self.filters.category = category;
            self.filters.subcategory = None;
        }
    }

    /// Change subcategory
    pub fn set_subcategory(&mut self, subcategory: Option<String>) {
        self.filters.subcategory = subcategory;
    }

    /// Filter by difficulty, `None` for any
    pub fn set_difficulty(&mut self, difficulty: Option<Difficulty>) {
        self.filters.difficulty = difficulty;
    }

    /// Change sort order
    pub fn set_sort(&mut self, sort_by: SortBy) {
        self.filters.sort_by = sort_by;
    }

    /// Only show favorites
    pub fn set_show_only_favorites(&mut self, on: bool) {
        self.filters.show_only_favorites = on;
    }

    /// Only show verified templates
    pub fn set_show_only_verified(&mut self, on: bool) {
        self.filters.show_only_verified = on;
    }

    /// Back to the configured initial filters
    pub fn reset_filters(&mut self) {
        self.filters = self.config.initial_filters();
    }

    /// Replace the whole filter state (e.g. restored from a URL)
    pub fn set_filters(&mut self, filters: CatalogFilterState) {
        self.filters = filters;
    }

    /// Open a template for a calculation page
    ///
    /// # Errors
    /// `CatalogError::NotFound` when the id does not resolve; the page should
    /// offer a way back to the catalog (see `CatalogError::recovery_action`).
    pub async fn open_template(
        &self,
        id: &TemplateId,
    ) -> Result<Arc<CalculationTemplate>, CatalogError> {
        self.cache
            .get_or_fetch(id, self.repository.as_ref())
            .await
            .map_err(|e| {
                tracing::warn!(template = %id, error = %e, "failed to open template");
                e
            })
    }

    /// Toggle a favorite
    ///
    /// On success the local copy is updated and the new flag returned. On
    /// failure the error is logged, local state is left as it was, and
    /// `None` is returned.
    pub async fn toggle_favorite(&mut self, id: &TemplateId) -> Option<bool> {
        match self.repository.toggle_favorite(id).await {
            Ok(is_favorite) => {
                if let Some(t) = self.templates.iter_mut().find(|t| &t.id == id) {
                    t.is_favorite = is_favorite;
                }
                self.cache.invalidate(id).await;
                Some(is_favorite)
            }
            Err(e) => {
                tracing::warn!(template = %id, error = %e, "favorite toggle failed");
                None
            }
        }
    }

    /// Count a completed calculation against a template
    ///
    /// Failures are logged and otherwise ignored.
    pub async fn record_usage(&mut self, id: &TemplateId) -> Option<u64> {
        match self.repository.record_usage(id).await {
            Ok(count) => {
                if let Some(t) = self.templates.iter_mut().find(|t| &t.id == id) {
                    t.usage_count = t.usage_count.max(count);
                }
                self.cache.invalidate(id).await;
                Some(count)
            }
            Err(e) => {
                tracing::warn!(template = %id, error = %e, "usage update failed");
                None
            }
        }
    }

    /// Top trending templates under the current verified/favorite filters
    ///
    /// Search, category and difficulty are ignored: the trending strip shows
    /// the whole catalog.
    #[must_use]
    pub fn trending(&self, limit: Option<usize>) -> Vec<CalculationTemplate> {
        let filter = CatalogFilterState::unfiltered()
            .verified_only(self.filters.show_only_verified)
            .favorites_only(self.filters.show_only_favorites)
            .with_sort(SortBy::Trending);
        let mut out = self.engine.apply(&self.templates, &filter);
        out.truncate(limit.unwrap_or(self.config.trending_limit));
        out
    }

    /// Per-category counts for the sidebar
    #[must_use]
    pub fn category_counts(&self) -> BTreeMap<String, usize> {
        self.engine.category_counts(&self.templates, &self.filters)
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }
}
