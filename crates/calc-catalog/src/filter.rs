//! Template filter engine
//!
//! [`TemplateFilterEngine::apply`] narrows a template collection with the
//! predicates in a [`CatalogFilterState`] (AND semantics) and orders the
//! survivors by the chosen [`SortBy`]. Sorting is stable: templates with
//! equal keys keep their input order.
//!
//! The engine is pure and recomputes from scratch on every call; catalogs
//! are bounded to a few hundred templates on the client.

use crate::fold::{fold_text, folded_contains};
use calc_template::{CalculationTemplate, Difficulty};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Sort criterion for catalog results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Usage count, descending
    #[default]
    Popular,
    /// Average rating, descending
    Rating,
    /// Trending flag first, then usage count
    Trending,
    /// Last activity, most recent first
    Recent,
    /// Name, ascending, case- and accent-insensitive
    Name,
}

impl SortBy {
    /// All criteria, in menu order
    pub const ALL: [SortBy; 5] = [
        SortBy::Popular,
        SortBy::Rating,
        SortBy::Trending,
        SortBy::Recent,
        SortBy::Name,
    ];

    /// Lowercase name
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::Rating => "rating",
            Self::Trending => "trending",
            Self::Recent => "recent",
            Self::Name => "name",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown sort criterion: {s}"))
    }
}

/// Search and filter state of a catalog view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogFilterState {
    /// Free-text search over name, description and tags
    pub search_term: String,
    /// Exact category, `None` for all
    pub category: Option<String>,
    /// Exact subcategory, `None` for all
    pub subcategory: Option<String>,
    /// Exact difficulty, `None` for all
    pub difficulty: Option<Difficulty>,
    /// Sort criterion
    pub sort_by: SortBy,
    /// Keep only favorites
    pub show_only_favorites: bool,
    /// Keep only verified templates
    pub show_only_verified: bool,
}

impl Default for CatalogFilterState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category: None,
            subcategory: None,
            difficulty: None,
            sort_by: SortBy::default(),
            show_only_favorites: false,
            show_only_verified: true,
        }
    }
}

impl CatalogFilterState {
    /// Default catalog filters (verified only, most popular first)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters that let every template through
    #[inline]
    #[must_use]
    pub fn unfiltered() -> Self {
        Self {
            show_only_verified: false,
            ..Self::default()
        }
    }

    /// With search term
    #[inline]
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// With category
    #[inline]
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// With subcategory
    #[inline]
    #[must_use]
    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    /// With difficulty
    #[inline]
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// With sort order
    #[inline]
    #[must_use]
    pub fn with_sort(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Only favorites when `on`
    #[inline]
    #[must_use]
    pub fn favorites_only(mut self, on: bool) -> Self {
        self.show_only_favorites = on;
        self
    }

    /// Only verified templates when `on`
    #[inline]
    #[must_use]
    pub fn verified_only(mut self, on: bool) -> Self {
        self.show_only_verified = on;
        self
    }

    /// Number of active narrowing predicates (for a filter badge)
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        [
            !self.search_term.trim().is_empty(),
            self.category.is_some(),
            self.subcategory.is_some(),
            self.difficulty.is_some(),
            self.show_only_favorites,
            self.show_only_verified,
        ]
        .into_iter()
        .filter(|on| *on)
        .count()
    }
}

/// Stateless filter-and-sort engine
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateFilterEngine;

impl TemplateFilterEngine {
    /// Create new engine
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Filter then sort `templates`
    ///
    /// # Performance
    /// O(n log n) plus one fold of each template's text per call.
    #[must_use]
    pub fn apply(
        &self,
        templates: &[CalculationTemplate],
        filter: &CatalogFilterState,
    ) -> Vec<CalculationTemplate> {
        let needle = fold_text(filter.search_term.trim());
        let mut out: Vec<CalculationTemplate> = templates
            .iter()
            .filter(|t| Self::passes(t, filter, &needle, true))
            .cloned()
            .collect();
        Self::sort(&mut out, filter.sort_by);

        tracing::debug!(
            total = templates.len(),
            matched = out.len(),
            sort = %filter.sort_by,
            "catalog filter applied"
        );
        out
    }

    /// Whether a single template passes every predicate of `filter`
    #[must_use]
    pub fn matches(&self, template: &CalculationTemplate, filter: &CatalogFilterState) -> bool {
        let needle = fold_text(filter.search_term.trim());
        Self::passes(template, filter, &needle, true)
    }

    /// Per-category counts under every predicate except category/subcategory
    ///
    /// Used for catalog sidebars, where each category shows how many results
    /// selecting it would produce.
    #[must_use]
    pub fn category_counts(
        &self,
        templates: &[CalculationTemplate],
        filter: &CatalogFilterState,
    ) -> BTreeMap<String, usize> {
        let needle = fold_text(filter.search_term.trim());
        let mut counts = BTreeMap::new();
        for t in templates.iter().filter(|t| Self::passes(t, filter, &needle, false)) {
            *counts.entry(t.category.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Stable in-place sort by `sort_by`
    pub fn sort(templates: &mut [CalculationTemplate], sort_by: SortBy) {
        match sort_by {
            SortBy::Popular => templates.sort_by(|a, b| b.usage_count.cmp(&a.usage_count)),
            SortBy::Rating => {
                templates.sort_by(|a, b| b.average_rating.total_cmp(&a.average_rating));
            }
            SortBy::Trending => templates.sort_by(|a, b| {
                b.is_trending
                    .cmp(&a.is_trending)
                    .then_with(|| b.usage_count.cmp(&a.usage_count))
            }),
            SortBy::Recent => templates.sort_by(|a, b| b.last_activity().cmp(&a.last_activity())),
            SortBy::Name => templates.sort_by_cached_key(|t| (fold_text(&t.name), t.name.clone())),
        }
    }

    fn passes(
        t: &CalculationTemplate,
        filter: &CatalogFilterState,
        needle: &str,
        with_category: bool,
    ) -> bool {
        if with_category {
            if filter.category.as_ref().is_some_and(|c| *c != t.category) {
                return false;
            }
            if filter
                .subcategory
                .as_ref()
                .is_some_and(|s| t.subcategory.as_ref() != Some(s))
            {
                return false;
            }
        }
        if filter.difficulty.is_some_and(|d| d != t.difficulty) {
            return false;
        }
        if filter.show_only_favorites && !t.is_favorite {
            return false;
        }
        if filter.show_only_verified && !t.is_verified {
            return false;
        }
        Self::search_hit(t, needle)
    }

    /// Substring search over name, description and tags joined by spaces
    fn search_hit(t: &CalculationTemplate, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let haystack = std::iter::once(t.name.as_str())
            .chain(std::iter::once(t.description.as_str()))
            .chain(t.tags.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");
        folded_contains(&haystack, needle)
    }
}

/// Comparison used by [`SortBy::Name`], exposed for callers that merge lists
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    fold_text(a).cmp(&fold_text(b)).then_with(|| a.cmp(b))
}
