//! Accent-insensitive search over the ten-template fixture

use calc_catalog::{CatalogFilterState, SortBy, TemplateFilterEngine};
use calc_test_utils::{seismic_catalog, VERIFIED_SEISMIC_IDS};
use pretty_assertions::assert_eq;

fn search(sort_by: SortBy) -> Vec<String> {
    let filter = CatalogFilterState::default()
        .with_search("sismic")
        .verified_only(true)
        .with_sort(sort_by);
    TemplateFilterEngine::new()
        .apply(&seismic_catalog(), &filter)
        .into_iter()
        .map(|t| t.id.0)
        .collect()
}

#[test]
fn returns_exactly_the_verified_seismic_templates() {
    let mut found = search(SortBy::Popular);
    found.sort();
    let mut expected: Vec<String> = VERIFIED_SEISMIC_IDS.iter().map(ToString::to_string).collect();
    expected.sort();
    assert_eq!(found, expected);
}

#[test]
fn results_follow_the_active_sort() {
    assert_eq!(search(SortBy::Popular), vec!["struct-01", "struct-04", "geo-02"]);
    assert_eq!(search(SortBy::Rating), vec!["struct-04", "struct-01", "geo-02"]);
    assert_eq!(search(SortBy::Trending), vec!["struct-04", "struct-01", "geo-02"]);
    assert_eq!(search(SortBy::Recent), vec!["geo-02", "struct-04", "struct-01"]);
    assert_eq!(search(SortBy::Name), vec!["struct-01", "struct-04", "geo-02"]);
}

#[test]
fn unverified_match_appears_when_verified_filter_is_off() {
    let filter = CatalogFilterState::unfiltered().with_search("SÍSMICO");
    let found = TemplateFilterEngine::new().apply(&seismic_catalog(), &filter);
    assert_eq!(found.len(), 4);
    assert!(found.iter().any(|t| t.id.as_str() == "struct-03"));
}

#[test]
fn search_reaches_tags() {
    let filter = CatalogFilterState::default().with_search("tuberias");
    let found = TemplateFilterEngine::new().apply(&seismic_catalog(), &filter);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id.as_str(), "hyd-01");
}
