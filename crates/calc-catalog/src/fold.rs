//! Search text folding
//!
//! Catalog search is case- and diacritic-insensitive: "sismic" finds
//! "Análisis Sísmico". Text is decomposed (NFD), combining marks are dropped,
//! and the rest is lower-cased.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold text for search comparison
#[must_use]
pub fn fold_text(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether folded `needle` occurs in `haystack`
///
/// `needle` must already be folded.
#[inline]
#[must_use]
pub fn folded_contains(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || fold_text(haystack).contains(needle)
}
