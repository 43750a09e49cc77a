//! Approximate text matching with token-level edit-distance tolerance.
//!
//! The matcher favors recall over precision: it tokenizes on whitespace,
//! lower-cases both sides, and accepts a query when every query token is
//! within a bounded Levenshtein distance of at least one haystack token.
//! Extra haystack tokens are ignored and token order is irrelevant.

use rapidfuzz::distance::levenshtein;

/// Fraction of a query token's length allowed to differ (rounded down).
const TOLERANCE_RATIO: f64 = 0.2;

/// Character-level Levenshtein distance (insertion, deletion, substitution,
/// unit cost).
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    levenshtein::distance(a.chars(), b.chars())
}

/// Edit tolerance for a query token: `max(1, floor(0.2 * len))`.
///
/// Short tokens always tolerate a single edit, longer ones roughly 20% of
/// their character count.
fn edit_tolerance(token: &str) -> usize {
    #[allow(clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let scaled = (token.chars().count() as f64 * TOLERANCE_RATIO).floor() as usize;
    scaled.max(1)
}

/// Exact (non-fuzzy) match: the lower-cased haystack must contain the
/// lower-cased query as a substring.
pub fn exact_matches(haystack: &str, query: &str) -> bool {
    haystack.to_lowercase().contains(&query.to_lowercase())
}

/// Fuzzy match: every query token must be within [`edit_tolerance`] of some
/// haystack token.
///
/// Substring containment short-circuits to `true`, so a fuzzy match is never
/// stricter than an exact one.
pub fn fuzzy_matches(haystack: &str, query: &str) -> bool {
    let haystack = haystack.to_lowercase();
    let query = query.to_lowercase();

    if haystack.contains(&query) {
        return true;
    }

    let haystack_tokens: Vec<&str> = haystack.split_whitespace().collect();

    query.split_whitespace().all(|query_token| {
        let tolerance = edit_tolerance(query_token);
        haystack_tokens
            .iter()
            .any(|haystack_token| levenshtein_distance(haystack_token, query_token) <= tolerance)
    })
}
