//! Relevance scoring and result ordering.
//!
//! Scoring weights are deliberately simple, tunable constants. The contract
//! is the relative ordering they induce: an exact brand/model match outranks
//! a substring match, which outranks a popularity-only signal.

use std::cmp::Ordering;

use crate::listing::Listing;
use crate::types::{SortDirection, SortField};

const EXACT_BRAND: f64 = 100.0;
const EXACT_MODEL: f64 = 100.0;
const EXACT_CATEGORY: f64 = 80.0;
const PARTIAL_BRAND: f64 = 50.0;
const PARTIAL_MODEL: f64 = 50.0;
const PARTIAL_DESCRIPTION: f64 = 30.0;
const PARTIAL_CATEGORY: f64 = 40.0;
const VERIFIED_BONUS: f64 = 10.0;
const VIEW_WEIGHT: f64 = 0.1;
const FAVORITE_WEIGHT: f64 = 2.0;

/// Additive relevance score of a listing for a lower-cased query. Each
/// clause contributes independently; higher is better.
#[allow(clippy::cast_precision_loss)]
pub fn relevance_score(listing: &Listing, query: &str) -> f64 {
    let brand = listing.brand.to_lowercase();
    let model = listing.model.to_lowercase();
    let category = listing.category.to_lowercase();
    let description = listing.description.to_lowercase();

    let mut score = 0.0;

    if brand == query {
        score += EXACT_BRAND;
    }
    if model == query {
        score += EXACT_MODEL;
    }
    if category == query {
        score += EXACT_CATEGORY;
    }

    if brand.contains(query) {
        score += PARTIAL_BRAND;
    }
    if model.contains(query) {
        score += PARTIAL_MODEL;
    }
    if description.contains(query) {
        score += PARTIAL_DESCRIPTION;
    }
    if category.contains(query) {
        score += PARTIAL_CATEGORY;
    }

    if listing.seller.verified {
        score += VERIFIED_BONUS;
    }

    score += listing.views as f64 * VIEW_WEIGHT;
    score += listing.favorites as f64 * FAVORITE_WEIGHT;

    score
}

/// Ascending comparison on the requested sort dimension.
///
/// Relevance ties are broken by listing id so repeated queries against
/// unchanged data return identical ordering; other dimensions rely on the
/// stability of the surrounding sort.
fn compare(a: &Listing, b: &Listing, sort_by: SortField, query: &str) -> Ordering {
    match sort_by {
        SortField::Relevance => relevance_score(a, query)
            .total_cmp(&relevance_score(b, query))
            .then_with(|| b.id.cmp(&a.id)),
        SortField::Price => a.price.cmp(&b.price),
        SortField::Year => a.year.cmp(&b.year),
        SortField::Mileage => a.mileage.cmp(&b.mileage),
        SortField::PostedAt => a.posted_at.cmp(&b.posted_at),
        SortField::Views => a.views.cmp(&b.views),
        SortField::Favorites => a.favorites.cmp(&b.favorites),
        SortField::Rating => a.seller.rating.total_cmp(&b.seller.rating),
    }
}

/// Stable sort of the surviving match set.
///
/// `query` feeds relevance scoring and must already be normalized
/// (trimmed, lower-cased); it is ignored by the other sort modes.
pub fn sort_listings(
    listings: &mut [Listing],
    sort_by: SortField,
    direction: SortDirection,
    query: &str,
) {
    listings.sort_by(|a, b| {
        let ordering = compare(a, b, sort_by, query);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}
