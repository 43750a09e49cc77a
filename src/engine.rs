//! Search orchestrator: wires the filter evaluator, fuzzy matcher, ranker,
//! pagination, result cache, and suggestion tracker into the three public
//! operations.
//!
//! Every operation follows the same shape: validate → cache lookup → compute
//! → cache store → envelope. Shared mutable state (cache, history) sits
//! behind narrow mutexes so independent requests can run in parallel.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::cache::{CacheConfig, CacheKey, ResultCache};
use crate::catalog::CatalogStore;
use crate::clock::{Clock, SystemClock};
use crate::error::{Result, SearchError};
use crate::history::{HistoryStore, HistoryTracker, NullStore, MAX_SUGGESTIONS};
use crate::listing::{Listing, ListingStatus, SearchField};
use crate::search::filter::FilterCriteria;
use crate::search::fuzzy::{exact_matches, fuzzy_matches};
use crate::search::ranking::sort_listings;
use crate::types::{SearchOptions, SearchResponse, SearchResult, SortDirection, SortField};

/// Catalog search engine for a single marketplace.
///
/// Construct one per catalog and share it freely: the engine is `Send + Sync`
/// and each operation runs to completion without internal yielding.
pub struct SearchEngine {
    catalog: Arc<dyn CatalogStore>,
    clock: Arc<dyn Clock>,
    cache: Mutex<ResultCache>,
    history: Mutex<HistoryTracker>,
}

impl SearchEngine {
    /// Engine with production defaults: system clock, in-memory history,
    /// 5-minute / 100-entry result cache.
    pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
        Self::with_parts(
            catalog,
            Arc::new(SystemClock),
            Box::new(NullStore),
            CacheConfig::default(),
        )
    }

    /// Engine with explicit collaborators, used to inject a fake clock, a
    /// persistent history store, or a disabled cache.
    pub fn with_parts(
        catalog: Arc<dyn CatalogStore>,
        clock: Arc<dyn Clock>,
        history_store: Box<dyn HistoryStore>,
        cache_config: CacheConfig,
    ) -> Self {
        Self {
            catalog,
            cache: Mutex::new(ResultCache::new(cache_config, clock.clone())),
            history: Mutex::new(HistoryTracker::new(history_store)),
            clock,
        }
    }

    // --- Public operations ---

    /// Free-text keyword search across the configured searchable fields.
    ///
    /// Records the normalized keyword in the search history and popularity
    /// counters, and returns suggestions alongside the result page.
    pub fn search(&self, keyword: &str, options: &SearchOptions) -> SearchResponse {
        let started = self.clock.now();

        let echo = keyword.trim().to_string();
        let normalized = echo.to_lowercase();
        if normalized.is_empty() {
            return SearchResponse::failure("Search failed", &SearchError::EmptyKeyword);
        }
        if let Err(error) = options.validate() {
            return SearchResponse::failure("Search failed", &error);
        }

        let key = CacheKey::keyword(&normalized, options);
        if let Some(result) = self.lock_cache().get(&key) {
            let message = format!(
                "Found {} results for \"{echo}\" (cached)",
                result.total_count
            );
            return SearchResponse::ok(message, result);
        }

        self.lock_history().record(&normalized);

        let listings = match self.catalog.all_listings() {
            Ok(listings) => listings,
            Err(error) => {
                tracing::warn!(%error, "catalog fetch failed during keyword search");
                return SearchResponse::failure(
                    "Search failed",
                    &SearchError::Catalog(error.to_string()),
                );
            }
        };

        let fields = options
            .search_fields
            .clone()
            .unwrap_or_else(|| SearchField::DEFAULT.to_vec());
        let catalog_terms = suggestion_terms(&listings, &normalized);

        let mut matched: Vec<Listing> = listings
            .into_iter()
            .filter(|listing| status_gate(listing, options))
            .filter(|listing| {
                let haystack = listing.candidate_text(&fields);
                if options.fuzzy {
                    fuzzy_matches(&haystack, &normalized)
                } else {
                    exact_matches(&haystack, &normalized)
                }
            })
            .collect();

        sort_listings(
            &mut matched,
            options.sort_by.unwrap_or(SortField::Relevance),
            options.sort_order.unwrap_or(SortDirection::Descending),
            &normalized,
        );
        tracing::debug!(total = matched.len(), keyword = %normalized, "keyword search computed");

        let suggestions =
            self.lock_history()
                .suggestions(&normalized, catalog_terms, MAX_SUGGESTIONS);

        let total = matched.len();
        let mut result = paginate(matched, options.page(), options.page_size());
        result.query = Some(echo.clone());
        result.suggestions = suggestions;
        result.execution_time_ms = self.elapsed_ms(started);

        self.lock_cache().put(key, result.clone());
        SearchResponse::ok(format!("Found {total} results for \"{echo}\""), result)
    }

    /// Browse one category. Matches against the category field only and is
    /// not recorded as a keyword search.
    pub fn filter_by_category(&self, category: &str, options: &SearchOptions) -> SearchResponse {
        let started = self.clock.now();

        let echo = category.trim().to_string();
        let normalized = echo.to_lowercase();
        if normalized.is_empty() {
            return SearchResponse::failure("Category filter failed", &SearchError::EmptyCategory);
        }
        if let Err(error) = options.validate() {
            return SearchResponse::failure("Category filter failed", &error);
        }

        let key = CacheKey::category(&normalized, options);
        if let Some(result) = self.lock_cache().get(&key) {
            let message = format!(
                "Found {} listings in category \"{echo}\" (cached)",
                result.total_count
            );
            return SearchResponse::ok(message, result);
        }

        let listings = match self.catalog.all_listings() {
            Ok(listings) => listings,
            Err(error) => {
                tracing::warn!(%error, "catalog fetch failed during category filter");
                return SearchResponse::failure(
                    "Category filter failed",
                    &SearchError::Catalog(error.to_string()),
                );
            }
        };

        let mut matched: Vec<Listing> = listings
            .into_iter()
            .filter(|listing| status_gate(listing, options))
            .filter(|listing| {
                if options.fuzzy {
                    fuzzy_matches(&listing.category, &normalized)
                } else {
                    listing.category.to_lowercase() == normalized
                }
            })
            .collect();

        sort_listings(
            &mut matched,
            options.sort_by.unwrap_or(SortField::PostedAt),
            options.sort_order.unwrap_or(SortDirection::Descending),
            &normalized,
        );
        tracing::debug!(total = matched.len(), category = %normalized, "category filter computed");

        let total = matched.len();
        let mut result = paginate(matched, options.page(), options.page_size());
        result.filters = Some(FilterCriteria {
            categories: Some(vec![echo.clone()]),
            ..FilterCriteria::default()
        });
        result.execution_time_ms = self.elapsed_ms(started);

        self.lock_cache().put(key, result.clone());
        SearchResponse::ok(
            format!("Found {total} listings in category \"{echo}\""),
            result,
        )
    }

    /// Structured filtering over every criteria dimension. No text matching
    /// and no history side effect.
    pub fn apply_advanced_filter(
        &self,
        criteria: &FilterCriteria,
        options: &SearchOptions,
    ) -> SearchResponse {
        let started = self.clock.now();

        if criteria.is_empty() {
            return SearchResponse::failure("Advanced filter failed", &SearchError::EmptyCriteria);
        }
        if let Some(rating) = criteria.min_rating
            && !(0.0..=5.0).contains(&rating)
        {
            return SearchResponse::failure(
                "Advanced filter failed",
                &SearchError::InvalidRatingBound(rating),
            );
        }
        if let Err(error) = options.validate() {
            return SearchResponse::failure("Advanced filter failed", &error);
        }

        let key = CacheKey::advanced(criteria, options);
        if let Some(result) = self.lock_cache().get(&key) {
            let message = format!(
                "Found {} listings matching the filter criteria (cached)",
                result.total_count
            );
            return SearchResponse::ok(message, result);
        }

        let listings = match self.catalog.all_listings() {
            Ok(listings) => listings,
            Err(error) => {
                tracing::warn!(%error, "catalog fetch failed during advanced filter");
                return SearchResponse::failure(
                    "Advanced filter failed",
                    &SearchError::Catalog(error.to_string()),
                );
            }
        };

        let mut matched: Vec<Listing> = listings
            .into_iter()
            .filter(|listing| status_gate(listing, options))
            .filter(|listing| criteria.matches(listing))
            .collect();

        sort_listings(
            &mut matched,
            options.sort_by.unwrap_or(SortField::Price),
            options.sort_order.unwrap_or(SortDirection::Ascending),
            "",
        );
        tracing::debug!(total = matched.len(), "advanced filter computed");

        let total = matched.len();
        let mut result = paginate(matched, options.page(), options.page_size());
        result.filters = Some(criteria.clone());
        result.execution_time_ms = self.elapsed_ms(started);

        self.lock_cache().put(key, result.clone());
        SearchResponse::ok(
            format!("Found {total} listings matching the filter criteria"),
            result,
        )
    }

    // --- Catalog introspection ---

    /// Distinct categories present in the catalog, sorted.
    pub fn available_categories(&self) -> Result<Vec<String>> {
        self.distinct_values(|listing| listing.category.clone())
    }

    /// Distinct brands present in the catalog, sorted.
    pub fn available_brands(&self) -> Result<Vec<String>> {
        self.distinct_values(|listing| listing.brand.clone())
    }

    /// Lowest and highest listed price, or `None` on an empty catalog.
    pub fn price_range(&self) -> Result<Option<(i64, i64)>> {
        let listings = self.catalog.all_listings()?;
        let min = listings.iter().map(|l| l.price).min();
        let max = listings.iter().map(|l| l.price).max();
        Ok(min.zip(max))
    }

    /// Oldest and newest model year, or `None` on an empty catalog.
    pub fn year_range(&self) -> Result<Option<(u16, u16)>> {
        let listings = self.catalog.all_listings()?;
        let min = listings.iter().map(|l| l.year).min();
        let max = listings.iter().map(|l| l.year).max();
        Ok(min.zip(max))
    }

    // --- History surface ---

    /// Past keyword searches, most recent first.
    pub fn search_history(&self) -> Vec<String> {
        self.lock_history().history()
    }

    pub fn clear_search_history(&self) {
        self.lock_history().clear();
    }

    /// Most frequent keywords, descending; equal counts order
    /// lexicographically.
    pub fn popular_searches(&self, limit: usize) -> Vec<String> {
        self.lock_history().popular(limit)
    }

    /// Autocomplete suggestions for a partial query, drawn from popular
    /// searches and catalog brand/model/category values.
    pub fn search_suggestions(&self, partial: &str) -> Result<Vec<String>> {
        let normalized = partial.trim().to_lowercase();
        let listings = self.catalog.all_listings()?;
        let terms = suggestion_terms(&listings, &normalized);
        Ok(self
            .lock_history()
            .suggestions(&normalized, terms, MAX_SUGGESTIONS))
    }

    // --- Internals ---

    fn distinct_values(&self, value: impl Fn(&Listing) -> String) -> Result<Vec<String>> {
        let listings = self.catalog.all_listings()?;
        let mut values: Vec<String> = listings.iter().map(value).collect();
        values.sort();
        values.dedup();
        Ok(values)
    }

    fn elapsed_ms(&self, started: Instant) -> u64 {
        u64::try_from(self.clock.now().duration_since(started).as_millis()).unwrap_or(u64::MAX)
    }

    fn lock_cache(&self) -> MutexGuard<'_, ResultCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_history(&self) -> MutexGuard<'_, HistoryTracker> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Request-level active gate: non-active listings are invisible unless the
/// request opts in.
fn status_gate(listing: &Listing, options: &SearchOptions) -> bool {
    options.include_inactive || listing.status == ListingStatus::Active
}

/// Slices one page out of the full match set. Out-of-range pages yield an
/// empty item list while keeping the totals intact.
fn paginate(items: Vec<Listing>, page: u32, page_size: u32) -> SearchResult<Listing> {
    let total_count = items.len();
    let page_size_usize = page_size as usize;
    #[allow(clippy::cast_possible_truncation)]
    let total_pages = total_count.div_ceil(page_size_usize) as u32;
    let start = (page as usize - 1).saturating_mul(page_size_usize);

    let items: Vec<Listing> = items
        .into_iter()
        .skip(start)
        .take(page_size_usize)
        .collect();

    SearchResult {
        items,
        total_count,
        current_page: page,
        total_pages,
        has_next_page: page < total_pages,
        has_previous_page: page > 1,
        query: None,
        filters: None,
        execution_time_ms: 0,
        suggestions: Vec::new(),
    }
}

/// Catalog-derived suggestion candidates: brands, models, and categories
/// whose lower-cased value contains the partial query, plus "Brand Model"
/// compounds, in discovery order.
fn suggestion_terms(listings: &[Listing], partial: &str) -> Vec<String> {
    let mut terms = Vec::new();
    for listing in listings {
        let compound = format!("{} {}", listing.brand, listing.model);
        if listing.brand.to_lowercase().contains(partial) {
            terms.push(listing.brand.clone());
            terms.push(compound.clone());
        }
        if listing.model.to_lowercase().contains(partial) {
            terms.push(listing.model.clone());
            terms.push(compound);
        }
        if listing.category.to_lowercase().contains(partial) {
            terms.push(listing.category.clone());
        }
    }
    terms
}
