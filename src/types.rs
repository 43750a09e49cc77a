//! Request options, sort modes, and result/envelope types.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::listing::{Listing, SearchField};
use crate::search::filter::FilterCriteria;

/// Upper bound on the requested page size.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Default page size when the request leaves it unset.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Sortable result dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Query-dependent relevance score; only meaningful for keyword search.
    Relevance,
    Price,
    Year,
    Mileage,
    PostedAt,
    Views,
    Favorites,
    /// Seller rating.
    Rating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Per-request knobs shared by all three search operations.
///
/// Unset fields fall back to operation-specific defaults: keyword search
/// sorts by relevance descending, category filter by posting date descending,
/// advanced filter by price ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// 1-based page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortDirection>,
    /// Include listings whose status is not `Active`.
    pub include_inactive: bool,
    /// Tolerant token-level matching; defaults to on.
    pub fuzzy: bool,
    /// Fields the keyword search builds its candidate text from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_fields: Option<Vec<SearchField>>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            page: None,
            page_size: None,
            sort_by: None,
            sort_order: None,
            include_inactive: false,
            fuzzy: true,
            search_fields: None,
        }
    }
}

impl SearchOptions {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Checks the request-level bounds shared by all operations.
    pub(crate) fn validate(&self) -> Result<(), SearchError> {
        if let Some(page) = self.page
            && page < 1
        {
            return Err(SearchError::InvalidPage(page));
        }
        if let Some(size) = self.page_size
            && !(1..=MAX_PAGE_SIZE).contains(&size)
        {
            return Err(SearchError::InvalidPageSize(size));
        }
        Ok(())
    }
}

/// One page of matches plus pagination bookkeeping and echoes of the request.
///
/// Constructed fresh per request and never mutated after return; the result
/// cache stores it by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult<T> {
    pub items: Vec<T>,
    /// Total matches before pagination.
    pub total_count: usize,
    pub current_page: u32,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    /// Echo of the keyword, when the operation had one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Echo of the structured criteria, when the operation had one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterCriteria>,
    /// Wall time from operation entry to result assembly, in milliseconds.
    pub execution_time_ms: u64,
    pub suggestions: Vec<String>,
}

/// Success/failure envelope returned by every public operation.
///
/// Failures carry renderable messages instead of propagating errors; zero
/// matches is a success with an empty page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<SearchResult<Listing>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl SearchResponse {
    pub(crate) fn ok(message: impl Into<String>, data: SearchResult<Listing>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }

    pub(crate) fn failure(message: impl Into<String>, error: &SearchError) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors: Some(vec![error.to_string()]),
        }
    }
}
