//! Error handling types and utilities.

use thiserror::Error;

/// A specialized Result type for lotsearch collaborator operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Validation and collaborator failures surfaced by the search operations.
///
/// These are never propagated past the operation boundary: each public
/// operation converts them into a failure [`SearchResponse`] envelope so the
/// calling layer can render them directly.
///
/// [`SearchResponse`]: crate::types::SearchResponse
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// Keyword was empty or whitespace-only after trimming.
    #[error("search keyword must not be empty")]
    EmptyKeyword,
    /// Category was empty or whitespace-only after trimming.
    #[error("category must not be empty")]
    EmptyCategory,
    /// Filter criteria had zero populated fields.
    #[error("at least one filter criterion must be set")]
    EmptyCriteria,
    /// Requested page was below 1.
    #[error("page must be at least 1, got {0}")]
    InvalidPage(u32),
    /// Requested page size was outside the accepted range.
    #[error("page size must be between 1 and 100, got {0}")]
    InvalidPageSize(u32),
    /// Seller rating bound outside the [0, 5] scale.
    #[error("rating bound must be within 0..=5, got {0}")]
    InvalidRatingBound(f32),
    /// The catalog store could not produce listings.
    #[error("catalog unavailable: {0}")]
    Catalog(String),
}
