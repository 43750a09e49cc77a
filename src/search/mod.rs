//! Matching and ranking primitives for catalog search.
//!
//! This module provides structured-filter evaluation, fuzzy/approximate text
//! matching, and relevance scoring used by the search engine.

// Module declarations
pub mod filter;
pub mod fuzzy;
pub mod ranking;

// Public re-exports (used via lib.rs)
pub use filter::FilterCriteria;
pub use fuzzy::{exact_matches, fuzzy_matches, levenshtein_distance};
pub use ranking::relevance_score;
