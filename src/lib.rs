//! In-memory search, filter, and ranking engine for vehicle marketplace
//! catalogs.
//!
//! The crate's entry point is [`SearchEngine`], which wires structured-filter
//! evaluation, fuzzy text matching, relevance ranking, pagination, a
//! time-bounded result cache, and search-history-driven suggestions into
//! three operations: [`SearchEngine::search`],
//! [`SearchEngine::filter_by_category`], and
//! [`SearchEngine::apply_advanced_filter`].

pub mod cache;
pub mod catalog;
pub mod clock;
pub mod engine;
pub mod error;
pub mod history;
pub mod listing;
pub mod search;
pub mod tracing;
pub mod types;

pub use cache::CacheConfig;
pub use catalog::{CatalogStore, InMemoryCatalog};
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::SearchEngine;
pub use error::SearchError;
pub use history::{HistoryStore, JsonFileStore, NullStore};
pub use listing::{
    Condition, FuelType, Listing, ListingStatus, SearchField, Seller, Transmission,
};
pub use search::FilterCriteria;
pub use types::{
    SearchOptions, SearchResponse, SearchResult, SortDirection, SortField,
};
