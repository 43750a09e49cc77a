//! Catalog store collaborator: the read-only source of listing records.

use crate::error::Result;
use crate::listing::Listing;

/// Read-only source of catalog records.
///
/// The engine never mutates listings; updates to the underlying collection
/// are the store's concern and must be synchronized there. Implementations
/// backed by a network or disk source should surface failures through the
/// `Result` so the engine can return a failure envelope.
pub trait CatalogStore: Send + Sync {
    /// Returns a snapshot of every listing in the catalog.
    fn all_listings(&self) -> Result<Vec<Listing>>;
}

/// In-memory catalog store backed by a plain vector.
///
/// Suitable for moderate-cardinality catalogs that fit in memory, which is
/// the scale this engine targets.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    listings: Vec<Listing>,
}

impl InMemoryCatalog {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    /// Number of records in the catalog.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

impl CatalogStore for InMemoryCatalog {
    fn all_listings(&self) -> Result<Vec<Listing>> {
        Ok(self.listings.clone())
    }
}
