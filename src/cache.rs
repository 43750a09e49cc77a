//! Time-bounded result memoization.
//!
//! The cache is purely an optimization: disabling it must only affect
//! latency, never results. Entries expire after a fixed TTL and the store is
//! capacity-bounded, evicting the oldest-inserted entry when full. Lookups
//! never promote entries, so capacity eviction approximates
//! insertion order rather than true LRU.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lru::LruCache;

use crate::clock::Clock;
use crate::listing::Listing;
use crate::search::filter::FilterCriteria;
use crate::types::{SearchOptions, SearchResult};

/// TTL and capacity knobs for the result cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Entry lifetime from insertion.
    pub ttl: Duration,
    /// Maximum entry count; 0 disables caching entirely.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
            capacity: 100,
        }
    }
}

impl CacheConfig {
    /// A configuration that caches nothing.
    pub fn disabled() -> Self {
        Self {
            ttl: Duration::ZERO,
            capacity: 0,
        }
    }
}

/// Deterministic cache key: operation kind + normalized query-or-criteria +
/// full options.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    fn options_json(options: &SearchOptions) -> String {
        serde_json::to_string(options).unwrap_or_default()
    }

    /// Key for a keyword search; `keyword` must already be normalized.
    pub fn keyword(keyword: &str, options: &SearchOptions) -> Self {
        Self(format!("search:{keyword}:{}", Self::options_json(options)))
    }

    /// Key for a category filter; `category` must already be normalized.
    pub fn category(category: &str, options: &SearchOptions) -> Self {
        Self(format!("category:{category}:{}", Self::options_json(options)))
    }

    /// Key for an advanced filter. Criteria serialize with fixed field order,
    /// so equal criteria always produce equal keys.
    pub fn advanced(criteria: &FilterCriteria, options: &SearchOptions) -> Self {
        let criteria_json = serde_json::to_string(criteria).unwrap_or_default();
        Self(format!(
            "advanced:{criteria_json}:{}",
            Self::options_json(options)
        ))
    }
}

struct CacheEntry {
    result: SearchResult<Listing>,
    inserted_at: Instant,
}

/// Bounded, TTL-checked store of assembled search results.
pub struct ResultCache {
    entries: Option<LruCache<CacheKey, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl ResultCache {
    pub fn new(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        let entries = NonZeroUsize::new(config.capacity).map(LruCache::new);
        Self {
            entries,
            ttl: config.ttl,
            clock,
        }
    }

    /// Returns the cached result for `key`, or `None` on miss or expiry.
    /// Expired entries are removed on the way out.
    pub fn get(&mut self, key: &CacheKey) -> Option<SearchResult<Listing>> {
        let entries = self.entries.as_mut()?;
        let now = self.clock.now();

        // peek() rather than get(): lookups must not refresh recency, so the
        // LRU order stays insertion order.
        match entries.peek(key) {
            Some(entry) if now.duration_since(entry.inserted_at) < self.ttl => {
                tracing::debug!(key = %key.0, "result cache hit");
                Some(entry.result.clone())
            }
            Some(_) => {
                tracing::debug!(key = %key.0, "result cache entry expired");
                entries.pop(key);
                None
            }
            None => None,
        }
    }

    /// Stores `result` under `key`, evicting the oldest-inserted entry when
    /// the store is at capacity.
    pub fn put(&mut self, key: CacheKey, result: SearchResult<Listing>) {
        let Some(entries) = self.entries.as_mut() else {
            return;
        };
        let inserted_at = self.clock.now();
        entries.push(
            key,
            CacheEntry {
                result,
                inserted_at,
            },
        );
    }

    /// Current entry count, expired entries included.
    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, LruCache::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
