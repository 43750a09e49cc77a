//! Search history, popularity counters, and suggestion derivation.
//!
//! The tracker is an explicit collaborator handed to the engine at
//! construction time. It holds a bounded most-recent-first list of past
//! queries plus a frequency map, and persists both through a [`HistoryStore`].
//! Persistence loss is non-fatal: it only degrades suggestions.

use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;

use ahash::AHashMap;
use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Maximum retained history entries.
const MAX_HISTORY: usize = 50;

/// Maximum suggestion count per request.
pub(crate) const MAX_SUGGESTIONS: usize = 10;

/// Serializable snapshot of tracker state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    /// Most-recent-first, de-duplicated query strings.
    pub recent: Vec<String>,
    /// Query → frequency counters.
    pub counts: AHashMap<String, u64>,
}

/// Persistence collaborator for history state.
pub trait HistoryStore: Send + Sync {
    fn load(&self) -> Result<HistorySnapshot>;
    fn save(&self, snapshot: &HistorySnapshot) -> Result<()>;
}

/// No-op store: history lives only for the engine's lifetime.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

impl HistoryStore for NullStore {
    fn load(&self) -> Result<HistorySnapshot> {
        Ok(HistorySnapshot::default())
    }

    fn save(&self, _snapshot: &HistorySnapshot) -> Result<()> {
        Ok(())
    }
}

/// JSON-file-backed store. A missing file loads as empty state.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&self) -> Result<HistorySnapshot> {
        if !self.path.exists() {
            return Ok(HistorySnapshot::default());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read history file {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("malformed history file {}", self.path.display()))
    }

    fn save(&self, snapshot: &HistorySnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content =
            serde_json::to_string_pretty(snapshot).context("failed to serialize history")?;
        fs::write(&self.path, content)
            .with_context(|| format!("failed to write history file {}", self.path.display()))
    }
}

/// In-memory history/popularity state with best-effort persistence.
pub struct HistoryTracker {
    recent: VecDeque<String>,
    counts: AHashMap<String, u64>,
    store: Box<dyn HistoryStore>,
}

impl HistoryTracker {
    /// Loads prior state from `store`; a failed load starts empty and only
    /// degrades suggestions.
    pub fn new(store: Box<dyn HistoryStore>) -> Self {
        let snapshot = store.load().unwrap_or_else(|error| {
            tracing::warn!(%error, "failed to load search history, starting empty");
            HistorySnapshot::default()
        });
        Self {
            recent: snapshot.recent.into(),
            counts: snapshot.counts,
            store,
        }
    }

    /// Records a normalized query: moves it to the front of the history,
    /// bumps its frequency counter, and persists best-effort.
    pub fn record(&mut self, query: &str) {
        if let Some(position) = self.recent.iter().position(|q| q == query) {
            self.recent.remove(position);
        }
        self.recent.push_front(query.to_string());
        self.recent.truncate(MAX_HISTORY);

        *self.counts.entry(query.to_string()).or_insert(0) += 1;

        self.persist();
    }

    /// Past queries, most recent first.
    pub fn history(&self) -> Vec<String> {
        self.recent.iter().cloned().collect()
    }

    /// Empties the history list (popularity counters are kept) and persists.
    pub fn clear(&mut self) {
        self.recent.clear();
        self.persist();
    }

    /// Top queries by frequency, descending. Equal counts order
    /// lexicographically so the ranking is deterministic.
    pub fn popular(&self, limit: usize) -> Vec<String> {
        let mut ranked: Vec<(&String, u64)> =
            self.counts.iter().map(|(q, &n)| (q, n)).collect();
        ranked.sort_by(|(qa, na), (qb, nb)| nb.cmp(na).then_with(|| qa.cmp(qb)));
        ranked
            .into_iter()
            .take(limit)
            .map(|(q, _)| q.clone())
            .collect()
    }

    /// Up to `limit` distinct suggestions for a partial query: popular
    /// searches sharing a substring relationship with `partial` (either
    /// direction), followed by catalog-derived terms containing it.
    /// Discovery order is preserved.
    pub fn suggestions<I>(&self, partial: &str, catalog_terms: I, limit: usize) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut out: Vec<String> = Vec::new();

        for candidate in self.popular(self.counts.len()) {
            if candidate.contains(partial) || partial.contains(&candidate) {
                push_distinct(&mut out, candidate);
            }
        }

        for term in catalog_terms {
            push_distinct(&mut out, term);
        }

        out.truncate(limit);
        out
    }

    fn persist(&self) {
        let snapshot = HistorySnapshot {
            recent: self.recent.iter().cloned().collect(),
            counts: self.counts.clone(),
        };
        if let Err(error) = self.store.save(&snapshot) {
            tracing::warn!(%error, "failed to persist search history");
        }
    }
}

fn push_distinct(out: &mut Vec<String>, candidate: String) {
    if !out.contains(&candidate) {
        out.push(candidate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    fn tracker() -> HistoryTracker {
        HistoryTracker::new(Box::new(NullStore))
    }

    #[test]
    fn record_moves_repeats_to_front_without_duplicates() {
        let mut t = tracker();
        t.record("avanza");
        t.record("civic");
        t.record("avanza");

        check!(t.history() == ["avanza", "civic"]);
        check!(t.popular(10) == ["avanza", "civic"]);
    }

    #[test]
    fn history_is_bounded() {
        let mut t = tracker();
        for i in 0..60 {
            t.record(&format!("query{i}"));
        }
        let history = t.history();
        check!(history.len() == MAX_HISTORY);
        check!(history[0] == "query59");
        check!(!history.contains(&"query0".to_string()));
    }

    #[test]
    fn popular_breaks_frequency_ties_lexicographically() {
        let mut t = tracker();
        t.record("zebra");
        t.record("alpha");
        t.record("mid");
        t.record("mid");

        check!(t.popular(10) == ["mid", "alpha", "zebra"]);
        check!(t.popular(1) == ["mid"]);
    }

    #[test]
    fn clear_empties_history_only() {
        let mut t = tracker();
        t.record("avanza");
        t.clear();
        check!(t.history().is_empty());
        // Popularity survives clearing the recency list.
        check!(t.popular(10) == ["avanza"]);
    }

    #[test]
    fn suggestions_merge_popular_and_catalog_terms() {
        let mut t = tracker();
        t.record("toyota avanza");
        t.record("honda civic");

        let catalog = vec!["Toyota".to_string(), "Toyota Avanza".to_string()];
        let suggestions = t.suggestions("toyota", catalog, MAX_SUGGESTIONS);
        check!(
            suggestions
                == [
                    "toyota avanza".to_string(),
                    "Toyota".to_string(),
                    "Toyota Avanza".to_string()
                ]
        );
    }

    #[test]
    fn suggestions_match_in_both_directions() {
        let mut t = tracker();
        t.record("mpv");
        // The popular query is a substring of the partial.
        let suggestions = t.suggestions("mpv murah", std::iter::empty(), MAX_SUGGESTIONS);
        check!(suggestions == ["mpv"]);
    }

    #[test]
    fn suggestions_are_capped_and_distinct() {
        let mut t = tracker();
        for i in 0..15 {
            t.record(&format!("car{i}"));
        }
        let suggestions = t.suggestions("car", std::iter::empty(), MAX_SUGGESTIONS);
        check!(suggestions.len() == MAX_SUGGESTIONS);
    }
}
