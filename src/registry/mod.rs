//! Concurrent filter registry
//!
//! The single source of truth for "is filter X enabled for session Y".
//! Backed by a `DashMap`, so insert/update/remove on one key are linearizable
//! against each other without a registry-wide lock, and iteration is safe
//! (best-effort) while other threads mutate.
//!
//! The registry is an explicitly constructed value, meant to be owned by the
//! application's composition root and shared by reference; there is no
//! process-global instance.

use crate::core::key::{ContextId, FilterKey};
use crate::core::state::FilterState;
use dashmap::DashMap;
use std::sync::Arc;

/// Process-wide mapping from (filter name, context identity) to filter state
#[derive(Debug, Default)]
pub struct FilterRegistry {
    entries: DashMap<FilterKey, Arc<FilterState>>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Atomic get-or-insert.
    ///
    /// If the key is absent, inserts the state produced by `factory` and
    /// returns it; if present, returns the existing state unchanged. Under
    /// contention the entry lock serializes callers on the same key, so no
    /// two threads ever observe different live states for one key.
    pub fn get_or_create<F>(&self, key: FilterKey, factory: F) -> Arc<FilterState>
    where
        F: FnOnce() -> FilterState,
    {
        self.entries
            .entry(key)
            .or_insert_with(|| Arc::new(factory()))
            .clone()
    }

    /// Looks up the state for a key without creating it.
    pub fn get(&self, key: &FilterKey) -> Option<Arc<FilterState>> {
        self.entries.get(key).map(|entry| entry.clone())
    }

    /// Atomically removes and returns the prior state, if any.
    pub fn remove(&self, key: &FilterKey) -> Option<Arc<FilterState>> {
        self.entries.remove(key).map(|(_, state)| state)
    }

    /// Best-effort snapshot of all registered entries.
    ///
    /// Entries inserted or removed concurrently with the iteration may or
    /// may not appear, as with any snapshot taken under mutation.
    pub fn list_all(&self) -> Vec<(FilterKey, Arc<FilterState>)> {
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Snapshot of the entries owned by one context.
    pub fn entries_for(&self, context: ContextId) -> Vec<(FilterKey, Arc<FilterState>)> {
        self.entries
            .iter()
            .filter(|entry| entry.key().context() == context)
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    pub fn contains(&self, key: &FilterKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
