// src/core/arg_cache.rs

use crate::constants::{MAX_SAVED_ARGS, STATE_KEY_SAVED_ARGS};
use crate::models::ArgumentEntry;
use crate::system::store::{StateStore, StateStoreExt, StoreError};
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Remembered arguments per script file, bounded to a handful of entries
/// with least-recently-written eviction.
///
/// Keys are absolute file paths. Reads never refresh recency; only `set` does.
/// The whole map is the unit of persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentCache {
    entries: BTreeMap<String, ArgumentEntry>,
    capacity: usize,
}

impl Default for ArgumentCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ArgumentCache {
    /// Creates an empty cache holding at most [`MAX_SAVED_ARGS`] entries.
    pub fn new() -> Self {
        Self::with_capacity(MAX_SAVED_ARGS)
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            capacity,
        }
    }

    /// Builds a cache from previously persisted entries, trimming any surplus
    /// (e.g. a state file written with a larger capacity).
    pub fn from_entries(entries: BTreeMap<String, ArgumentEntry>) -> Self {
        let mut cache = Self::new();
        cache.entries = entries;
        let dropped = cache.evict_surplus(None);
        if !dropped.is_empty() {
            log::debug!("Trimmed {} stale argument entries on load", dropped.len());
        }
        cache
    }

    /// Loads the cache from the durable store. Missing or unreadable state
    /// yields an empty cache.
    pub fn load(store: &dyn StateStore) -> Self {
        Self::from_entries(store.get_or(STATE_KEY_SAVED_ARGS, BTreeMap::new()))
    }

    /// Writes the full map to the durable store.
    pub fn save(&self, store: &mut dyn StateStore) -> Result<(), StoreError> {
        store.update(STATE_KEY_SAVED_ARGS, &self.entries)
    }

    /// Returns the remembered arguments for `key`. An empty string means the
    /// arguments were explicitly cleared; `None` means nothing is remembered.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|entry| entry.args.as_str())
    }

    /// Remembers `args` for `key` and returns the keys evicted to stay within capacity.
    pub fn set(&mut self, key: &str, args: &str) -> Vec<String> {
        self.set_at(key, args, unix_millis())
    }

    fn set_at(&mut self, key: &str, args: &str, now: u64) -> Vec<String> {
        // Stamps are strictly increasing within a process, so the key just
        // written is always the newest even when the clock does not advance.
        let newest = self.entries.values().map(|e| e.last_used).max();
        let last_used = match newest {
            Some(newest) if newest >= now => newest.saturating_add(1),
            _ => now,
        };

        self.entries.insert(
            key.to_string(),
            ArgumentEntry {
                args: args.to_string(),
                last_used,
            },
        );

        let evicted = self.evict_surplus(Some(key));
        for key in &evicted {
            log::debug!("Evicted remembered arguments for '{}'", key);
        }
        evicted
    }

    /// Removes the oldest entries until the cache fits its capacity.
    /// Equal stamps are ordered by key. `keep` is never evicted.
    fn evict_surplus(&mut self, keep: Option<&str>) -> Vec<String> {
        let surplus = self.entries.len().saturating_sub(self.capacity);
        if surplus == 0 {
            return Vec::new();
        }

        let mut candidates: Vec<(u64, &String)> = self
            .entries
            .iter()
            .filter(|(key, _)| Some(key.as_str()) != keep)
            .map(|(key, entry)| (entry.last_used, key))
            .collect();
        candidates.sort();

        let evicted: Vec<String> = candidates
            .into_iter()
            .take(surplus)
            .map(|(_, key)| key.clone())
            .collect();
        for key in &evicted {
            self.entries.remove(key);
        }
        evicted
    }

    /// Number of remembered entries, cleared ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is remembered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `key` has an entry, even an empty one.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// All entries, most recently written first.
    pub fn recent(&self) -> Vec<(&str, &ArgumentEntry)> {
        let mut items: Vec<(&str, &ArgumentEntry)> = self
            .entries
            .iter()
            .map(|(key, entry)| (key.as_str(), entry))
            .collect();
        items.sort_by(|a, b| b.1.last_used.cmp(&a.1.last_used).then(a.0.cmp(b.0)));
        items
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
