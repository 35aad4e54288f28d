//! Popularity Cache Module
//!
//! Main cache engine combining HashMap storage with a popularity ranking.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::debug;

use crate::cache::stats::StatCounters;
use crate::cache::{CacheEntry, CacheStats, RankingIndex};

/// Keyed store and ranking, always mutated together under one lock.
#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    ranking: RankingIndex,
}

impl CacheInner {
    fn remove(&mut self, short_code: &str) -> bool {
        self.ranking.remove(short_code);
        self.entries.remove(short_code).is_some()
    }
}

// == Popularity Cache ==
/// Bounded short-code cache that evicts the least accessed entries.
///
/// Every cached entry has a ranking score equal to its `access_count`. The
/// ranking decides eviction order; the entry map holds the content. Both sit
/// behind a single lock, and no method holds it after returning, so callers
/// may freely await durable I/O between cache calls.
#[derive(Debug)]
pub struct PopularityCache {
    inner: RwLock<CacheInner>,
    counters: StatCounters,
    max_size: usize,
}

impl PopularityCache {
    // == Constructor ==
    /// Creates a new cache holding at most `max_size` entries.
    pub fn new(max_size: usize) -> Self {
        Self {
            inner: RwLock::new(CacheInner::default()),
            counters: StatCounters::default(),
            max_size,
        }
    }

    // == Put ==
    /// Inserts or overwrites a non-expiring entry with the given score, then
    /// runs a guard pass.
    ///
    /// Returns the codes evicted by that guard pass, which may include
    /// `short_code` itself when it is the least popular entry.
    pub fn put(&self, short_code: &str, destination_url: &str, initial_count: u64) -> Vec<String> {
        self.put_entry(CacheEntry::new(short_code, destination_url, initial_count))
    }

    /// Like [`put`](Self::put), carrying a copy of the durable expiry.
    pub fn put_expiring(
        &self,
        short_code: &str,
        destination_url: &str,
        initial_count: u64,
        expires_at: Option<DateTime<Utc>>,
    ) -> Vec<String> {
        self.put_entry(
            CacheEntry::new(short_code, destination_url, initial_count).with_expiry(expires_at),
        )
    }

    fn put_entry(&self, entry: CacheEntry) -> Vec<String> {
        {
            let mut inner = self.inner.write();
            inner.ranking.set_score(&entry.short_code, entry.access_count);
            debug!(code = %entry.short_code, count = entry.access_count, "cached link");
            inner.entries.insert(entry.short_code.clone(), entry);
        }

        // The guard takes its own size snapshot, after the insert is visible.
        self.enforce_capacity()
    }

    // == Get ==
    /// Returns the destination URL for a cached short code.
    ///
    /// Does not touch access counters; see [`record_access`](Self::record_access).
    pub fn get(&self, short_code: &str) -> Option<String> {
        self.lookup(short_code).map(|entry| entry.destination_url)
    }

    /// Returns a copy of the full cached entry.
    pub fn lookup(&self, short_code: &str) -> Option<CacheEntry> {
        let found = self.inner.read().entries.get(short_code).cloned();
        match found {
            Some(_) => self.counters.record_hit(),
            None => self.counters.record_miss(),
        }
        found
    }

    /// Returns the cached access count without counting as a lookup.
    pub fn access_count(&self, short_code: &str) -> Option<u64> {
        self.inner
            .read()
            .entries
            .get(short_code)
            .map(|entry| entry.access_count)
    }

    pub fn contains(&self, short_code: &str) -> bool {
        self.inner.read().entries.contains_key(short_code)
    }

    // == Record Access ==
    /// Increments the cached counter and its ranking score as one step.
    ///
    /// Returns the new count, or None when the code is not cached; the caller
    /// then falls back to durable-store accounting.
    pub fn record_access(&self, short_code: &str) -> Option<u64> {
        let mut inner = self.inner.write();
        let entry = inner.entries.get_mut(short_code)?;
        entry.access_count += 1;
        let count = entry.access_count;
        inner.ranking.set_score(short_code, count);
        Some(count)
    }

    // == Remove ==
    /// Removes an entry from both the map and the ranking.
    ///
    /// Returns true if something was removed; absent codes are a no-op.
    pub fn remove(&self, short_code: &str) -> bool {
        let removed = self.inner.write().remove(short_code);
        if removed {
            debug!(code = %short_code, "removed link from cache");
        }
        removed
    }

    // == Enforce Capacity ==
    /// Runs one guard pass: evicts the lowest-scored entries until the cache
    /// is back within `max_size`.
    ///
    /// Size is read and eviction performed under the same write lock. Returns
    /// the evicted codes, lowest score first.
    pub fn enforce_capacity(&self) -> Vec<String> {
        let evicted = {
            let mut inner = self.inner.write();
            let size = inner.ranking.len();
            if size <= self.max_size {
                return Vec::new();
            }

            let victims = inner.ranking.lowest(size - self.max_size);
            for code in &victims {
                inner.remove(code);
            }
            victims
        };

        self.counters.record_evictions(evicted.len());
        debug!(count = evicted.len(), evicted = ?evicted, "evicted least popular links");
        evicted
    }

    // == Size ==
    /// Returns the current number of cached entries.
    pub fn size(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot(self.size(), self.max_size)
    }

    /// Returns the same cache with a different capacity and no guard pass.
    #[cfg(test)]
    pub(crate) fn with_max_size(self, max_size: usize) -> Self {
        Self { max_size, ..self }
    }

    /// Checks that the map and the ranking describe the same set of entries
    /// with the same scores.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        let inner = self.inner.read();
        inner.entries.len() == inner.ranking.len()
            && inner
                .entries
                .iter()
                .all(|(code, entry)| inner.ranking.score(code) == Some(entry.access_count))
    }
}
