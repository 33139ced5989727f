//! Position tier: (hash, depth) → score

use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, Utc};

use super::{lock_tier, CacheStats, Tier};

/// How a stored score relates to the true value of the position
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Bound {
    /// Score is exact
    Exact,
    /// True value is at least the score (beta cutoff)
    Lower,
    /// True value is at most the score (failed low)
    Upper,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PositionKey {
    pub hash: u64,
    pub depth: u32,
}

impl PositionKey {
    pub fn new(hash: u64, depth: u32) -> Self {
        PositionKey { hash, depth }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PositionEntry {
    /// Side-to-move relative score. Mate scores count plies from this
    /// position, not from the root of the search that stored them.
    pub score: i32,
    pub depth: u32,
    pub bound: Bound,
    /// When the entry was written
    pub stored_at: DateTime<Utc>,
}

pub struct PositionCache {
    inner: Mutex<Tier<PositionKey, PositionEntry>>,
    /// Deepest depth written since the last clear; bounds `probe`
    deepest: AtomicU32,
}

impl PositionCache {
    pub fn new(capacity: usize) -> Self {
        PositionCache {
            inner: Mutex::new(Tier::new(capacity)),
            deepest: AtomicU32::new(0),
        }
    }

    /// Look up an exact `(hash, depth)` pair
    pub fn get(&self, key: &PositionKey) -> Option<PositionEntry> {
        let mut tier = lock_tier(&self.inner, "position");
        Self::lookup(&mut tier, key)
    }

    /// Store an exact score
    pub fn put(&self, key: PositionKey, score: i32, depth: u32) {
        self.put_bounded(key, score, depth, Bound::Exact);
    }

    pub fn put_bounded(&self, key: PositionKey, score: i32, depth: u32, bound: Bound) {
        let entry = PositionEntry {
            score,
            depth,
            bound,
            stored_at: Utc::now(),
        };
        lock_tier(&self.inner, "position").lru.put(key, entry);
        self.deepest.fetch_max(key.depth, Ordering::Relaxed);
    }

    /// First entry for `hash` searched at least `min_depth` deep, trying
    /// depths `min_depth..=max_depth` in order. Depths past the deepest one
    /// ever written are skipped. Counts as a single lookup.
    pub fn probe(&self, hash: u64, min_depth: u32, max_depth: u32) -> Option<PositionEntry> {
        let max_depth = max_depth.min(self.deepest.load(Ordering::Relaxed));
        let mut tier = lock_tier(&self.inner, "position");
        let found = (min_depth..=max_depth)
            .map(|depth| PositionKey::new(hash, depth))
            .find(|key| tier.lru.contains(key));

        match found {
            Some(key) => Self::lookup(&mut tier, &key),
            None => {
                tier.misses += 1;
                None
            }
        }
    }

    fn lookup(
        tier: &mut Tier<PositionKey, PositionEntry>,
        key: &PositionKey,
    ) -> Option<PositionEntry> {
        match tier.lru.get(key).copied() {
            Some(entry) => {
                tier.hits += 1;
                Some(entry)
            }
            None => {
                tier.misses += 1;
                None
            }
        }
    }

    pub fn clear(&self) {
        let mut tier = lock_tier(&self.inner, "position");
        tier.reset();
        self.deepest.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        lock_tier(&self.inner, "position").stats()
    }

    pub fn len(&self) -> usize {
        lock_tier(&self.inner, "position").lru.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        lock_tier(&self.inner, "position").lru.capacity()
    }
}
