//! Move tier: position hash → best move
//!
//! An entry is only replaced by a result from a search at least as deep, so
//! a shallow re-search can never overwrite a deeper answer.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use super::{lock_tier, CacheStats, Tier};
use crate::core::moves::Move;

#[derive(Clone, Copy, Debug)]
pub struct MoveEntry {
    pub best_move: Move,
    pub depth: u32,
    /// When the entry was written
    pub stored_at: DateTime<Utc>,
}

pub struct MoveCache {
    inner: Mutex<Tier<u64, MoveEntry>>,
}

impl MoveCache {
    pub fn new(capacity: usize) -> Self {
        MoveCache {
            inner: Mutex::new(Tier::new(capacity)),
        }
    }

    /// Best move for `hash` if it was found at least `min_depth` deep.
    /// A shallower entry counts as a miss and keeps its place in the LRU order.
    pub fn get(&self, hash: u64, min_depth: u32) -> Option<Move> {
        let mut tier = lock_tier(&self.inner, "move");
        let deep_enough = tier
            .lru
            .peek(&hash)
            .is_some_and(|entry| entry.depth >= min_depth);

        if !deep_enough {
            tier.misses += 1;
            return None;
        }

        let mv = tier.lru.get(&hash)?.best_move;
        tier.hits += 1;
        Some(mv)
    }

    /// Record `mv` for `hash`. Returns false, leaving the existing entry as it
    /// was, when the stored entry is deeper than `depth`.
    pub fn put(&self, hash: u64, mv: Move, depth: u32) -> bool {
        let mut tier = lock_tier(&self.inner, "move");
        if tier.lru.peek(&hash).is_some_and(|entry| entry.depth > depth) {
            return false;
        }
        tier.lru.put(
            hash,
            MoveEntry {
                best_move: mv,
                depth,
                stored_at: Utc::now(),
            },
        );
        true
    }

    /// Stored entry for `hash` without counting a lookup or touching recency
    pub fn peek(&self, hash: u64) -> Option<MoveEntry> {
        lock_tier(&self.inner, "move").lru.peek(&hash).copied()
    }

    pub fn clear(&self) {
        lock_tier(&self.inner, "move").reset();
    }

    pub fn stats(&self) -> CacheStats {
        lock_tier(&self.inner, "move").stats()
    }

    pub fn len(&self) -> usize {
        lock_tier(&self.inner, "move").lru.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        lock_tier(&self.inner, "move").lru.capacity()
    }
}
