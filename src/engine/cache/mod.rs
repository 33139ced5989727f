//! Search memoization
//!
//! Two independent LRU tiers sit behind one [`Cache`]:
//!
//! - [`PositionCache`] maps `(position hash, depth)` to a score and the bound
//!   that score carries.
//! - [`MoveCache`] maps a position hash to the best move found for it, keyed
//!   only by position and guarded by a monotonic-depth rule.
//!
//! Each tier has its own mutex, so lookups, recency promotion, eviction and
//! the hit/miss counters all happen under a single lock. Engines share the
//! cache through an `Arc<Cache>`; there is no process-wide instance.
//!
//! A poisoned tier lock never takes the engine down: the tier is emptied, the
//! poison flag cleared and the current call proceeds against the empty tier,
//! which means the search simply recomputes.

pub mod lru;
pub mod moves;
pub mod position;

use std::sync::{Mutex, MutexGuard};

pub use lru::LruCache;
pub use moves::{MoveCache, MoveEntry};
pub use position::{Bound, PositionCache, PositionEntry, PositionKey};

pub const DEFAULT_POSITION_CAPACITY: usize = 100_000;
pub const DEFAULT_MOVE_CAPACITY: usize = 50_000;

/// Counter snapshot for one tier
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Hits as a fraction of lookups, 0.0 before the first lookup
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            n => self.hits as f64 / n as f64,
        }
    }
}

/// Snapshot of both tiers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheReport {
    pub positions: CacheStats,
    pub moves: CacheStats,
}

/// Table and counters guarded together by a tier's mutex
pub(crate) struct Tier<K, V> {
    pub(crate) lru: LruCache<K, V>,
    pub(crate) hits: u64,
    pub(crate) misses: u64,
}

impl<K: std::hash::Hash + Eq + Copy, V> Tier<K, V> {
    pub(crate) fn new(capacity: usize) -> Self {
        Tier {
            lru: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    pub(crate) fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.lru.len(),
            capacity: self.lru.capacity(),
            hits: self.hits,
            misses: self.misses,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.lru.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

/// Lock a tier, recovering from poison by dropping its contents
pub(crate) fn lock_tier<'a, K, V>(
    tier: &'a Mutex<Tier<K, V>>,
    name: &str,
) -> MutexGuard<'a, Tier<K, V>>
where
    K: std::hash::Hash + Eq + Copy,
{
    tier.lock().unwrap_or_else(|poisoned| {
        log::warn!("{name} cache lock poisoned, discarding its entries");
        let mut guard = poisoned.into_inner();
        guard.reset();
        tier.clear_poison();
        guard
    })
}

/// Both memoization tiers, shared by every engine holding the same `Arc`
pub struct Cache {
    positions: PositionCache,
    moves: MoveCache,
}

impl Cache {
    pub fn new(position_capacity: usize, move_capacity: usize) -> Self {
        Cache {
            positions: PositionCache::new(position_capacity),
            moves: MoveCache::new(move_capacity),
        }
    }

    #[inline]
    pub fn positions(&self) -> &PositionCache {
        &self.positions
    }

    #[inline]
    pub fn moves(&self) -> &MoveCache {
        &self.moves
    }

    /// Empty both tiers and reset their counters
    pub fn clear(&self) {
        self.positions.clear();
        self.moves.clear();
        log::debug!("search cache cleared");
    }

    pub fn stats(&self) -> CacheReport {
        CacheReport {
            positions: self.positions.stats(),
            moves: self.moves.stats(),
        }
    }
}

impl Default for Cache {
    fn default() -> Self {
        Cache::new(DEFAULT_POSITION_CAPACITY, DEFAULT_MOVE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_hit_rate() {
        let stats = CacheStats {
            size: 1,
            capacity: 4,
            hits: 3,
            misses: 1,
        };
        assert_eq!(stats.lookups(), 4);
        assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }

    #[test]
    fn test_poisoned_tier_degrades_to_miss() {
        let tier = Arc::new(Mutex::new(Tier::<u64, i32>::new(4)));
        lock_tier(&*tier, "test").lru.put(1, 10);

        let poisoner = Arc::clone(&tier);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock();
            panic!("poison the tier");
        })
        .join();
        assert!(tier.is_poisoned());

        let mut guard = lock_tier(&*tier, "test");
        assert!(guard.lru.get(&1).is_none());
        drop(guard);
        assert!(!tier.is_poisoned());
    }
}
