//! Transposition cache for subtree scores
//!
//! Entries are keyed by the serialized position, the remaining search depth
//! and whether the node is a maximizing one. Capacity is bounded; when full,
//! the oldest inserted entry is discarded first.
//!
//! # Example
//!
//! ```
//! use cubic::board::BoardState;
//! use cubic::search::{CacheKey, TranspositionCache};
//!
//! let mut tt = TranspositionCache::new(1024);
//! let key = CacheKey::new(BoardState::new().serialize_key(), 3, true);
//!
//! tt.store(key, 150);
//! assert_eq!(tt.probe(&key), Some(150));
//! ```

use std::collections::{HashMap, VecDeque};

use log::trace;

use crate::board::StateKey;

/// Cache key: position plus the search context it was scored in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub state: StateKey,
    pub depth: u8,
    pub maximizing: bool,
}

impl CacheKey {
    #[inline]
    pub fn new(state: StateKey, depth: u8, maximizing: bool) -> Self {
        Self {
            state,
            depth,
            maximizing,
        }
    }
}

/// Bounded score cache with first-in-first-out eviction.
pub struct TranspositionCache {
    entries: HashMap<CacheKey, i32>,
    /// Insertion order, oldest first
    order: VecDeque<CacheKey>,
    capacity: usize,
    evictions: u64,
}

impl TranspositionCache {
    /// Create a cache holding at most `capacity` entries (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity.min(1 << 16)),
            order: VecDeque::with_capacity(capacity.min(1 << 16)),
            capacity,
            evictions: 0,
        }
    }

    #[must_use]
    pub fn probe(&self, key: &CacheKey) -> Option<i32> {
        self.entries.get(key).copied()
    }

    /// Store a score.
    ///
    /// Overwriting an existing key keeps its original insertion slot, so
    /// re-scoring a position does not protect it from eviction.
    pub fn store(&mut self, key: CacheKey, score: i32) {
        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = score;
            return;
        }

        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                self.evictions += 1;
                trace!("tt evicted depth-{} entry", oldest.depth);
            }
        }

        self.entries.insert(key, score);
        self.order.push_back(key);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all entries. Call when starting a new game.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Get statistics about cache usage.
    #[must_use]
    pub fn stats(&self) -> TTStats {
        TTStats {
            capacity: self.capacity,
            used: self.entries.len(),
            evictions: self.evictions,
        }
    }
}

/// Statistics about transposition cache usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTStats {
    /// Maximum number of entries
    pub capacity: usize,
    /// Number of entries currently stored
    pub used: usize,
    /// Entries discarded to make room since creation
    pub evictions: u64,
}
