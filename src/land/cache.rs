//! Per-tile land/water memoization

use crate::coord::tile::TileKey;
use crate::land::Verdict;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Verdict cache keyed by classification tile
///
/// Created once per session and never cleared. Entries are write-once: the
/// first verdict stored for a tile wins, so a tile classified by one request
/// keeps that verdict for every later request sharing the cache.
#[derive(Debug, Default)]
pub struct LandCache {
    entries: RwLock<HashMap<TileKey, Verdict>>,
}

impl LandCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a tile's verdict
    pub fn get(&self, key: &TileKey) -> Option<Verdict> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .copied()
    }

    /// Store a verdict unless the tile already has one
    ///
    /// Returns the verdict now held for the tile.
    pub fn insert(&self, key: TileKey, verdict: Verdict) -> Verdict {
        *self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert(verdict)
    }

    /// Number of classified tiles
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no tile has been classified yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
