//! Ordered index of virtual-node positions.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::warn;

use crate::error::RingError;

/// Sorted map from ring position to the key of the node owning it.
///
/// Entries are only created and destroyed by [`Ring`](crate::Ring) as a side
/// effect of node membership changes, so mutation is crate-private.
#[derive(Debug, Clone, Default)]
pub struct RingIndex {
    entries: BTreeMap<u128, Arc<str>>,
}

impl RingIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, overwriting any previous owner of `hash`.
    ///
    /// Returns the previous owner if the position was already taken.
    pub(crate) fn insert(&mut self, hash: u128, owner: Arc<str>) -> Option<Arc<str>> {
        let previous = self.entries.insert(hash, Arc::clone(&owner));
        if let Some(prev) = &previous {
            if **prev != *owner {
                warn!(
                    hash = %format!("{hash:032x}"),
                    previous = %prev,
                    owner = %owner,
                    "ring position collision, previous owner overwritten"
                );
            }
        }
        previous
    }

    /// Remove the entry at `hash`, returning its owner.
    pub(crate) fn remove(&mut self, hash: u128) -> Result<Arc<str>, RingError> {
        self.entries.remove(&hash).ok_or(RingError::NotFound(hash))
    }

    /// Owner of the first position at or after `hash`, wrapping to the
    /// smallest position when `hash` is past the last one.
    ///
    /// Returns `None` only when the index is empty.
    pub fn successor(&self, hash: u128) -> Option<&str> {
        self.entries
            .range(hash..)
            .next()
            .or_else(|| self.entries.iter().next())
            .map(|(_, owner)| owner.as_ref())
    }

    /// Walk the ring clockwise starting at `hash`, visiting every entry once.
    pub fn walk(&self, hash: u128) -> impl Iterator<Item = (u128, &str)> {
        self.entries
            .range(hash..)
            .chain(self.entries.range(..hash))
            .map(|(h, owner)| (*h, owner.as_ref()))
    }

    /// Owner of exactly `hash`, if present.
    pub fn get(&self, hash: u128) -> Option<&str> {
        self.entries.get(&hash).map(AsRef::as_ref)
    }

    /// All stored positions in ascending order.
    pub fn hashes(&self) -> impl Iterator<Item = u128> + '_ {
        self.entries.keys().copied()
    }

    /// All `(position, owner)` pairs in ascending position order.
    pub fn iter(&self) -> impl Iterator<Item = (u128, &str)> {
        self.entries.iter().map(|(h, owner)| (*h, owner.as_ref()))
    }

    /// Number of stored positions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index has no positions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
