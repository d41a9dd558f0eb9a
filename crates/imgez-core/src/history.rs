//! Bounded stack of image snapshots for undo and reset.
//!
//! Slot 0 holds the base image (what reset-to-original restores). The back
//! of the stack is the most recent pre-edit snapshot (what undo restores).
//!
//! When a push would exceed the capacity, the oldest snapshot *after* the
//! base is evicted. The base therefore survives any number of edits.
//!
//! Undo pops: each undo permanently discards the snapshot it restores, and
//! that includes the base once everything above it is gone.

use crate::decode::PixelBuffer;

/// Smallest capacity that keeps a base plus one undo step.
pub const MIN_HISTORY_CAPACITY: usize = 2;

#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<PixelBuffer>,
    capacity: usize,
}

impl History {
    /// Create an empty history. Capacities below
    /// [`MIN_HISTORY_CAPACITY`] are raised to it.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(MIN_HISTORY_CAPACITY);
        Self {
            snapshots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Drop everything and start over with `base` as the only entry.
    pub fn reset(&mut self, base: PixelBuffer) {
        self.snapshots.clear();
        self.snapshots.push(base);
    }

    /// Record a snapshot taken just before an edit.
    pub fn push(&mut self, snapshot: PixelBuffer) {
        self.snapshots.push(snapshot);
        if self.snapshots.len() > self.capacity {
            self.snapshots.remove(1);
            log::debug!(
                "History full ({} entries), evicted oldest edit",
                self.capacity
            );
        }
    }

    /// Remove and return the most recent snapshot.
    pub fn pop(&mut self) -> Option<PixelBuffer> {
        self.snapshots.pop()
    }

    /// Keep only the base snapshot and return a copy of it.
    pub fn collapse_to_base(&mut self) -> Option<PixelBuffer> {
        self.snapshots.truncate(1);
        self.snapshots.first().cloned()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshots from base to most recent.
    pub fn iter(&self) -> impl Iterator<Item = &PixelBuffer> {
        self.snapshots.iter()
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::tests::tagged;
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the stack never exceeds its capacity and the base survives.
        #[test]
        fn prop_capacity_and_base(
            capacity in 0usize..12,
            pushes in 0usize..40,
        ) {
            let mut history = History::new(capacity);
            history.reset(tagged(200));
            for i in 0..pushes {
                history.push(tagged((i % 100) as u8));
                prop_assert!(history.len() <= history.capacity());
                prop_assert_eq!(history.iter().next().map(|b| b.pixels[0]), Some(200));
            }
            prop_assert_eq!(history.len(), (pushes + 1).min(history.capacity()));
        }
    }
}
