//! Linear undo/redo history of edit snapshots.
//!
//! The history is an ordered list of immutable snapshots plus a cursor.
//! Committing a new snapshot discards everything after the cursor (the redo
//! branch) before appending, so the history is always a straight line.
//!
//! ## Invariants
//!
//! - `index < len` whenever the history is non-empty
//! - Snapshots own their pixels; they never alias the caller's working image

use tracing::debug;

use crate::decode::Bitmap;
use crate::filter::FilterKind;
use crate::transform::normalize_degrees;

/// An immutable record of editing state.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSnapshot {
    bitmap: Bitmap,
    filter: FilterKind,
    rotation: f64,
}

impl EditSnapshot {
    /// Create a snapshot; the rotation is normalized to [0, 360).
    pub fn new(bitmap: Bitmap, filter: FilterKind, rotation: f64) -> Self {
        Self {
            bitmap,
            filter,
            rotation: normalize_degrees(rotation),
        }
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn filter(&self) -> FilterKind {
        self.filter
    }

    /// Cumulative rotation in degrees.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }
}

/// Undo/redo stack of [`EditSnapshot`]s.
#[derive(Debug, Clone, Default)]
pub struct EditHistory {
    snapshots: Vec<EditSnapshot>,
    index: usize,
    limit: Option<usize>,
}

impl EditHistory {
    /// Create an empty, unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history that keeps at most `limit` snapshots.
    ///
    /// `None` means unbounded. A limit of zero is treated as one.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit: limit.map(|l| l.max(1)),
            ..Self::default()
        }
    }

    /// Clear the history and record `initial` as the sole snapshot
    /// (no filter, no rotation).
    pub fn reset(&mut self, initial: &Bitmap) {
        self.snapshots.clear();
        self.snapshots
            .push(EditSnapshot::new(initial.clone(), FilterKind::None, 0.0));
        self.index = 0;
        debug!(width = initial.width, height = initial.height, "history reset");
    }

    /// Record a new state after the current one.
    ///
    /// Any snapshots after the cursor are discarded first. The image is
    /// copied, so the caller keeps ownership of its working buffer.
    pub fn commit(&mut self, image: &Bitmap, filter: FilterKind, rotation: f64) {
        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.index + 1);
        }
        self.snapshots
            .push(EditSnapshot::new(image.clone(), filter, rotation));

        if let Some(limit) = self.limit {
            if self.snapshots.len() > limit {
                let excess = self.snapshots.len() - limit;
                self.snapshots.drain(..excess);
            }
        }
        self.index = self.snapshots.len() - 1;

        debug!(
            index = self.index,
            len = self.snapshots.len(),
            %filter,
            rotation,
            "history commit"
        );
    }

    /// Step back one snapshot.
    ///
    /// Returns the new current snapshot, or `None` (and does nothing) when
    /// already at the oldest snapshot or when empty.
    pub fn undo(&mut self) -> Option<&EditSnapshot> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        debug!(index = self.index, "history undo");
        self.snapshots.get(self.index)
    }

    /// Step forward one snapshot.
    ///
    /// Returns the new current snapshot, or `None` (and does nothing) when
    /// already at the newest snapshot or when empty.
    pub fn redo(&mut self) -> Option<&EditSnapshot> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        debug!(index = self.index, "history redo");
        self.snapshots.get(self.index)
    }

    /// Drop every snapshot, returning to the empty state.
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.index = 0;
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> Option<&EditSnapshot> {
        self.snapshots.get(self.index)
    }

    /// Cursor position, or `None` when empty.
    pub fn index(&self) -> Option<usize> {
        (!self.snapshots.is_empty()).then_some(self.index)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty() && self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.snapshots.is_empty() && self.index + 1 < self.snapshots.len()
    }

    /// Maximum number of snapshots kept, if bounded.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Commit,
        Undo,
        Redo,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![Just(Op::Commit), Just(Op::Undo), Just(Op::Redo)]
    }

    proptest! {
        /// Property: The cursor stays in range under any operation sequence.
        #[test]
        fn prop_index_in_range(ops in prop::collection::vec(op_strategy(), 0..60)) {
            let mut history = EditHistory::new();
            history.reset(&Bitmap::filled(1, 1, [0, 0, 0, 255]));

            for (i, op) in ops.into_iter().enumerate() {
                match op {
                    Op::Commit => {
                        let expected = history.index().unwrap() + 2;
                        history.commit(&Bitmap::filled(1, 1, [i as u8, 0, 0, 255]), FilterKind::None, 0.0);
                        prop_assert_eq!(history.len(), expected);
                    }
                    Op::Undo => { history.undo(); }
                    Op::Redo => { history.redo(); }
                }
                let index = history.index().unwrap();
                prop_assert!(index < history.len());
            }
        }

        /// Property: N commits after reset give length N + 1 and index N.
        #[test]
        fn prop_commit_counts(n in 0usize..40) {
            let mut history = EditHistory::new();
            history.reset(&Bitmap::filled(1, 1, [0, 0, 0, 255]));
            for _ in 0..n {
                history.commit(&Bitmap::filled(1, 1, [1, 1, 1, 255]), FilterKind::Fade, 0.0);
            }
            prop_assert_eq!(history.len(), n + 1);
            prop_assert_eq!(history.index(), Some(n));
        }
    }
}
