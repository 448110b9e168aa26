//! Undo/redo history for cell-table mutations.
//!
//! Frames are full snapshots of the sparse table rather than deltas. That is
//! deliberate: tables are sparse, so a snapshot is O(occupied cells), and the
//! restore path cannot drift out of sync with the mutation that produced it.
//! Dimensions, rules, and comments are not versioned here.

use rustc_hash::FxHashMap;

use crate::cell::Cell;

type TableSnapshot = FxHashMap<(usize, usize), Cell>;

/// Bound on retained frames; the oldest frame falls off first.
const MAX_FRAMES: usize = 100;

#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<TableSnapshot>,
    redo_stack: Vec<TableSnapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pre-mutation table. Any new mutation makes the redo
    /// branch unreachable, so the redo stack clears.
    pub fn record(&mut self, before: TableSnapshot) {
        self.undo_stack.push(before);
        self.redo_stack.clear();
        if self.undo_stack.len() > MAX_FRAMES {
            self.undo_stack.remove(0);
        }
    }

    /// Pop the last frame, exchanging it with the current table.
    /// Returns the table to install, or `None` when there is nothing to undo.
    pub fn undo(&mut self, current: TableSnapshot) -> Option<TableSnapshot> {
        let frame = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(frame)
    }

    /// Mirror of `undo`. No-op (returns `None`) on an empty redo stack.
    pub fn redo(&mut self, current: TableSnapshot) -> Option<TableSnapshot> {
        let frame = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(frame)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
