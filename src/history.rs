//! Snapshot history of the shape collection.

use log::debug;

use crate::shapes::Element;

/// Maximum number of snapshots to keep.
const MAX_UNDO_HISTORY: usize = 50;

/// Versioned snapshots of the whole shape collection plus a cursor.
///
/// The snapshot at the cursor is what the embedder paints. The list always
/// holds at least the initial (empty) snapshot, and the cursor always points
/// inside it.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Vec<Element>>,
    cursor: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// A history holding one empty snapshot.
    pub fn new() -> Self {
        Self {
            snapshots: vec![Vec::new()],
            cursor: 0,
        }
    }

    /// The snapshot currently shown.
    pub fn current(&self) -> &[Element] {
        &self.snapshots[self.cursor]
    }

    /// Append `shapes` as a fresh snapshot and move the cursor onto it.
    /// Any redo-able snapshots beyond the cursor are discarded.
    pub fn commit(&mut self, shapes: Vec<Element>) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(shapes);
        self.cursor += 1;

        // Cap the history; dropping the oldest snapshot shifts the cursor.
        if self.snapshots.len() > MAX_UNDO_HISTORY {
            self.snapshots.remove(0);
            self.cursor -= 1;
        }

        debug!(
            "history: commit ({} snapshots, cursor {})",
            self.snapshots.len(),
            self.cursor
        );
    }

    /// Overwrite the current snapshot in place; the cursor does not move.
    ///
    /// Used to coalesce the many intermediate states of a drag into a single
    /// undo step. An amend that lands after a redo also discards the stale
    /// future snapshots, so a later redo cannot revive them.
    pub fn amend(&mut self, shapes: Vec<Element>) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots[self.cursor] = shapes;
    }

    /// Step the cursor back one snapshot. No-op at the beginning.
    pub fn undo(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            debug!("history: undo (cursor {})", self.cursor);
            true
        } else {
            false
        }
    }

    /// Step the cursor forward one snapshot. No-op at the end.
    pub fn redo(&mut self) -> bool {
        if self.cursor + 1 < self.snapshots.len() {
            self.cursor += 1;
            debug!("history: redo (cursor {})", self.cursor);
            true
        } else {
            false
        }
    }

    /// Whether [`History::undo`] would do anything.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether [`History::redo`] would do anything.
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Number of snapshots held.
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }
}
