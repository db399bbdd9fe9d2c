//! Bounded undo/redo history of document snapshots.

use crate::shapes::Shape;

/// Maximum number of snapshots to keep.
pub const MAX_HISTORY: usize = 50;

/// Snapshot history with a cursor.
///
/// The snapshot at the cursor equals the live document after every
/// committed mutation. Undo and redo only move the cursor and hand back a
/// copy of the snapshot there; stored snapshots are never mutated.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Vec<Shape>>,
    cursor: usize,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(MAX_HISTORY)
    }
}

impl History {
    /// Create a history holding a single empty-document snapshot.
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: vec![Vec::new()],
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Record `document` as the newest state, discarding any redo tail.
    pub fn commit(&mut self, document: &[Shape]) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(document.to_vec());
        if self.snapshots.len() > self.capacity {
            let excess = self.snapshots.len() - self.capacity;
            self.snapshots.drain(..excess);
        }
        self.cursor = self.snapshots.len() - 1;
        log::debug!("History commit: {} of {}", self.cursor + 1, self.snapshots.len());
    }

    /// Step back; returns the document to restore.
    pub fn undo(&mut self) -> Option<Vec<Shape>> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        log::debug!("Undo to {}", self.cursor);
        Some(self.snapshots[self.cursor].clone())
    }

    /// Step forward; returns the document to restore.
    pub fn redo(&mut self) -> Option<Vec<Shape>> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        log::debug!("Redo to {}", self.cursor);
        Some(self.snapshots[self.cursor].clone())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot at the cursor.
    pub fn current(&self) -> &[Shape] {
        &self.snapshots[self.cursor]
    }

    pub fn snapshots(&self) -> &[Vec<Shape>] {
        &self.snapshots
    }
}
