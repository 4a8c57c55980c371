//! Undo log for structural track mutations.

use crate::model::{Pose, Segment};

/// One appended segment, with what undo needs to reverse it exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoEntry {
    /// The segment that was appended
    pub segment: Segment,
    /// Exit pose computed when the segment was appended
    pub exit: Pose,
    /// Accumulated track length before the append
    pub length_before: f64,
}

/// Ordered record of appended segments, newest last.
///
/// Always holds exactly one entry per committed segment.
#[derive(Debug, Clone, Default)]
pub struct UndoLog {
    entries: Vec<UndoEntry>,
}

impl UndoLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Records an appended segment.
    pub fn record(&mut self, entry: UndoEntry) {
        self.entries.push(entry);
    }

    /// Removes and returns the most recent entry.
    pub fn pop(&mut self) -> Option<UndoEntry> {
        self.entries.pop()
    }

    /// Most recent entry, if any.
    pub fn last(&self) -> Option<&UndoEntry> {
        self.entries.last()
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Read-only view of all entries, oldest first.
    pub fn entries(&self) -> &[UndoEntry] {
        &self.entries
    }
}
