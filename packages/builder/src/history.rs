//! # Undo/Redo History
//!
//! Snapshot history over a page's block collection.
//!
//! ## Design
//!
//! - Every undoable edit records the collection as it was *before* the edit
//! - Undo swaps the current collection with the newest past snapshot and
//!   moves the current one to the front of the future stack
//! - Redo is the mirror image
//! - A new edit clears the future stack (linear timeline, no branches)
//! - The past stack keeps at most `max_levels` snapshots, oldest dropped
//!   first; the cap also applies to pushes made by redo
//!
//! Snapshots are full copies, not diffs. Pages hold tens of blocks and the
//! cap bounds memory.
//!
//! ## Example
//!
//! ```rust
//! use linq_builder::{Block, BlockCollection, BlockKind, History};
//!
//! let mut history = History::new();
//! let mut blocks = BlockCollection::new();
//!
//! let next = BlockCollection::from_blocks(vec![Block::new(BlockKind::Link)])?;
//! history.push_snapshot(&blocks);
//! blocks = next;
//!
//! assert!(history.undo(&mut blocks));
//! assert!(blocks.is_empty());
//!
//! assert!(history.redo(&mut blocks));
//! assert_eq!(blocks.len(), 1);
//! # Ok::<(), linq_builder::BuilderError>(())
//! ```

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::collection::BlockCollection;

/// Default number of undo levels
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Two-stack snapshot log for one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct History {
    /// Pre-edit snapshots (most recent last)
    past: VecDeque<BlockCollection>,

    /// Undone states (next redo first)
    future: VecDeque<BlockCollection>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl History {
    /// Create an empty history with the default limit (50)
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_HISTORY_LIMIT)
    }

    /// Create an empty history with a custom limit
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: VecDeque::new(),
            max_levels,
        }
    }

    /// Record `current` as the state to return to, and forget the redo branch.
    ///
    /// Call this before applying an edit.
    pub fn push_snapshot(&mut self, current: &BlockCollection) {
        self.push_past(current.clone());
        self.future.clear();
    }

    fn push_past(&mut self, snapshot: BlockCollection) {
        self.past.push_back(snapshot);

        // Trim if exceeded max levels
        if self.max_levels > 0 {
            while self.past.len() > self.max_levels {
                self.past.pop_front();
            }
        }
    }

    /// Restore the newest past snapshot into `current`.
    ///
    /// Returns `false` (and leaves everything untouched) if there is nothing
    /// to undo.
    pub fn undo(&mut self, current: &mut BlockCollection) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };

        let undone = std::mem::replace(current, previous);
        self.future.push_front(undone);
        true
    }

    /// Restore the next future state into `current`.
    ///
    /// Returns `false` if there is nothing to redo.
    pub fn redo(&mut self, current: &mut BlockCollection) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };

        let redone = std::mem::replace(current, next);
        self.push_past(redone);
        true
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.past.len()
    }

    /// Get the number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.future.len()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Past snapshots, oldest first
    pub fn past(&self) -> impl Iterator<Item = &BlockCollection> {
        self.past.iter()
    }

    /// Future states, next redo first
    pub fn future(&self) -> impl Iterator<Item = &BlockCollection> {
        self.future.iter()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
