//! Bounded undo/redo of mask pairs.
//!
//! The history stores deep copies of both masks after each recorded
//! mutation. The top of the undo stack is always the current state, so
//! undo discards it and restores the entry below (or a blank pair once the
//! stack runs dry).
//!
//! ```rust
//! use pairmask_core::MaskPair;
//! use pairmask_ops::History;
//!
//! let mut history = History::new(30);
//! let mut masks = MaskPair::blank(4, 4);
//! masks.base.activate(1, 1);
//! history.record_if_changed(&masks);
//!
//! let restored = history.undo(4, 4);
//! assert_eq!(restored, MaskPair::blank(4, 4));
//! assert_eq!(history.redo(), Some(masks));
//! ```

use std::collections::VecDeque;

use pairmask_core::MaskPair;
use tracing::trace;

/// Default number of states kept on each stack.
pub const DEFAULT_HISTORY_DEPTH: usize = 30;

/// Undo and redo stacks of mask snapshots.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<MaskPair>,
    redo_stack: VecDeque<MaskPair>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl History {
    /// Creates an empty history keeping at most `capacity` states per stack.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            undo_stack: VecDeque::with_capacity(capacity),
            redo_stack: VecDeque::new(),
            capacity,
        }
    }

    /// Maximum states per stack.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Pushes a copy of `current` unless it equals the newest undo entry.
    ///
    /// Returns `true` if a state was recorded. Recording clears redo and
    /// evicts the oldest entries beyond capacity.
    pub fn record_if_changed(&mut self, current: &MaskPair) -> bool {
        if self.undo_stack.back() == Some(current) {
            trace!("history: state unchanged, not recorded");
            return false;
        }
        self.undo_stack.push_back(current.clone());
        while self.undo_stack.len() > self.capacity {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
        trace!(depth = self.undo_stack.len(), "history: recorded");
        true
    }

    /// Steps back one state and returns the state to restore.
    ///
    /// The newest entry moves to redo. The result is the entry now on top,
    /// or a blank `width x height` pair when none is left.
    pub fn undo(&mut self, width: u32, height: u32) -> MaskPair {
        if let Some(top) = self.undo_stack.pop_back() {
            self.redo_stack.push_back(top);
            while self.redo_stack.len() > self.capacity {
                self.redo_stack.pop_front();
            }
        }
        trace!(
            undo = self.undo_stack.len(),
            redo = self.redo_stack.len(),
            "history: undo"
        );
        match self.undo_stack.back() {
            Some(state) => state.clone(),
            None => MaskPair::blank(width, height),
        }
    }

    /// Re-applies the most recently undone state, if any.
    pub fn redo(&mut self) -> Option<MaskPair> {
        let state = self.redo_stack.pop_back()?;
        self.undo_stack.push_back(state.clone());
        while self.undo_stack.len() > self.capacity {
            self.undo_stack.pop_front();
        }
        trace!(
            undo = self.undo_stack.len(),
            redo = self.redo_stack.len(),
            "history: redo"
        );
        Some(state)
    }

    /// Drops every recorded state.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Number of states on the undo stack.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of states on the redo stack.
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Returns `true` if redo would restore something.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Undo entries from oldest to newest.
    pub fn undo_states(&self) -> impl Iterator<Item = &MaskPair> {
        self.undo_stack.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(marker: u32) -> MaskPair {
        let mut m = MaskPair::blank(8, 8);
        m.base.activate(marker % 8, marker / 8);
        m
    }

    #[test]
    fn test_bound_keeps_newest_in_order() {
        let mut h = History::new(30);
        for i in 0..45 {
            assert!(h.record_if_changed(&state(i)));
        }
        assert_eq!(h.undo_depth(), 30);
        let kept: Vec<_> = h.undo_states().cloned().collect();
        let expected: Vec<_> = (15..45).map(state).collect();
        assert_eq!(kept, expected);
    }

    #[test]
    fn test_duplicate_not_recorded() {
        let mut h = History::default();
        assert!(h.record_if_changed(&state(1)));
        assert!(!h.record_if_changed(&state(1)));
        assert_eq!(h.undo_depth(), 1);
    }

    #[test]
    fn test_round_trip() {
        let mut h = History::default();
        let s0 = state(0);
        let s1 = state(1);
        h.record_if_changed(&s0);
        h.record_if_changed(&s1);

        assert_eq!(h.undo(8, 8), s0);
        assert_eq!(h.redo(), Some(s1.clone()));
        assert_eq!(h.redo(), None);
        assert_eq!(h.undo_states().last(), Some(&s1));
    }

    #[test]
    fn test_undo_past_start_gives_blank() {
        let mut h = History::default();
        assert_eq!(h.undo(3, 2), MaskPair::blank(3, 2));
        h.record_if_changed(&state(5));
        assert_eq!(h.undo(8, 8), MaskPair::blank(8, 8));
        assert_eq!(h.undo(8, 8), MaskPair::blank(8, 8));
        assert_eq!(h.redo_depth(), 1);
    }

    #[test]
    fn test_record_clears_redo() {
        let mut h = History::default();
        h.record_if_changed(&state(0));
        h.record_if_changed(&state(1));
        h.undo(8, 8);
        assert!(h.can_redo());
        h.record_if_changed(&state(2));
        assert!(!h.can_redo());
    }

    #[test]
    fn test_unchanged_record_keeps_redo() {
        let mut h = History::default();
        h.record_if_changed(&state(0));
        h.record_if_changed(&state(1));
        assert_eq!(h.undo(8, 8), state(0));

        assert!(!h.record_if_changed(&state(0)));
        assert_eq!(h.redo_depth(), 1);
        assert_eq!(h.redo(), Some(state(1)));
    }

    #[test]
    fn test_redo_stack_is_bounded() {
        let mut h = History::new(3);
        for i in 0..3 {
            h.record_if_changed(&state(i));
        }
        for _ in 0..5 {
            h.undo(8, 8);
        }
        assert_eq!(h.redo_depth(), 3);
        assert_eq!(h.redo(), Some(state(0)));
    }
}
