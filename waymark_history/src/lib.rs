// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark History: bounded undo/redo stacks of immutable snapshots.
//!
//! [`History`] keeps two stacks of full snapshots (for vertex editing these are
//! deep copies of a shape's coordinates). Both stacks share one depth limit.
//! A push onto a full stack is **refused**: nothing is evicted, the new
//! snapshot is simply dropped. Callers that want to know can check the
//! returned `bool`.
//!
//! The usual flow:
//!
//! - Before a destructive edit, call [`History::record`] with the pre-edit
//!   snapshot. This pushes onto the undo stack and clears the redo stack.
//! - [`History::undo`] takes the *current* state, parks it on the redo stack
//!   and hands back the state to restore.
//! - [`History::redo`] is the mirror image.
//!
//! ```rust
//! use waymark_history::History;
//!
//! let mut history: History<Vec<u32>> = History::new();
//! let mut state = vec![1];
//!
//! history.record(state.clone());
//! state.push(2);
//!
//! state = history.undo(state).expect("one edit recorded");
//! assert_eq!(state, vec![1]);
//!
//! state = history.redo(state).expect("undo parked the edited state");
//! assert_eq!(state, vec![1, 2]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// Default maximum depth of each stack.
pub const DEFAULT_STACK_LIMIT: usize = 100;

/// Paired undo/redo stacks with a shared depth limit.
#[derive(Clone, Debug)]
pub struct History<T> {
    undo: Vec<T>,
    redo: Vec<T>,
    limit: usize,
}

impl<T> History<T> {
    /// Create empty stacks bounded by [`DEFAULT_STACK_LIMIT`].
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_STACK_LIMIT)
    }

    /// Create empty stacks bounded by `limit` entries each.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            limit,
        }
    }

    /// Maximum number of entries per stack.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Push onto the undo stack. Returns `false` if the stack is full.
    pub fn push_undo(&mut self, snapshot: T) -> bool {
        push_bounded(&mut self.undo, snapshot, self.limit)
    }

    /// Push onto the redo stack. Returns `false` if the stack is full.
    pub fn push_redo(&mut self, snapshot: T) -> bool {
        push_bounded(&mut self.redo, snapshot, self.limit)
    }

    /// Pop the most recent undo snapshot.
    pub fn pop_undo(&mut self) -> Option<T> {
        self.undo.pop()
    }

    /// Pop the most recent redo snapshot.
    pub fn pop_redo(&mut self) -> Option<T> {
        self.redo.pop()
    }

    /// Drop every redo snapshot.
    pub fn clear_redo(&mut self) {
        self.redo.clear();
    }

    /// Drop every snapshot on both stacks.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    /// Record the state from before a new user edit.
    ///
    /// Pushes `snapshot` onto the undo stack and invalidates the redo stack.
    /// The redo stack is cleared even when the undo push is refused.
    pub fn record(&mut self, snapshot: T) -> bool {
        self.redo.clear();
        self.push_undo(snapshot)
    }

    /// Step back one edit.
    ///
    /// `current` is parked on the redo stack and the most recent undo snapshot
    /// is returned. With nothing to undo, `None` is returned and `current` is
    /// dropped without touching the redo stack.
    pub fn undo(&mut self, current: T) -> Option<T> {
        if self.undo.is_empty() {
            return None;
        }
        if !self.push_redo(current) {
            log::debug!("redo stack full ({} entries), dropping snapshot", self.limit);
        }
        self.undo.pop()
    }

    /// Step forward one undone edit; the mirror image of [`History::undo`].
    pub fn redo(&mut self, current: T) -> Option<T> {
        if self.redo.is_empty() {
            return None;
        }
        if !self.push_undo(current) {
            log::debug!("undo stack full ({} entries), dropping snapshot", self.limit);
        }
        self.redo.pop()
    }

    /// Whether there is anything to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether there is anything to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of undo snapshots.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Number of redo snapshots.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// The snapshot [`History::undo`] would restore next.
    pub fn peek_undo(&self) -> Option<&T> {
        self.undo.last()
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn push_bounded<T>(stack: &mut Vec<T>, snapshot: T, limit: usize) -> bool {
    if stack.len() >= limit {
        return false;
    }
    stack.push(snapshot);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn full_stack_refuses_newest() {
        let mut h: History<u32> = History::with_limit(3);
        for i in 0..4 {
            let accepted = h.push_undo(i);
            assert_eq!(accepted, i < 3);
        }
        assert_eq!(h.undo_len(), 3);
        // The oldest entries survive; the rejected push was the newest.
        assert_eq!(h.pop_undo(), Some(2));
        assert_eq!(h.pop_undo(), Some(1));
        assert_eq!(h.pop_undo(), Some(0));
        assert_eq!(h.pop_undo(), None);
    }

    #[test]
    fn default_limit_is_one_hundred() {
        let mut h: History<usize> = History::default();
        for i in 0..=DEFAULT_STACK_LIMIT {
            h.push_undo(i);
        }
        assert_eq!(h.undo_len(), DEFAULT_STACK_LIMIT);
        assert_eq!(h.peek_undo(), Some(&(DEFAULT_STACK_LIMIT - 1)));
    }

    #[test]
    fn record_clears_redo() {
        let mut h: History<u32> = History::new();
        h.record(1);
        let restored = h.undo(2);
        assert_eq!(restored, Some(1));
        assert!(h.can_redo());
        h.record(5);
        assert!(!h.can_redo());
        assert_eq!(h.undo_len(), 1);
    }

    #[test]
    fn undo_with_empty_stack_leaves_redo_alone() {
        let mut h: History<u32> = History::new();
        assert_eq!(h.undo(7), None);
        assert_eq!(h.redo_len(), 0);
        assert_eq!(h.redo(7), None);
        assert_eq!(h.undo_len(), 0);
    }

    #[test]
    fn undo_redo_inverse_law() {
        let mut h: History<alloc::vec::Vec<u32>> = History::new();
        let mut state = vec![];
        for v in 1..=5 {
            h.record(state.clone());
            state.push(v);
        }
        let final_state = state.clone();

        for _ in 0..5 {
            state = h.undo(state).expect("edit to undo");
        }
        assert!(state.is_empty());
        assert!(!h.can_undo());

        for _ in 0..5 {
            state = h.redo(state).expect("edit to redo");
        }
        assert_eq!(state, final_state);
        assert!(!h.can_redo());
        assert_eq!(h.undo_len(), 5);
    }

    #[test]
    fn clear_empties_both() {
        let mut h: History<u32> = History::new();
        h.record(1);
        h.record(2);
        let _ = h.undo(3);
        h.clear();
        assert!(!h.can_undo());
        assert!(!h.can_redo());
    }
}
