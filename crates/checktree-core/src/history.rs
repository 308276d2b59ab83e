#![forbid(unsafe_code)]

//! Undo/redo over state snapshots.
//!
//! Every accepted change produces a new [`StateMapping`]; [`StateHistory`]
//! keeps those snapshots as `Arc`s in two stacks. Because the mapping is a
//! persistent map, a hundred snapshots of a large tree cost little more than
//! one: consecutive snapshots share every entry outside the toggled subtree.
//!
//! ```text
//! push(s2)
//!   undo: [s0, s1, s2]   redo: []        current: s2
//! undo()
//!   undo: [s0, s1]       redo: [s2]      current: s1
//! push(s3)  clears redo
//!   undo: [s0, s1, s3]   redo: []        current: s3
//! ```
//!
//! # Invariants
//!
//! 1. `undo_depth() <= config.max_depth` after any operation.
//! 2. The redo stack is cleared on every `push`.
//! 3. `current()` is the most recently pushed or restored snapshot.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use crate::state::StateMapping;

/// Configuration for [`StateHistory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum number of snapshots kept on the undo stack, current included.
    /// Oldest snapshots are evicted first.
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}

impl HistoryConfig {
    /// Create a configuration with the given depth limit.
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// No depth limit (for testing).
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
        }
    }
}

/// Undo and redo stacks of state snapshots.
pub struct StateHistory {
    /// Current snapshot at the back.
    undo_stack: VecDeque<Arc<StateMapping>>,
    /// Most recently undone snapshot at the back.
    redo_stack: VecDeque<Arc<StateMapping>>,
    config: HistoryConfig,
}

impl fmt::Debug for StateHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateHistory")
            .field("undo_depth", &self.undo_stack.len())
            .field("redo_depth", &self.redo_stack.len())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for StateHistory {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl StateHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            config,
        }
    }

    /// Record a new current snapshot, discarding anything that could be redone.
    pub fn push(&mut self, state: Arc<StateMapping>) {
        self.redo_stack.clear();
        self.undo_stack.push_back(state);
        while self.undo_stack.len() > self.config.max_depth {
            self.undo_stack.pop_front();
        }
    }

    /// Step back one snapshot and return the new current one.
    ///
    /// Returns `None` when there is nothing before the current snapshot.
    pub fn undo(&mut self) -> Option<Arc<StateMapping>> {
        if self.undo_stack.len() < 2 {
            return None;
        }
        let current = self.undo_stack.pop_back()?;
        self.redo_stack.push_back(current);
        self.undo_stack.back().cloned()
    }

    /// Re-apply the most recently undone snapshot and return it.
    pub fn redo(&mut self) -> Option<Arc<StateMapping>> {
        let snapshot = self.redo_stack.pop_back()?;
        self.undo_stack.push_back(snapshot);
        self.undo_stack.back().cloned()
    }

    /// Current snapshot, if any has been pushed.
    #[must_use]
    pub fn current(&self) -> Option<&Arc<StateMapping>> {
        self.undo_stack.back()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() >= 2
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Snapshots on the undo stack, current included.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Drop every snapshot.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
