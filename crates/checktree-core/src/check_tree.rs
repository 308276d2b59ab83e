#![forbid(unsafe_code)]

//! Owner of the current state for a presentation layer.
//!
//! [`CheckTree`] ties the pieces together: the immutable source [`Forest`],
//! the [`StateSlot`] holding the current snapshot, and a [`StateHistory`] of
//! earlier snapshots. A renderer reads through [`CheckTree::reader`]; input
//! handlers call [`set`](CheckTree::set), [`toggle`](CheckTree::toggle),
//! [`undo`](CheckTree::undo) and [`redo`](CheckTree::redo), each of which
//! swaps the slot to a new snapshot.
//!
//! # Example
//!
//! ```
//! use checktree_core::check_tree::CheckTree;
//! use checktree_core::node::{Forest, Node};
//!
//! let mut tree = CheckTree::new(Forest::new(vec![
//!     Node::new("src").child(Node::new("main.rs")).child(Node::new("lib.rs")),
//! ]));
//!
//! assert!(tree.toggle("1.0#src"));
//! assert!(tree.is_checked("0/2.1#lib.rs"));
//!
//! assert!(tree.undo());
//! assert!(!tree.is_checked("0/2.1#lib.rs"));
//! ```

use std::sync::Arc;

use crate::error::Result;
use crate::export::{ExportFormat, Snapshot, export_snapshot};
use crate::history::{HistoryConfig, StateHistory};
use crate::node::Forest;
use crate::slot::StateSlot;
use crate::state::StateMapping;

/// Configuration for [`CheckTree`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckTreeConfig {
    pub history: HistoryConfig,
}

impl CheckTreeConfig {
    /// Set the history configuration.
    #[must_use]
    pub fn with_history(mut self, history: HistoryConfig) -> Self {
        self.history = history;
        self
    }
}

/// A forest plus its current check state and undo history.
#[derive(Debug)]
pub struct CheckTree {
    forest: Arc<Forest>,
    slot: Arc<StateSlot>,
    history: StateHistory,
}

impl CheckTree {
    /// Build unchecked state for `forest` with the default configuration.
    #[must_use]
    pub fn new(forest: Forest) -> Self {
        Self::with_config(forest, CheckTreeConfig::default())
    }

    /// Build unchecked state for `forest`.
    #[must_use]
    pub fn with_config(forest: Forest, config: CheckTreeConfig) -> Self {
        let initial = Arc::new(StateMapping::build(&forest));
        let mut history = StateHistory::new(config.history);
        history.push(Arc::clone(&initial));
        Self {
            forest: Arc::new(forest),
            slot: Arc::new(StateSlot::from(initial)),
            history,
        }
    }

    /// The source forest.
    #[must_use]
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> Arc<StateMapping> {
        self.slot.load()
    }

    /// Shared handle for readers that only need the current snapshot.
    #[must_use]
    pub fn reader(&self) -> Arc<StateSlot> {
        Arc::clone(&self.slot)
    }

    /// Undo/redo history.
    #[must_use]
    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Whether `key` is checked. Unknown keys read as unchecked.
    #[must_use]
    pub fn is_checked(&self, key: &str) -> bool {
        self.slot.is_checked(key)
    }

    /// Set `key` and its descendants to `value`.
    ///
    /// Returns `false`, recording nothing, when the key is unknown or every
    /// affected node already had `value`.
    pub fn set(&mut self, key: &str, value: bool) -> bool {
        let cascade = self.slot.load().cascade(key, value);
        if cascade.changed == 0 {
            return false;
        }
        self.commit(cascade.state);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "checktree.set",
            key,
            value,
            touched = cascade.touched,
            changed = cascade.changed
        );
        true
    }

    /// Flip `key` and force its descendants to the new value.
    pub fn toggle(&mut self, key: &str) -> bool {
        let value = !self.is_checked(key);
        self.set(key, value)
    }

    /// Uncheck everything. Returns `false` when nothing was checked.
    pub fn reset(&mut self) -> bool {
        if self.slot.load().checked_count() == 0 {
            return false;
        }
        self.commit(StateMapping::build(&self.forest));
        true
    }

    /// Restore the previous snapshot.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.undo() else {
            return false;
        };
        self.slot.store_arc(previous);
        self.log_history("undo");
        true
    }

    /// Re-apply the most recently undone snapshot.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.history.redo() else {
            return false;
        };
        self.slot.store_arc(next);
        self.log_history("redo");
        true
    }

    /// Checked-annotated copy of the forest.
    #[must_use]
    pub fn export(&self) -> Snapshot {
        export_snapshot(&self.forest, &self.slot.load())
    }

    /// Export encoded as JSON text.
    pub fn export_json(&self, format: ExportFormat) -> Result<String> {
        self.export().to_json(format)
    }

    fn commit(&mut self, state: StateMapping) {
        let state = Arc::new(state);
        self.slot.store_arc(Arc::clone(&state));
        self.history.push(state);
        self.log_history("push");
    }

    #[cfg(feature = "tracing")]
    fn log_history(&self, action: &str) {
        tracing::debug!(
            message = "checktree.history",
            action,
            undo_depth = self.history.undo_depth(),
            redo_depth = self.history.redo_depth()
        );
    }

    #[cfg(not(feature = "tracing"))]
    fn log_history(&self, _action: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    fn sample_tree() -> CheckTree {
        CheckTree::new(Forest::new(vec![
            Node::new("A"),
            Node::new("B").child(Node::new("B1")).child(Node::new("B2")),
        ]))
    }

    #[test]
    fn starts_unchecked_with_one_snapshot() {
        let tree = sample_tree();
        assert_eq!(tree.state().len(), 4);
        assert_eq!(tree.state().checked_count(), 0);
        assert_eq!(tree.history().undo_depth(), 1);
        assert!(!tree.history().can_undo());
    }

    #[test]
    fn set_cascades_and_records_history() {
        let mut tree = sample_tree();
        assert!(tree.set("1.1#B", true));
        assert!(tree.is_checked("1/2.0#B1"));
        assert!(tree.is_checked("1/2.1#B2"));
        assert!(!tree.is_checked("1.0#A"));
        assert_eq!(tree.history().undo_depth(), 2);
    }

    #[test]
    fn set_unknown_key_is_ignored() {
        let mut tree = sample_tree();
        let before = tree.state();
        assert!(!tree.set("7.7#ghost", true));
        assert!(Arc::ptr_eq(&before, &tree.state()));
        assert_eq!(tree.history().undo_depth(), 1);
    }

    #[test]
    fn repeated_set_does_not_grow_history() {
        let mut tree = sample_tree();
        assert!(tree.set("1.1#B", true));
        assert!(!tree.set("1.1#B", true));
        assert_eq!(tree.history().undo_depth(), 2);
    }

    #[test]
    fn toggle_flips_subtree() {
        let mut tree = sample_tree();
        tree.set("1/2.0#B1", true);
        assert!(tree.toggle("1.1#B"));
        assert!(tree.is_checked("1/2.0#B1"));
        assert!(tree.is_checked("1/2.1#B2"));
        assert!(tree.toggle("1.1#B"));
        assert!(!tree.is_checked("1/2.0#B1"));
    }

    #[test]
    fn undo_redo_swap_reader_snapshot() {
        let mut tree = sample_tree();
        let reader = tree.reader();
        tree.set("1.0#A", true);
        assert!(reader.is_checked("1.0#A"));

        assert!(tree.undo());
        assert!(!reader.is_checked("1.0#A"));
        assert!(!tree.undo());

        assert!(tree.redo());
        assert!(reader.is_checked("1.0#A"));
        assert!(!tree.redo());
    }

    #[test]
    fn reset_unchecks_everything() {
        let mut tree = sample_tree();
        assert!(!tree.reset());
        tree.set("1.1#B", true);
        assert!(tree.reset());
        assert_eq!(tree.state().checked_count(), 0);
        assert!(tree.undo());
        assert_eq!(tree.state().checked_count(), 3);
    }

    #[test]
    fn history_depth_is_bounded() {
        let config = CheckTreeConfig::default().with_history(HistoryConfig::new(3));
        let mut tree = CheckTree::with_config(
            Forest::new(vec![Node::new("A"), Node::new("B")]),
            config,
        );
        for _ in 0..5 {
            tree.toggle("1.0#A");
        }
        assert_eq!(tree.history().undo_depth(), 3);
    }

    #[test]
    fn export_reflects_current_state() {
        let mut tree = sample_tree();
        tree.set("1/2.1#B2", true);
        let snapshot = tree.export();
        assert_eq!(snapshot.checked_count(), 1);
        let json = tree.export_json(ExportFormat::Compact).expect("encode");
        assert!(json.contains(r#"{"name":"B2","checked":true}"#));
    }
}
