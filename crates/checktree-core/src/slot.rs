#![forbid(unsafe_code)]

//! The single slot holding the current state snapshot.
//!
//! A checkbox tree is read far more often than it is written: every frame
//! looks up `checked` for every visible row, while writes happen only on a
//! click or key press. [`StateSlot`] keeps the current [`StateMapping`]
//! behind [`arc_swap::ArcSwap`] so readers never block and a writer replaces
//! the whole snapshot in one atomic swap.
//!
//! Snapshots are immutable. Changing state means producing a new mapping
//! (see [`StateMapping::set_subtree`]) and storing it here; nothing ever
//! edits an entry through the slot.
//!
//! # Example
//!
//! ```
//! use checktree_core::node::{Forest, Node};
//! use checktree_core::slot::StateSlot;
//! use checktree_core::state::StateMapping;
//!
//! let forest = Forest::new(vec![Node::new("A")]);
//! let slot = StateSlot::new(StateMapping::build(&forest));
//!
//! let next = slot.load().set_subtree("1.0#A", true);
//! slot.store(next);
//! assert!(slot.load().is_checked("1.0#A"));
//! ```

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::state::StateMapping;

/// Wait-free reads, atomic whole-snapshot replacement.
pub struct StateSlot {
    inner: ArcSwap<StateMapping>,
}

impl StateSlot {
    /// Create a slot holding an initial snapshot.
    #[must_use]
    pub fn new(state: StateMapping) -> Self {
        Self {
            inner: ArcSwap::from_pointee(state),
        }
    }

    /// Current snapshot.
    #[inline]
    #[must_use]
    pub fn load(&self) -> Arc<StateMapping> {
        self.inner.load_full()
    }

    /// Borrow the current snapshot without bumping the reference count.
    ///
    /// Prefer this for short lookups on a hot render path.
    #[inline]
    pub fn load_ref(&self) -> arc_swap::Guard<Arc<StateMapping>> {
        self.inner.load()
    }

    /// Replace the current snapshot.
    #[inline]
    pub fn store(&self, state: StateMapping) {
        self.inner.store(Arc::new(state));
    }

    /// Replace the current snapshot with an already shared one.
    #[inline]
    pub fn store_arc(&self, state: Arc<StateMapping>) {
        self.inner.store(state);
    }

    /// Whether `key` is checked in the current snapshot.
    #[must_use]
    pub fn is_checked(&self, key: &str) -> bool {
        self.inner.load().is_checked(key)
    }
}

impl From<Arc<StateMapping>> for StateSlot {
    fn from(state: Arc<StateMapping>) -> Self {
        Self {
            inner: ArcSwap::new(state),
        }
    }
}

impl fmt::Debug for StateSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let current = self.inner.load();
        f.debug_struct("StateSlot")
            .field("entries", &current.len())
            .field("checked", &current.checked_count())
            .finish()
    }
}
