#![forbid(unsafe_code)]

//! Keyed check state for a forest.
//!
//! [`StateMapping`] is a flat arena from [`Key`] to [`NodeState`]. Parent
//! and child relationships are stored as key lists instead of references, so
//! the whole state is a single value that can be replaced wholesale.
//!
//! The arena is a persistent hash map (`im::HashMap`). Cloning a mapping is
//! O(1) and a cascade copies only the entries it rewrites; everything else
//! is shared with the previous snapshot.
//!
//! # Invariants
//!
//! 1. One entry per node of the source forest, no orphans.
//! 2. Every key listed in a `children` list is itself an entry.
//! 3. Entries are never mutated in place. Every operation returns a new
//!    mapping and leaves its input untouched.
//! 4. [`StateMapping::cascade`] touches exactly the target's subtree.
//!
//! # Example
//!
//! ```
//! use checktree_core::node::{Forest, Node};
//! use checktree_core::state::StateMapping;
//!
//! let forest = Forest::new(vec![
//!     Node::new("A"),
//!     Node::new("B").child(Node::new("B1")),
//! ]);
//! let state = StateMapping::build(&forest);
//! let next = state.set_subtree("1.1#B", true);
//!
//! assert!(next.is_checked("1/2.0#B1"));
//! assert!(!next.is_checked("1.0#A"));
//! assert!(!state.is_checked("1.1#B"));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::key::Key;
use crate::node::Forest;

type Entries = im::HashMap<Key, NodeState, ahash::RandomState>;

/// Check state of a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeState {
    checked: bool,
    /// Child keys in sibling order; `None` for leaves.
    children: Option<Arc<[Key]>>,
}

impl NodeState {
    /// Whether the node is checked.
    #[inline]
    #[must_use]
    pub fn checked(&self) -> bool {
        self.checked
    }

    /// Keys of the node's children. Leaves yield an empty slice.
    #[must_use]
    pub fn children(&self) -> &[Key] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Whether the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Whether both entries share the same child list allocation.
    #[must_use]
    pub fn shares_children(&self, other: &NodeState) -> bool {
        match (&self.children, &other.children) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    fn with_checked(&self, checked: bool) -> Self {
        Self {
            checked,
            children: self.children.clone(),
        }
    }
}

/// Result of a cascade.
#[derive(Debug, Clone)]
pub struct Cascade {
    /// The new mapping.
    pub state: StateMapping,
    /// Entries rewritten: the target and all of its descendants.
    pub touched: usize,
    /// Entries whose `checked` flag actually flipped.
    pub changed: usize,
}

/// Keyed collection of per-node check state.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct StateMapping {
    entries: Entries,
}

impl StateMapping {
    /// Build the initial state for a forest: one unchecked entry per node.
    ///
    /// Nodes are keyed as [`Forest::walk`] keys them. The walk uses an
    /// explicit stack and keys stay short at any depth, so arbitrarily deep
    /// forests cost O(n).
    #[must_use]
    pub fn build(forest: &Forest) -> Self {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("checktree.build", roots = forest.roots().len())
            .entered();

        let mut entries = Entries::default();
        for position in forest.walk() {
            let children = (!position.node.is_leaf())
                .then(|| position.child_keys().collect::<Arc<[Key]>>());
            entries.insert(
                position.key,
                NodeState {
                    checked: false,
                    children,
                },
            );
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "checktree.build", node_count = entries.len());

        Self { entries }
    }

    /// Set `key` and all of its descendants to `value`.
    ///
    /// Unknown keys are a no-op: the returned mapping is the input mapping.
    #[must_use]
    pub fn set_subtree(&self, key: &str, value: bool) -> Self {
        self.cascade(key, value).state
    }

    /// Like [`set_subtree`](Self::set_subtree), also reporting how many
    /// entries were rewritten.
    ///
    /// Cost is proportional to the size of the target's subtree; entries
    /// outside it are shared with `self`, not copied.
    #[must_use]
    pub fn cascade(&self, key: &str, value: bool) -> Cascade {
        if !self.entries.contains_key(key) {
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "checktree.cascade.miss", key, value);
            return Cascade {
                state: self.clone(),
                touched: 0,
                changed: 0,
            };
        }

        let mut accumulator = Entries::default();
        let mut changed = 0usize;
        let mut stack = vec![Key::from(key)];
        while let Some(current) = stack.pop() {
            let Some(entry) = self.entries.get(&current) else {
                continue;
            };
            changed += usize::from(entry.checked != value);
            stack.extend(entry.children().iter().cloned());
            accumulator.insert(current, entry.with_checked(value));
        }

        let touched = accumulator.len();
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "checktree.cascade", key, value, touched, changed);

        Cascade {
            state: Self {
                entries: accumulator.union(self.entries.clone()),
            },
            touched,
            changed,
        }
    }

    /// Whether `key` is checked. Unknown keys read as unchecked.
    #[must_use]
    pub fn is_checked(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(NodeState::checked)
    }

    /// Look up an entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&NodeState> {
        self.entries.get(key)
    }

    /// Whether the mapping has an entry for `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of checked entries.
    #[must_use]
    pub fn checked_count(&self) -> usize {
        self.entries.values().filter(|entry| entry.checked).count()
    }

    /// Iterate over all keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }

    /// Iterate over all entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &NodeState)> {
        self.entries.iter()
    }

    /// Checked keys, sorted.
    #[must_use]
    pub fn checked_keys(&self) -> Vec<Key> {
        let mut keys: Vec<Key> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.checked)
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Whether both mappings are the same snapshot (not just equal content).
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.entries.ptr_eq(&other.entries)
    }
}

impl fmt::Debug for StateMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        f.debug_map().entries(entries).finish()
    }
}

/// Build the initial state for `forest`.
#[must_use]
pub fn build_state(forest: &Forest) -> StateMapping {
    StateMapping::build(forest)
}

/// Set `key` and its descendants to `value` in a new mapping.
#[must_use]
pub fn set_subtree(state: &StateMapping, key: &str, value: bool) -> StateMapping {
    state.set_subtree(key, value)
}
