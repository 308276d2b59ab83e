#![forbid(unsafe_code)]

//! Positional keys for tree nodes.
//!
//! Every node in a [`Forest`](crate::node::Forest) is addressed by a [`Key`]
//! derived from its label, its depth (1-based at the roots), its index among
//! its siblings (0-based) and, below the roots, the pre-order ordinal of its
//! parent. Ordinals count every node of the forest in depth-first pre-order,
//! starting at 0 with the first root; [`Forest::walk`](crate::node::Forest::walk)
//! assigns them.
//!
//! ```text
//! forest          ordinal   key
//! A               0         1.0#A
//! B               1         1.1#B
//! C               2         1.2#C
//! └── CA          3         2/2.0#CA
//!     ├── CAA     4         3/3.0#CAA
//!     └── CAB     5         3/3.1#CAB
//! ```
//!
//! A parent ordinal plus a sibling index names exactly one node, so keys are
//! unique even when labels repeat. The positional prefix never contains `#`,
//! and its length does not grow with depth beyond the digits of the numbers.
//!
//! # Example
//!
//! ```
//! use checktree_core::key::Key;
//!
//! let root = Key::derive(None, "C", 1, 2);
//! let child = Key::derive(Some(2), "CA", 2, 0);
//!
//! assert_eq!(root.as_str(), "1.2#C");
//! assert_eq!(child.as_str(), "2/2.0#CA");
//! assert_eq!(child.depth(), Some(2));
//! assert_eq!(child.parent(), Some(2));
//! assert_eq!(child.label(), "CA");
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::fmt::Write as _;
use std::sync::Arc;

/// Separates the parent ordinal from the `depth.index` slot.
pub const PARENT_SEPARATOR: char = '/';

/// Separates the positional prefix from the label.
pub const LABEL_SEPARATOR: char = '#';

/// String key uniquely identifying a tree position.
///
/// Cloning is a reference-count bump. Keys hash and compare as their text,
/// so maps keyed by `Key` can be queried with a plain `&str`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(Arc<str>);

impl Key {
    /// Derive the key for a node from its parent's pre-order ordinal, its
    /// label, depth and sibling index. Roots pass `None` as the parent.
    #[must_use]
    pub fn derive(parent: Option<usize>, label: &str, depth: usize, index: usize) -> Self {
        let mut text = String::with_capacity(label.len() + 16);
        // Writing into a String cannot fail.
        if let Some(parent) = parent {
            let _ = write!(text, "{parent}{PARENT_SEPARATOR}");
        }
        let _ = write!(text, "{depth}.{index}{LABEL_SEPARATOR}");
        text.push_str(label);
        Self(Arc::from(text))
    }

    /// The key as text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Positional prefix (everything before the label).
    #[must_use]
    pub fn position(&self) -> &str {
        self.0
            .split_once(LABEL_SEPARATOR)
            .map_or(&*self.0, |(position, _)| position)
    }

    /// Label carried by the key, or `""` for keys without one.
    #[must_use]
    pub fn label(&self) -> &str {
        self.0
            .split_once(LABEL_SEPARATOR)
            .map_or("", |(_, label)| label)
    }

    /// Pre-order ordinal of the parent node; `None` for roots.
    #[must_use]
    pub fn parent(&self) -> Option<usize> {
        let (parent, _) = self.position().split_once(PARENT_SEPARATOR)?;
        parent.parse().ok()
    }

    /// Depth of the addressed node (1 for roots), if the key is well formed.
    #[must_use]
    pub fn depth(&self) -> Option<usize> {
        let (depth, _) = self.slot()?;
        depth.parse().ok()
    }

    /// Sibling index of the addressed node, if the key is well formed.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        let (_, index) = self.slot()?;
        index.parse().ok()
    }

    /// Whether the key addresses a root node.
    #[must_use]
    pub fn is_root(&self) -> bool {
        !self.position().contains(PARENT_SEPARATOR)
    }

    fn slot(&self) -> Option<(&str, &str)> {
        let position = self.position();
        let slot = position
            .split_once(PARENT_SEPARATOR)
            .map_or(position, |(_, slot)| slot);
        slot.split_once('.')
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({:?})", &*self.0)
    }
}
