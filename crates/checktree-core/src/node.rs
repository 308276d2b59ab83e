#![forbid(unsafe_code)]

//! Declarative input forest.
//!
//! A [`Forest`] is the ordered list of root [`Node`]s supplied once by the
//! caller. It is never regenerated from check state; state lives in a
//! separate [`StateMapping`](crate::state::StateMapping) keyed by position.
//!
//! # Example
//!
//! ```
//! use checktree_core::node::{Forest, Node};
//!
//! let forest = Forest::new(vec![
//!     Node::new("A"),
//!     Node::new("C")
//!         .child(Node::new("CA").child(Node::new("CAA")))
//!         .child(Node::new("CB")),
//! ]);
//!
//! assert_eq!(forest.roots().len(), 2);
//! assert_eq!(forest.node_count(), 5);
//!
//! let keys: Vec<String> = forest.walk().map(|p| p.key.to_string()).collect();
//! assert_eq!(keys, ["1.0#A", "1.1#C", "1/2.0#CA", "2/3.0#CAA", "1/2.1#CB"]);
//! ```
//!
//! Forests may be arbitrarily deep: [`Forest::walk`] and [`Forest::node_count`]
//! use explicit stacks, and parsing, encoding and dropping do not consume
//! thread stack per level. `Clone`, `PartialEq` and `Debug` do recurse.

use serde::{Deserialize, Serialize};

use crate::deep;
use crate::error::Result;
use crate::key::Key;

/// A labeled node in the input forest.
///
/// On the wire a node is `{"name": "...", "children": [...]}`; `label` is
/// accepted in place of `name` and `children` may be omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "name", alias = "label")]
    label: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "deep::serialize_children"
    )]
    children: Option<Vec<Node>>,
}

impl Drop for Node {
    fn drop(&mut self) {
        deep::unlink(self.children.take(), |node| node.children.take());
    }
}

impl Node {
    /// Create a leaf node with the given label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: None,
        }
    }

    /// Add a child node.
    #[must_use]
    pub fn child(mut self, node: Node) -> Self {
        self.children.get_or_insert_with(Vec::new).push(node);
        self
    }

    /// Set children from a vec.
    #[must_use]
    pub fn with_children(mut self, nodes: Vec<Node>) -> Self {
        self.children = Some(nodes);
        self
    }

    /// Get the label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the children. Leaves yield an empty slice.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or_default()
    }

    /// A node with no children, or an empty children list, is a leaf.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }
}

/// Ordered sequence of root nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forest {
    roots: Vec<Node>,
}

impl Forest {
    /// Create a forest from its roots.
    #[must_use]
    pub fn new(roots: Vec<Node>) -> Self {
        Self { roots }
    }

    /// Parse a forest from a JSON array of nodes. Nesting depth is not
    /// limited.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(deep::from_json(text)?)
    }

    /// Get the roots.
    #[must_use]
    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    /// Whether the forest has no roots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Count every node in the forest.
    #[must_use]
    pub fn node_count(&self) -> usize {
        let mut count = 0usize;
        let mut stack: Vec<&Node> = self.roots.iter().collect();
        while let Some(node) = stack.pop() {
            count = count.saturating_add(1);
            stack.extend(node.children());
        }
        count
    }

    /// Visit every node depth-first in pre-order, numbering and keying each
    /// one the same way [`StateMapping::build`](crate::state::StateMapping::build)
    /// does.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        let last = self.roots.len().saturating_sub(1);
        Walk {
            stack: self
                .roots
                .iter()
                .enumerate()
                .rev()
                .map(|(index, node)| Pending {
                    node,
                    parent: None,
                    depth: 1,
                    index,
                    is_last: index == last,
                })
                .collect(),
            next_ordinal: 0,
        }
    }
}

/// A node reached by [`Forest::walk`].
#[derive(Debug, Clone)]
pub struct Position<'a> {
    pub node: &'a Node,
    pub key: Key,
    /// Pre-order number of this node within the forest.
    pub ordinal: usize,
    /// 1 for roots.
    pub depth: usize,
    /// Index among siblings.
    pub index: usize,
    /// Whether this is the last of its siblings.
    pub is_last: bool,
}

impl Position<'_> {
    /// Keys of this node's children, in sibling order.
    pub fn child_keys(&self) -> impl Iterator<Item = Key> + '_ {
        let depth = self.depth + 1;
        self.node
            .children()
            .iter()
            .enumerate()
            .map(move |(index, child)| Key::derive(Some(self.ordinal), child.label(), depth, index))
    }
}

struct Pending<'a> {
    node: &'a Node,
    parent: Option<usize>,
    depth: usize,
    index: usize,
    is_last: bool,
}

/// Pre-order iterator returned by [`Forest::walk`].
pub struct Walk<'a> {
    stack: Vec<Pending<'a>>,
    next_ordinal: usize,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Position<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let Pending {
            node,
            parent,
            depth,
            index,
            is_last,
        } = self.stack.pop()?;
        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;

        let children = node.children();
        let last = children.len().saturating_sub(1);
        self.stack
            .extend(children.iter().enumerate().rev().map(|(child_index, child)| Pending {
                node: child,
                parent: Some(ordinal),
                depth: depth + 1,
                index: child_index,
                is_last: child_index == last,
            }));

        Some(Position {
            node,
            key: Key::derive(parent, node.label(), depth, index),
            ordinal,
            depth,
            index,
            is_last,
        })
    }
}

impl FromIterator<Node> for Forest {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<Node>> for Forest {
    fn from(roots: Vec<Node>) -> Self {
        Self::new(roots)
    }
}
