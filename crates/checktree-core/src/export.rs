#![forbid(unsafe_code)]

//! Checked-annotated export of a forest.
//!
//! [`export_snapshot`] walks the original [`Forest`] and re-derives each
//! node's [`Key`](crate::key::Key) exactly as [`StateMapping::build`] does,
//! so the annotations line up with the state. A key
//! missing from the mapping exports as `checked: false`.
//!
//! The result serializes as an ordered array of `{name, checked, children?}`
//! objects:
//!
//! ```text
//! [
//!   { "name": "A", "checked": false },
//!   { "name": "C", "checked": true, "children": [
//!       { "name": "CA", "checked": true }
//!   ] }
//! ]
//! ```

use serde::{Deserialize, Serialize};

use crate::deep;
use crate::error::Result;
use crate::node::{Forest, Node};
use crate::state::StateMapping;

/// Text encoding for an exported snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Indented, one field per line (default).
    #[default]
    Pretty,
    /// Single line.
    Compact,
}

/// Exported node: the source label plus its current check state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub name: String,
    pub checked: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "deep::serialize_children"
    )]
    pub children: Option<Vec<SnapshotNode>>,
}

impl Drop for SnapshotNode {
    fn drop(&mut self) {
        deep::unlink(self.children.take(), |node| node.children.take());
    }
}

/// Exported forest, mirroring the shape of the source forest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    roots: Vec<SnapshotNode>,
}

impl Snapshot {
    /// Get the exported roots.
    #[must_use]
    pub fn roots(&self) -> &[SnapshotNode] {
        &self.roots
    }

    /// Count checked nodes across the whole snapshot.
    #[must_use]
    pub fn checked_count(&self) -> usize {
        let mut count = 0usize;
        let mut stack: Vec<&SnapshotNode> = self.roots.iter().collect();
        while let Some(node) = stack.pop() {
            count += usize::from(node.checked);
            if let Some(children) = &node.children {
                stack.extend(children);
            }
        }
        count
    }

    /// Encode the snapshot as JSON text.
    pub fn to_json(&self, format: ExportFormat) -> Result<String> {
        let text = match format {
            ExportFormat::Pretty => serde_json::to_string_pretty(self)?,
            ExportFormat::Compact => serde_json::to_string(self)?,
        };
        Ok(text)
    }
}

struct Open<'a> {
    node: &'a Node,
    depth: usize,
    checked: bool,
    built: Vec<SnapshotNode>,
}

impl Open<'_> {
    fn close(self) -> SnapshotNode {
        SnapshotNode {
            name: self.node.label().to_owned(),
            checked: self.checked,
            children: (!self.node.is_leaf()).then_some(self.built),
        }
    }
}

/// Pop the innermost open node and attach it to its parent (or the roots).
fn close_innermost(open: &mut Vec<Open<'_>>, roots: &mut Vec<SnapshotNode>) {
    let Some(done) = open.pop() else {
        return;
    };
    let exported = done.close();
    match open.last_mut() {
        Some(parent) => parent.built.push(exported),
        None => roots.push(exported),
    }
}

/// Annotate every node of `forest` with its check state from `state`.
///
/// Never mutates either input. Keys come from [`Forest::walk`], the same
/// walk the builder uses; the walk is pre-order, so a node is complete once
/// a node at the same or a shallower depth appears.
#[must_use]
pub fn export_snapshot(forest: &Forest, state: &StateMapping) -> Snapshot {
    let mut roots = Vec::with_capacity(forest.roots().len());
    let mut open: Vec<Open<'_>> = Vec::new();

    for position in forest.walk() {
        while open.last().is_some_and(|node| node.depth >= position.depth) {
            close_innermost(&mut open, &mut roots);
        }
        open.push(Open {
            node: position.node,
            depth: position.depth,
            checked: state.is_checked(position.key.as_str()),
            built: Vec::with_capacity(position.node.children().len()),
        });
    }
    while !open.is_empty() {
        close_innermost(&mut open, &mut roots);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        message = "checktree.export",
        roots = roots.len(),
        node_count = forest.node_count()
    );

    Snapshot { roots }
}
