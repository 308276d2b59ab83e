#![forbid(unsafe_code)]

//! Check state for checkbox trees.
//!
//! # Role
//! `checktree-core` is the model behind a checkbox tree widget. It owns no
//! rendering; a presentation layer reads check state by key and asks for a
//! new snapshot whenever the user clicks.
//!
//! # Primary responsibilities
//! - **Keys** ([`key`]): a stable string per tree position.
//! - **Build** ([`state::build_state`]): one unchecked entry per node.
//! - **Cascade** ([`state::set_subtree`]): set a node and all of its
//!   descendants, at a cost proportional to that subtree only.
//! - **Export** ([`export::export_snapshot`]): the source forest annotated
//!   with `checked`, ready to encode as JSON.
//! - **Ownership** ([`check_tree::CheckTree`]): the current snapshot in a
//!   wait-free slot plus undo/redo.
//!
//! Every operation takes immutable input and returns a new value. Unknown
//! keys never fail: lookups read as unchecked and cascades are no-ops.

pub mod check_tree;
mod deep;
pub mod error;
pub mod export;
pub mod history;
pub mod key;
pub mod logging;
pub mod node;
pub mod slot;
pub mod state;

pub use check_tree::{CheckTree, CheckTreeConfig};
pub use error::{CheckTreeError, Result};
pub use export::{ExportFormat, Snapshot, SnapshotNode, export_snapshot};
pub use history::{HistoryConfig, StateHistory};
pub use key::Key;
pub use node::{Forest, Node, Position, Walk};
pub use slot::StateSlot;
pub use state::{Cascade, NodeState, StateMapping, build_state, set_subtree};
