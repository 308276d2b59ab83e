#![forbid(unsafe_code)]

//! Depth-independent JSON and drop helpers for the recursive node types.
//!
//! [`Node`](crate::node::Node) and [`SnapshotNode`](crate::export::SnapshotNode)
//! nest one level per tree level. Parsing goes through `serde_stacker` with
//! serde_json's recursion limit disabled, serialization grows the stack with
//! `stacker` at every `children` field, and dropping unlinks children onto a
//! heap stack. Forests of any depth therefore parse, encode and drop without
//! overflowing the thread stack.

use serde::{Deserialize, Serialize, Serializer};

/// Stack left before growing.
const RED_ZONE: usize = 64 * 1024;
/// Size of each new stack segment.
const STACK_SEGMENT: usize = 2 * 1024 * 1024;

/// Parse JSON with no nesting limit.
pub(crate) fn from_json<'a, T: Deserialize<'a>>(text: &'a str) -> serde_json::Result<T> {
    let mut json = serde_json::Deserializer::from_str(text);
    json.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    Ok(value)
}

/// `serialize_with` for `children` fields.
pub(crate) fn serialize_children<T, S>(
    children: &Option<Vec<T>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, || children.serialize(serializer))
}

/// Drop a children list without recursing once per level.
pub(crate) fn unlink<T>(children: Option<Vec<T>>, take: impl Fn(&mut T) -> Option<Vec<T>>) {
    let mut stack = children.unwrap_or_default();
    while let Some(mut node) = stack.pop() {
        if let Some(grandchildren) = take(&mut node) {
            stack.extend(grandchildren);
        }
    }
}
