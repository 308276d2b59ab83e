//! Text rendering of a forest with its check state.

use std::fmt::Write as _;

use checktree_core::{Forest, Key, Position, StateMapping};
use clap::ValueEnum;

/// Which glyph set draws the tree guides. Roots are never indented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GuideStyle {
    /// `|`, `+--` and `` `-- ``.
    Ascii,
    #[default]
    Unicode,
    Rounded,
    Bold,
    Double,
}

/// The three drawn glyphs of one style; blank levels are always four spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    /// An ancestor level whose node still has siblings below.
    pub vertical: &'static str,
    /// The node's own level when it has siblings below.
    pub branch: &'static str,
    /// The node's own level when it is the last sibling.
    pub last: &'static str,
}

const BLANK: &str = "    ";

impl GuideStyle {
    #[must_use]
    pub const fn glyphs(self) -> Glyphs {
        match self {
            Self::Double => Glyphs {
                vertical: "\u{2551}   ",
                branch: "\u{2560}\u{2550}\u{2550} ",
                last: "\u{255A}\u{2550}\u{2550} ",
            },
            Self::Bold => Glyphs {
                vertical: "\u{2503}   ",
                branch: "\u{2523}\u{2501}\u{2501} ",
                last: "\u{2517}\u{2501}\u{2501} ",
            },
            Self::Rounded => Glyphs {
                last: "\u{2570}\u{2500}\u{2500} ",
                ..Self::Unicode.glyphs()
            },
            Self::Unicode => Glyphs {
                vertical: "\u{2502}   ",
                branch: "\u{251C}\u{2500}\u{2500} ",
                last: "\u{2514}\u{2500}\u{2500} ",
            },
            Self::Ascii => Glyphs {
                vertical: "|   ",
                branch: "+-- ",
                last: "`-- ",
            },
        }
    }

    /// Pick the segment for one level. `own` marks the node's own level;
    /// `is_last` is whether the node on that level is its parent's last child.
    #[must_use]
    pub const fn segment(self, own: bool, is_last: bool) -> &'static str {
        let glyphs = self.glyphs();
        match (own, is_last) {
            (true, false) => glyphs.branch,
            (true, true) => glyphs.last,
            (false, false) => glyphs.vertical,
            (false, true) => BLANK,
        }
    }
}

/// Visit every node in the order of [`Forest::walk`].
///
/// `last_path` holds one entry per level below the roots, ending with the
/// node itself: whether the node on that level is the last of its siblings.
/// The same buffer is reused for every node.
pub fn walk<'a>(forest: &'a Forest, mut visit: impl FnMut(&Position<'a>, &[bool])) {
    let mut last_path: Vec<bool> = Vec::new();
    for position in forest.walk() {
        last_path.truncate(position.depth.saturating_sub(2));
        if position.depth > 1 {
            last_path.push(position.is_last);
        }
        visit(&position, &last_path);
    }
}

/// Every key in pre-order.
#[must_use]
pub fn keys(forest: &Forest) -> Vec<Key> {
    let mut out = Vec::with_capacity(forest.node_count());
    walk(forest, |position, _| out.push(position.key.clone()));
    out
}

/// Render one line per node: guides, `[x]` or `[ ]`, then the label.
#[must_use]
pub fn render(forest: &Forest, state: &StateMapping, style: GuideStyle) -> String {
    let mut out = String::new();
    walk(forest, |position, last_path| {
        let levels = last_path.len();
        for (level, &is_last) in last_path.iter().enumerate() {
            out.push_str(style.segment(level + 1 == levels, is_last));
        }
        let mark = if state.is_checked(position.key.as_str()) {
            "[x]"
        } else {
            "[ ]"
        };
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{mark} {}", position.node.label());
    });
    out
}
