use std::ops::Range;

/// Edit commands accepted by [`Document::apply`](crate::Document::apply).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Insert `text` at char offset `at`. With `sticky`, inline formatting
    /// that ends exactly at `at` grows over the new text.
    InsertText {
        at: usize,
        text: String,
        sticky: bool,
    },
    DeleteRange {
        range: Range<usize>,
    },
    /// Delete `range`, then insert `text` at its start.
    ReplaceRange {
        range: Range<usize>,
        text: String,
    },
}

impl Cmd {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Cmd::InsertText {
            at,
            text: text.into(),
            sticky: false,
        }
    }

    pub fn delete(range: Range<usize>) -> Self {
        Cmd::DeleteRange { range }
    }
}
