use std::ops::Range;

use serde::Serialize;

use super::{AttributeBag, FormatKind};

/// Stable identity of a span across edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SpanId(pub u64);

/// A formatting range over the text buffer, `[start, end)` in char offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpan {
    pub id: SpanId,
    pub kind: FormatKind,
    /// Element name written on encode (`b` or `strong` for Bold, ...)
    pub tag: String,
    pub start: usize,
    pub end: usize,
    pub attributes: AttributeBag,
    /// Number of elements enclosing this one
    pub depth: u32,
    /// Document order of the open event, shared with comment markers
    pub seq: u64,
    pub block: bool,
    /// Covers exactly one U+FFFC and has no end tag
    pub void: bool,
    /// Written as `<tag ... />`
    pub self_closing: bool,
}

impl FormatSpan {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// True when `range` lies within this span.
    pub fn covers(&self, range: &Range<usize>) -> bool {
        self.start <= range.start && range.end <= self.end
    }

    /// Overlap test that also treats zero-width spans and ranges as points.
    pub fn overlaps(&self, range: &Range<usize>) -> bool {
        match (self.is_empty(), range.is_empty()) {
            (false, false) => self.start < range.end && range.start < self.end,
            (false, true) => self.contains(range.start),
            (true, false) => range.start <= self.start && self.start < range.end,
            (true, true) => self.start == range.start,
        }
    }

    pub fn is_list_item(&self) -> bool {
        self.kind == FormatKind::ListItem
    }

    pub fn is_list(&self) -> bool {
        self.kind.is_list()
    }

    /// Spans that merge with each other when adjacent or overlapping.
    pub fn can_coalesce_with(&self, other: &FormatSpan) -> bool {
        self.kind.is_coalescable()
            && !self.void
            && self.kind == other.kind
            && self.tag == other.tag
            && self.attributes == other.attributes
            && self.start <= other.end
            && other.start <= self.end
    }
}
