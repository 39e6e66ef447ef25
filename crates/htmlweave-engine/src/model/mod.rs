//! Document model types: format spans, their attributes, comment markers
//! and the span arena.

pub mod attributes;
pub mod kind;
pub mod marker;
pub mod ranges;
pub mod span;

pub use attributes::AttributeBag;
pub use kind::{DEFAULT_BLOCK_TAGS, FormatKind, VOID_TAGS};
pub use marker::{BlockDelimiter, CommentMarker, MarkerId, pair_delimiters};
pub use ranges::{BlockEdges, FormatRanges};
pub use span::{FormatSpan, SpanId};

/// Hands out span ids, marker ids and the shared open-event sequence.
#[derive(Debug, Clone, Default)]
pub struct IdGen {
    next_span: u64,
    next_marker: u64,
    next_seq: u64,
}

impl IdGen {
    pub fn span(&mut self) -> SpanId {
        self.next_span += 1;
        SpanId(self.next_span)
    }

    pub fn marker(&mut self) -> MarkerId {
        self.next_marker += 1;
        MarkerId(self.next_marker)
    }

    pub fn seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Continue the sequence after `last`, once events were renumbered.
    pub fn restart_seq(&mut self, last: u64) {
        self.next_seq = last;
    }
}
