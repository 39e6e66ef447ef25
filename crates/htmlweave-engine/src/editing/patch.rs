use std::ops::Range;

use crate::buffer::Shift;
use crate::model::{MarkerId, SpanId};

/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Patch {
    pub shift: Shift,
    /// Post-edit char ranges whose text changed
    pub changed: Vec<Range<usize>>,
    pub spans: SpanDelta,
    pub markers: MarkerDelta,
    pub version: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpanDelta {
    pub added: Vec<SpanId>,
    pub removed: Vec<SpanId>,
    /// Spans whose range, depth or attributes changed
    pub modified: Vec<SpanId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkerDelta {
    pub removed: Vec<MarkerId>,
    pub moved: Vec<MarkerId>,
}

impl SpanDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}
