use std::collections::HashSet;
use std::ops::Range;

use indexmap::IndexMap;

use super::{FormatSpan, SpanId};

/// The set of format spans over one text buffer.
///
/// Spans live in an arena keyed by [`SpanId`]; ordered views are built on
/// demand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatRanges {
    spans: IndexMap<SpanId, FormatSpan>,
}

impl FormatRanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn insert(&mut self, span: FormatSpan) {
        self.spans.insert(span.id, span);
    }

    pub fn get(&self, id: SpanId) -> Option<&FormatSpan> {
        self.spans.get(&id)
    }

    pub fn get_mut(&mut self, id: SpanId) -> Option<&mut FormatSpan> {
        self.spans.get_mut(&id)
    }

    pub fn remove(&mut self, id: SpanId) -> Option<FormatSpan> {
        self.spans.shift_remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormatSpan> {
        self.spans.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut FormatSpan> {
        self.spans.values_mut()
    }

    pub fn retain(&mut self, mut f: impl FnMut(&FormatSpan) -> bool) {
        self.spans.retain(|_, span| f(span));
    }

    /// Document order: by start, outer spans before inner ones.
    pub fn sorted(&self) -> Vec<&FormatSpan> {
        let mut out: Vec<&FormatSpan> = self.iter().collect();
        out.sort_by_key(|s| (s.start, s.depth, s.seq));
        out
    }

    /// Spans covering `offset` plus zero-length spans anchored there,
    /// outer to inner.
    pub fn at(&self, offset: usize) -> Vec<&FormatSpan> {
        let mut out: Vec<&FormatSpan> = self
            .iter()
            .filter(|s| s.contains(offset) || (s.is_empty() && s.start == offset))
            .collect();
        out.sort_by_key(|s| (s.depth, s.seq));
        out
    }

    pub fn overlapping(&self, range: &Range<usize>) -> Vec<&FormatSpan> {
        let mut out: Vec<&FormatSpan> = self.iter().filter(|s| s.overlaps(range)).collect();
        out.sort_by_key(|s| (s.start, s.depth, s.seq));
        out
    }

    /// Depth for a new span over `range`: one below the deepest span that
    /// contains it.
    pub fn depth_for(&self, range: &Range<usize>) -> u32 {
        self.iter()
            .filter(|s| !s.void && s.covers(range) && (!s.is_empty() || range.is_empty()))
            .map(|s| s.depth + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn block_edges(&self) -> BlockEdges {
        let mut edges = BlockEdges::default();
        for span in self.iter() {
            if span.block {
                edges.starts.insert(span.start);
                edges.ends.insert(span.end);
            } else {
                edges.inline_starts.insert(span.start);
            }
            if span.is_empty() {
                edges.zero_width.insert(span.start);
            }
        }
        edges
    }

    /// Merge coalescable spans that touch or overlap. Spans that only touch
    /// are left apart when `blocked(offset)` says something sits between
    /// them. Returns `(kept, absorbed)` id pairs.
    pub fn coalesce(&mut self, blocked: impl Fn(usize) -> bool) -> Vec<(SpanId, SpanId)> {
        let mut merged = Vec::new();
        loop {
            let Some((keep, absorb)) = self.find_mergeable(&blocked) else {
                break;
            };
            let Some(gone) = self.remove(absorb) else {
                break;
            };
            if let Some(kept) = self.get_mut(keep) {
                kept.start = kept.start.min(gone.start);
                kept.end = kept.end.max(gone.end);
                kept.depth = kept.depth.min(gone.depth);
            }
            merged.push((keep, absorb));
        }
        merged
    }

    fn find_mergeable(&self, blocked: &impl Fn(usize) -> bool) -> Option<(SpanId, SpanId)> {
        let mut candidates: Vec<&FormatSpan> = self
            .iter()
            .filter(|s| s.kind.is_coalescable() && !s.void)
            .collect();
        candidates.sort_by_key(|s| (s.start, s.end));
        for (i, a) in candidates.iter().enumerate() {
            for b in &candidates[i + 1..] {
                if b.start > a.end {
                    break;
                }
                if !a.can_coalesce_with(b) {
                    continue;
                }
                let touching_only = a.end == b.start || b.end == a.start;
                let junction = if a.end == b.start { a.end } else { b.end };
                if touching_only && !a.is_empty() && !b.is_empty() && blocked(junction) {
                    continue;
                }
                return Some(if a.seq <= b.seq {
                    (a.id, b.id)
                } else {
                    (b.id, a.id)
                });
            }
        }
        None
    }
}

/// Offsets where blocks start and end, where inline elements open, and
/// where zero-width spans sit.
///
/// A `\n` touching a block edge is a separator: the encoder drops it and the
/// decoder writes it back between two blocks, or between a block and
/// content. Any other `\n` is a `<br>`.
#[derive(Debug, Clone, Default)]
pub struct BlockEdges {
    pub starts: HashSet<usize>,
    pub ends: HashSet<usize>,
    pub inline_starts: HashSet<usize>,
    pub zero_width: HashSet<usize>,
}

impl BlockEdges {
    pub fn is_separator(&self, chars: &[char], i: usize) -> bool {
        chars.get(i) == Some(&'\n') && (self.ends.contains(&i) || self.starts.contains(&(i + 1)))
    }

    /// A separator with nothing to separate on one of its sides. The decoder
    /// would not write it back.
    pub fn is_dangling(&self, chars: &[char], i: usize) -> bool {
        if !self.is_separator(chars, i) {
            return false;
        }
        let content = |p: usize| p < chars.len() && !self.is_separator(chars, p);
        let before = (i > 0 && content(i - 1))
            || self.zero_width.contains(&i)
            || self.inline_starts.contains(&i);
        let after = content(i + 1)
            || self.zero_width.contains(&(i + 1))
            || self.starts.contains(&(i + 1))
            || self.inline_starts.contains(&(i + 1));
        !(before && after)
    }
}
