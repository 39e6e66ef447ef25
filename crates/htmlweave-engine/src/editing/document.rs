use std::collections::{HashMap, HashSet};
use std::ops::Range;

use crate::buffer::{OBJECT_REPLACEMENT, Shift, TextBuffer};
use crate::codec::{self, CodecOptions};
use crate::editing::patch::{MarkerDelta, SpanDelta};
use crate::editing::{Cmd, Patch, PlaceholderId, transform};
use crate::error::{EditError, OutOfRangeError, ParseError};
use crate::model::{AttributeBag, CommentMarker, FormatKind, FormatRanges, FormatSpan, IdGen, SpanId};
use crate::snapshot;

/// A rich-text document: plain text plus the spans and comments laid over it.
///
/// The document holds three pieces of state that always move together:
///
/// ## 1. Text buffer
/// - Unicode text in an `xi_rope::Rope`, addressed by char offset
/// - Block boundaries are single `\n` separators; `<br>` is a plain `\n`
/// - Embedded objects are U+FFFC
///
/// ## 2. Format spans
/// - Half-open `[start, end)` ranges with a kind, element name and attributes
/// - Spans may overlap; the encoder restores proper nesting
/// - Span ids are stable across edits
///
/// ## 3. Comment markers
/// - Zero-width anchors holding the literal body of each HTML comment
/// - Block delimiters (`<!-- wp:list -->`) pair up and travel with their block
///
/// ## Editing
///
/// Every mutation goes through [`Document::apply`] or one of the span and
/// placeholder helpers. Each runs on a copy, re-normalizes spans, checks the
/// model invariants and only then replaces `self`. A failed edit leaves the
/// document untouched.
///
/// ```rust
/// # use htmlweave_engine::{Cmd, Document};
/// let mut doc = Document::decode("<ul><li>abcdef</li></ul>").unwrap();
/// doc.apply(Cmd::insert(3, "\n")).unwrap();
/// assert_eq!(doc.encode(), "<ul><li>abc</li><li>def</li></ul>");
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) buffer: TextBuffer,
    pub(crate) ranges: FormatRanges,
    /// Sorted by `(offset, seq)`
    pub(crate) markers: Vec<CommentMarker>,
    pub(crate) ids: IdGen,
    pub(crate) placeholders: HashMap<PlaceholderId, SpanId>,
    pub(crate) options: CodecOptions,
    pub(crate) version: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::from_parts(
            TextBuffer::new(),
            FormatRanges::new(),
            Vec::new(),
            IdGen::default(),
            CodecOptions::default(),
        )
    }

    pub(crate) fn from_parts(
        buffer: TextBuffer,
        ranges: FormatRanges,
        markers: Vec<CommentMarker>,
        ids: IdGen,
        options: CodecOptions,
    ) -> Self {
        let mut doc = Self {
            buffer,
            ranges,
            markers,
            ids,
            placeholders: HashMap::new(),
            options,
            version: 0,
        };
        doc.sort_markers();
        doc
    }

    pub fn decode(html: &str) -> Result<Self, ParseError> {
        codec::decode(html)
    }

    pub fn decode_with(html: &str, options: &CodecOptions) -> Result<Self, ParseError> {
        codec::decode_with(html, options)
    }

    pub fn encode(&self) -> String {
        codec::encode(self)
    }

    /// Apply an edit command.
    ///
    /// The returned [`Patch`] describes the buffer shift and which spans and
    /// markers were added, removed, changed or moved.
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        let result = self.try_apply(&cmd);
        if let Err(e) = &result {
            log::warn!("rejected {cmd:?}: {e}");
        }
        result
    }

    pub fn apply_insert(&mut self, offset: usize, text: &str) -> Result<Patch, EditError> {
        self.apply(Cmd::insert(offset, text))
    }

    /// Like [`apply_insert`](Self::apply_insert), but inline spans ending at
    /// `offset` grow over the new text.
    pub fn apply_insert_sticky(&mut self, offset: usize, text: &str) -> Result<Patch, EditError> {
        self.apply(Cmd::InsertText {
            at: offset,
            text: text.to_string(),
            sticky: true,
        })
    }

    pub fn apply_delete(&mut self, start: usize, end: usize) -> Result<Patch, EditError> {
        self.apply(Cmd::delete(start..end))
    }

    fn try_apply(&mut self, cmd: &Cmd) -> Result<Patch, EditError> {
        let mut next = self.clone();
        let shift = match cmd {
            Cmd::InsertText { at, text, sticky } => transform::insert(&mut next, *at, text, *sticky)?,
            Cmd::DeleteRange { range } => transform::delete(&mut next, range.clone())?,
            Cmd::ReplaceRange { range, text } => transform::replace(&mut next, range.clone(), text)?,
        };
        self.commit(next, shift)
    }

    /// Add a span over `range` and return its id. A coalescable span that
    /// merges into an existing one returns the surviving id.
    pub fn add_span(
        &mut self,
        kind: FormatKind,
        range: Range<usize>,
        attributes: AttributeBag,
    ) -> Result<SpanId, EditError> {
        self.check_range(&range)?;
        let tag = kind.default_tag();
        let block = self.options.is_block_tag(&tag);
        let void = self.options.is_void_tag(&tag);
        if range.is_empty() && !(kind.is_coalescable() || kind == FormatKind::ListItem) {
            return Err(EditError::EmptySpanNotAllowed(if void {
                "void"
            } else if block {
                "block"
            } else {
                "element"
            }));
        }

        let mut next = self.clone();
        let id = next.ids.span();
        let span = FormatSpan {
            id,
            depth: next.ranges.depth_for(&range),
            seq: next.ids.seq(),
            kind,
            tag,
            start: range.start,
            end: range.end,
            attributes,
            block,
            void,
            self_closing: false,
        };
        next.ranges.insert(span);

        let (_, merged) = self.commit_tracking(next, Shift::default())?;
        Ok(merged
            .into_iter()
            .fold(id, |id, (kept, absorbed)| if absorbed == id { kept } else { id }))
    }

    pub fn remove_span(&mut self, id: SpanId) -> Result<FormatSpan, EditError> {
        let mut next = self.clone();
        let span = next.ranges.remove(id).ok_or(EditError::UnknownSpan(id))?;
        self.commit(next, Shift::default())?;
        Ok(span)
    }

    pub(super) fn commit(&mut self, next: Document, shift: Shift) -> Result<Patch, EditError> {
        self.commit_tracking(next, shift).map(|(patch, _)| patch)
    }

    /// Normalize `next`, check it and make it the current state.
    fn commit_tracking(
        &mut self,
        mut next: Document,
        shift: Shift,
    ) -> Result<(Patch, Vec<(SpanId, SpanId)>), EditError> {
        next.sort_markers();
        let anchored: HashSet<usize> = next.markers.iter().map(|m| m.offset).collect();
        let merged = next.ranges.coalesce(|offset| anchored.contains(&offset));
        next.placeholders
            .retain(|_, span| next.ranges.get(*span).is_some());
        snapshot::invariants(&next)?;

        next.version = self.version + 1;
        let patch = self.diff(&next, shift);
        *self = next;
        Ok((patch, merged))
    }

    fn diff(&self, next: &Document, shift: Shift) -> Patch {
        let mut spans = SpanDelta::default();
        for span in next.ranges.iter() {
            match self.ranges.get(span.id) {
                None => spans.added.push(span.id),
                Some(old)
                    if old.range() != span.range()
                        || old.depth != span.depth
                        || old.attributes != span.attributes =>
                {
                    spans.modified.push(span.id)
                }
                Some(_) => {}
            }
        }
        spans.removed = self
            .ranges
            .iter()
            .filter(|s| next.ranges.get(s.id).is_none())
            .map(|s| s.id)
            .collect();
        spans.added.sort_unstable();
        spans.removed.sort_unstable();
        spans.modified.sort_unstable();

        let mut markers = MarkerDelta::default();
        for old in &self.markers {
            match next.markers.iter().find(|m| m.id == old.id) {
                None => markers.removed.push(old.id),
                Some(m) if m.offset != old.offset => markers.moved.push(old.id),
                Some(_) => {}
            }
        }

        let changed = if shift.inserted > 0 {
            vec![shift.start..shift.start + shift.inserted]
        } else if shift.removed > 0 {
            vec![shift.start..shift.start]
        } else {
            Vec::new()
        };

        Patch {
            shift,
            changed,
            spans,
            markers,
            version: next.version,
        }
    }

    pub(crate) fn sort_markers(&mut self) {
        self.markers.sort_by_key(|m| (m.offset, m.seq));
    }

    fn check_range(&self, range: &Range<usize>) -> Result<(), OutOfRangeError> {
        let len = self.len();
        if range.start > range.end || range.end > len {
            return Err(OutOfRangeError {
                start: range.start,
                end: range.end,
                len,
            });
        }
        Ok(())
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn read(&self, range: Range<usize>) -> Result<String, OutOfRangeError> {
        self.buffer.read(range.start, range.end)
    }

    /// Text of the given lines, joined with `\n`. Lines past the end are
    /// skipped.
    pub fn text_at(&self, lines: Range<usize>) -> String {
        lines
            .filter_map(|line| self.buffer.line_range(line))
            .filter_map(|r| self.buffer.read(r.start, r.end).ok())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    /// True when the line holds only whitespace and object characters, or
    /// does not exist.
    pub fn is_line_blank(&self, line: usize) -> bool {
        let Some(range) = self.buffer.line_range(line) else {
            return true;
        };
        self.buffer
            .read(range.start, range.end)
            .map(|text| {
                text.chars()
                    .all(|c| c == OBJECT_REPLACEMENT || c.is_whitespace())
            })
            .unwrap_or(true)
    }

    /// All spans in document order.
    pub fn spans(&self) -> Vec<&FormatSpan> {
        self.ranges.sorted()
    }

    pub fn span(&self, id: SpanId) -> Option<&FormatSpan> {
        self.ranges.get(id)
    }

    /// Spans covering `offset`, outer to inner, including zero-length spans
    /// anchored there.
    pub fn spans_at(&self, offset: usize) -> Vec<&FormatSpan> {
        self.ranges.at(offset)
    }

    pub fn spans_overlapping(&self, range: Range<usize>) -> Vec<&FormatSpan> {
        self.ranges.overlapping(&range)
    }

    pub fn markers(&self) -> &[CommentMarker] {
        &self.markers
    }

    /// Items of the list `list`, in order.
    pub fn list_items(&self, list: SpanId) -> Vec<SpanId> {
        let mut items: Vec<&FormatSpan> = self
            .ranges
            .iter()
            .filter(|s| s.is_list_item() && self.enclosing_list(s.id) == Some(list))
            .collect();
        items.sort_by_key(|s| (s.start, s.seq));
        items.into_iter().map(|s| s.id).collect()
    }

    /// The innermost list containing the item `item`.
    pub fn enclosing_list(&self, item: SpanId) -> Option<SpanId> {
        let item = self.ranges.get(item)?;
        self.ranges
            .iter()
            .filter(|s| s.is_list() && s.depth < item.depth && s.covers(&item.range()))
            .max_by_key(|s| (s.depth, s.seq))
            .map(|s| s.id)
    }

    /// Incremented by every committed edit.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }
}
