//! Document → canonical HTML.
//!
//! The encoder walks the text offset by offset. At each offset it closes
//! the spans that end there, emits zero-width items (comments and empty
//! elements) in document order, opens the spans that start there and then
//! writes the character.
//!
//! Spans may overlap in the model while HTML must nest. When a span closes
//! while spans opened inside it are still live, those are closed with it and
//! reopened right after ("suspended").

use std::collections::{BTreeMap, HashSet};

use crate::buffer::OBJECT_REPLACEMENT;
use crate::editing::Document;
use crate::model::{BlockEdges, CommentMarker, FormatSpan};

#[derive(Clone, Copy)]
enum ZeroWidth<'a> {
    Marker(&'a CommentMarker),
    Span(&'a FormatSpan),
}

impl ZeroWidth<'_> {
    fn seq(&self) -> u64 {
        match self {
            Self::Marker(m) => m.seq,
            Self::Span(s) => s.seq,
        }
    }

    fn depth(&self) -> u32 {
        match self {
            Self::Marker(m) => m.depth,
            Self::Span(s) => s.depth,
        }
    }
}

/// An open event: where it happens, how deep, and its place in sequence.
#[derive(Clone, Copy)]
struct Event {
    seq: u64,
    depth: u32,
    offset: usize,
}

pub fn encode(doc: &Document) -> String {
    let html = Encoder::new(doc).run();
    log::debug!(
        "encoded {} chars, {} spans, {} markers into {} bytes",
        doc.len(),
        doc.ranges.len(),
        doc.markers.len(),
        html.len()
    );
    html
}

struct Encoder<'a> {
    doc: &'a Document,
    chars: Vec<char>,
    out: String,
    run: String,
    stack: Vec<&'a FormatSpan>,
    pending: Vec<&'a FormatSpan>,
    opens: BTreeMap<usize, Vec<&'a FormatSpan>>,
    zero_width: BTreeMap<usize, Vec<ZeroWidth<'a>>>,
    /// Every open event, sorted by seq
    events: Vec<Event>,
    edges: BlockEdges,
    void_starts: HashSet<usize>,
}

impl<'a> Encoder<'a> {
    fn new(doc: &'a Document) -> Self {
        let mut opens: BTreeMap<usize, Vec<&FormatSpan>> = BTreeMap::new();
        let mut zero_width: BTreeMap<usize, Vec<ZeroWidth<'_>>> = BTreeMap::new();
        let mut events = Vec::new();
        let mut void_starts = HashSet::new();

        for span in doc.ranges.iter() {
            if span.is_empty() {
                zero_width
                    .entry(span.start)
                    .or_default()
                    .push(ZeroWidth::Span(span));
            } else {
                opens.entry(span.start).or_default().push(span);
            }
            if span.void {
                void_starts.insert(span.start);
            }
            events.push(Event {
                seq: span.seq,
                depth: span.depth,
                offset: span.start,
            });
        }
        for marker in &doc.markers {
            zero_width
                .entry(marker.offset)
                .or_default()
                .push(ZeroWidth::Marker(marker));
            events.push(Event {
                seq: marker.seq,
                depth: marker.depth,
                offset: marker.offset,
            });
        }
        for items in zero_width.values_mut() {
            items.sort_by_key(|z| z.seq());
        }
        events.sort_unstable_by_key(|e| e.seq);

        Self {
            doc,
            chars: doc.buffer.chars(),
            out: String::new(),
            run: String::new(),
            stack: Vec::new(),
            pending: Vec::new(),
            opens,
            zero_width,
            events,
            edges: doc.ranges.block_edges(),
            void_starts,
        }
    }

    fn run(mut self) -> String {
        let len = self.chars.len();
        for p in 0..=len {
            let zw = self.zero_width.remove(&p).unwrap_or_default();

            self.close_where(p, |enc, s| s.end <= p && !enc.holds_zero_width(s, &zw));

            if let Some(starting) = self.opens.remove(&p) {
                self.pending.extend(starting);
            }
            self.pending.retain(|s| s.end > p);
            let separator = p < len && self.is_separator(p);

            for z in &zw {
                self.open_pending(p, separator, Some(z.seq()));
                let depth = z.depth();
                self.close_where(p, |_, s| s.end == p && s.depth >= depth);
                match *z {
                    ZeroWidth::Marker(m) => {
                        self.flush();
                        self.out.push_str("<!--");
                        self.out.push_str(&m.text);
                        self.out.push_str("-->");
                    }
                    ZeroWidth::Span(s) => self.open(s, p),
                }
            }

            self.close_where(p, |_, s| s.end <= p);
            if p == len {
                break;
            }
            self.open_pending(p, separator, None);
            self.emit_char(p, separator);
        }
        self.flush();
        self.out
    }

    /// A span ending at `p` stays open while a zero-width item at `p` sits
    /// inside it. An empty list item always sits inside its own list; for
    /// anything else the item must be deeper and later, with no
    /// sibling-or-shallower element opened in between.
    fn holds_zero_width(&self, span: &FormatSpan, zw: &[ZeroWidth<'_>]) -> bool {
        zw.iter().any(|z| {
            let member = matches!(z, ZeroWidth::Span(item)
                if item.is_list_item() && self.doc.enclosing_list(item.id) == Some(span.id));
            if member {
                return true;
            }
            z.depth() > span.depth
                && z.seq() > span.seq
                && !self.opened_between(span, z.seq())
        })
    }

    /// Whether an element at or above `span`'s depth opened after `span` and
    /// before `before`. Events placed ahead of `span` in the text cannot be
    /// between the two.
    fn opened_between(&self, span: &FormatSpan, before: u64) -> bool {
        let from = self.events.partition_point(|e| e.seq <= span.seq);
        self.events[from..]
            .iter()
            .take_while(|e| e.seq < before)
            .any(|e| e.depth <= span.depth && e.offset >= span.start)
    }

    fn is_separator(&self, p: usize) -> bool {
        self.edges.is_separator(&self.chars, p)
    }

    fn in_preformatted(&self) -> bool {
        self.stack
            .iter()
            .any(|s| self.doc.options.is_preformatted(&s.tag))
    }

    /// Opens pending spans, blocks first, then in `(depth, seq)` order. With
    /// `before_seq`, only spans that precede that zero-width item are opened.
    /// At separators only blocks open; the rest wait for the next offset.
    fn open_pending(&mut self, p: usize, separator: bool, before_seq: Option<u64>) {
        loop {
            self.pending.sort_by_key(|s| (!s.block, s.depth, s.seq));
            let next = self.pending.iter().position(|s| {
                (!separator || s.block) && before_seq.is_none_or(|limit| s.seq < limit)
            });
            let Some(i) = next else {
                break;
            };
            let span = self.pending.remove(i);
            self.open(span, p);
        }
    }

    fn open(&mut self, span: &'a FormatSpan, p: usize) {
        if let Some(i) = self.stack.iter().position(|s| s.depth > span.depth) {
            self.close_from(i, p);
        }
        self.flush();
        self.out.push('<');
        self.out.push_str(&span.tag);
        self.out.push_str(&span.attributes.to_html());
        if span.void && span.self_closing {
            self.out.push_str(" />");
        } else {
            self.out.push('>');
        }
        self.stack.push(span);
    }

    /// Repeatedly closes the innermost stack span matching `pred`.
    fn close_where(&mut self, p: usize, pred: impl Fn(&Self, &FormatSpan) -> bool) {
        while let Some(i) = self.stack.iter().rposition(|s| pred(self, *s)) {
            self.close_from(i, p);
        }
    }

    /// Closes `stack[i..]`, innermost first. Spans above `i` that continue
    /// past `p` are queued to reopen.
    fn close_from(&mut self, i: usize, p: usize) {
        while self.stack.len() > i {
            let Some(span) = self.stack.pop() else {
                break;
            };
            self.flush();
            if !span.void {
                self.out.push_str("</");
                self.out.push_str(&span.tag);
                self.out.push('>');
            }
            if self.stack.len() > i && span.end > p {
                self.pending.push(span);
            }
        }
    }

    fn emit_char(&mut self, p: usize, separator: bool) {
        let c = self.chars[p];
        if separator {
            return;
        }
        if c == OBJECT_REPLACEMENT && self.void_starts.contains(&p) {
            return;
        }
        if c == '\n' && !self.in_preformatted() {
            self.flush();
            self.out.push_str("<br>");
            return;
        }
        self.run.push(c);
    }

    fn flush(&mut self) {
        if !self.run.is_empty() {
            self.out.push_str(&html_escape::encode_text(&self.run));
            self.run.clear();
        }
    }
}
