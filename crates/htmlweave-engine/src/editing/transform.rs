//! Keeps spans and markers consistent with buffer edits.
//!
//! Every transform mutates a working copy of the document; the caller checks
//! invariants and commits.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use crate::buffer::Shift;
use crate::editing::Document;
use crate::error::EditError;
use crate::model::{AttributeBag, FormatKind, FormatSpan, MarkerId, SpanId, pair_delimiters};

/// Whether a span takes in text inserted at `at`.
fn grows(span: &FormatSpan, at: usize, sticky: bool) -> bool {
    if span.void {
        return false;
    }
    if span.block {
        return span.start <= at && at <= span.end;
    }
    if span.is_empty() {
        return span.start == at && span.kind.is_coalescable();
    }
    span.start < at && (at < span.end || (at == span.end && sticky))
}

pub(crate) fn insert(
    doc: &mut Document,
    at: usize,
    text: &str,
    sticky: bool,
) -> Result<Shift, EditError> {
    if text == "\n" {
        if let Some(item) = trailing_empty_item(doc, at) {
            return exit_list(doc, item, at);
        }
    }
    insert_text(doc, at, text, sticky)
}

fn insert_text(
    doc: &mut Document,
    at: usize,
    text: &str,
    sticky: bool,
) -> Result<Shift, EditError> {
    let text = pad_void_blocks(doc, at, text);
    let shift = doc.buffer.insert(at, &text)?;
    let n = shift.inserted;
    if n == 0 {
        return Ok(shift);
    }

    // (depth, seq) of spans that ended at `at` and grew over the new text
    let mut grown_at_end: Vec<(u32, u64)> = Vec::new();
    for span in doc.ranges.iter_mut() {
        if grows(span, at, sticky) {
            if span.end == at {
                grown_at_end.push((span.depth, span.seq));
            }
            span.end += n;
        } else if span.start >= at {
            span.start += n;
            span.end += n;
        }
    }

    for marker in &mut doc.markers {
        let follows_grown = grown_at_end
            .iter()
            .any(|&(depth, seq)| depth >= marker.depth && seq < marker.seq);
        if marker.offset > at || (marker.offset == at && follows_grown) {
            marker.offset += n;
        }
    }

    for (i, c) in text.chars().enumerate() {
        if c == '\n' {
            split_list_item(doc, at + i, at, n);
        }
    }

    log::trace!("insert {shift:?}");
    Ok(shift)
}

/// A void block such as `<hr>` owns its line, so text typed against it is
/// moved onto a line of its own.
fn pad_void_blocks(doc: &Document, at: usize, text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let void_block = |edge: fn(&FormatSpan) -> usize| {
        doc.ranges
            .iter()
            .any(|s| s.void && s.block && edge(s) == at)
    };
    let mut padded = String::with_capacity(text.len() + 2);
    if void_block(|s: &FormatSpan| s.end) {
        padded.push('\n');
    }
    padded.push_str(text);
    if void_block(|s: &FormatSpan| s.start) {
        padded.push('\n');
    }
    padded
}

/// The empty last item of a list with at least one other item, sitting at
/// `at` on a line of its own.
fn trailing_empty_item(doc: &Document, at: usize) -> Option<SpanId> {
    if at == 0 || doc.buffer.char_at(at - 1) != Some('\n') {
        return None;
    }
    let item = doc
        .ranges
        .iter()
        .filter(|s| s.is_list_item() && s.is_empty() && s.start == at)
        .max_by_key(|s| (s.depth, s.seq))?;
    let list = doc.enclosing_list(item.id)?;
    let items = doc.list_items(list);
    (items.len() > 1 && items.last() == Some(&item.id)).then_some(item.id)
}

/// Enter on an empty last item leaves the list: the item goes away together
/// with the separator in front of it, and the newline is not inserted.
fn exit_list(doc: &mut Document, item: SpanId, at: usize) -> Result<Shift, EditError> {
    doc.ranges.remove(item);
    log::debug!("newline in empty last item {item:?} at {at} exits the list");
    delete(doc, at - 1..at)
}

/// Splits the innermost list item containing the newline at `q`.
///
/// The half holding the item's pre-existing text keeps its attributes; the
/// other half is a fresh, unattributed item. When the insert landed at the
/// item's very start, the fresh item goes before it. Blocks nested in the
/// item and inline spans crossing the newline are split along with it.
fn split_list_item(doc: &mut Document, q: usize, at: usize, inserted: usize) {
    let Some(item) = doc
        .ranges
        .iter()
        .filter(|s| s.is_list_item() && s.start <= q && q < s.end)
        .max_by_key(|s| (s.depth, s.seq))
    else {
        return;
    };
    let (id, start, end, depth, seq) = (item.id, item.start, item.end, item.depth, item.seq);
    let tag = item.tag.clone();
    if touches_nested_block(doc, depth, start, q, end) {
        log::trace!("newline at {q} stays a line break in item {id:?}");
        return;
    }
    let fresh_first = start >= at && end > at + inserted;

    let fresh = FormatSpan {
        id: doc.ids.span(),
        kind: FormatKind::ListItem,
        tag,
        start: if fresh_first { start } else { q + 1 },
        end: if fresh_first { q } else { end },
        attributes: AttributeBag::new(),
        depth,
        seq: doc.ids.seq(),
        block: true,
        void: false,
        self_closing: false,
    };
    let fresh_id = fresh.id;
    if let Some(item) = doc.ranges.get_mut(id) {
        if fresh_first {
            item.start = q + 1;
        } else {
            item.end = q;
        }
    }
    log::trace!(
        "split item {id:?} at {q}: fresh {fresh_id:?} {}..{}",
        fresh.start,
        fresh.end
    );
    doc.ranges.insert(fresh);

    // Comments at the top of the old item stay with its content.
    if fresh_first {
        for marker in doc
            .markers
            .iter_mut()
            .filter(|m| m.offset == start && m.depth > depth && m.seq > seq)
        {
            marker.offset = q + 1;
        }
    }

    let mut crossing: Vec<&FormatSpan> = doc
        .ranges
        .iter()
        .filter(|s| !s.void && s.start <= q && q < s.end && (!s.block || s.depth > depth))
        .collect();
    crossing.sort_by_key(|s| (s.depth, s.seq));
    let crossing: Vec<SpanId> = crossing.into_iter().map(|s| s.id).collect();

    let mut tails = Vec::new();
    for span_id in crossing {
        let Some(span) = doc.ranges.get_mut(span_id) else {
            continue;
        };
        if span.start == q {
            span.start = q + 1;
        } else if span.end == q + 1 {
            span.end = q;
        } else {
            let mut tail = span.clone();
            span.end = q;
            tail.id = doc.ids.span();
            tail.start = q + 1;
            tails.push(Event::Span(tail.id));
            doc.ranges.insert(tail);
        }
    }

    if fresh_first {
        place_before(doc, &[Event::Span(fresh_id)], |e| e.seq >= seq);
        let item_seq = doc.ranges.get(id).map_or(seq, |s| s.seq);
        place_before(doc, &tails, |e| e.seq > item_seq && e.offset > q);
    } else {
        let moving: Vec<Event> = std::iter::once(Event::Span(fresh_id)).chain(tails).collect();
        place_before(doc, &moving, |e| e.seq > seq && e.offset > q);
    }
}

/// Whether the newline at `q` falls right against a block nested in the
/// item. Splitting there would leave a half that opens or closes on a
/// separator, which HTML cannot express, so the newline stays a line break.
fn touches_nested_block(doc: &Document, depth: u32, start: usize, q: usize, end: usize) -> bool {
    let newline_at = |i: usize| doc.buffer.char_at(i) == Some('\n');
    let nested = |s: &FormatSpan| s.block && s.depth > depth;
    let head = q > start
        && newline_at(q - 1)
        && doc.ranges.iter().any(|s| nested(s) && s.end == q - 1);
    let tail = q + 1 < end
        && newline_at(q + 1)
        && doc.ranges.iter().any(|s| nested(s) && s.start == q + 2);
    head || tail
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Event {
    Span(SpanId),
    Marker(MarkerId),
}

/// An open event as seen by [`place_before`].
#[derive(Debug, Clone, Copy)]
struct Placed {
    seq: u64,
    offset: usize,
    event: Event,
}

/// Renumbers the open-event sequence so that `moving`, in the given order,
/// comes right before the first other event matching `before`, or last when
/// none does.
///
/// The encoder orders zero-width items and same-offset openings by
/// sequence, so a span created mid-document must take the place its
/// elements have in the HTML.
fn place_before(doc: &mut Document, moving: &[Event], before: impl Fn(&Placed) -> bool) {
    if moving.is_empty() {
        return;
    }
    let mut order: Vec<Placed> = doc
        .ranges
        .iter()
        .map(|s| Placed {
            seq: s.seq,
            offset: s.start,
            event: Event::Span(s.id),
        })
        .chain(doc.markers.iter().map(|m| Placed {
            seq: m.seq,
            offset: m.offset,
            event: Event::Marker(m.id),
        }))
        .filter(|p| !moving.contains(&p.event))
        .collect();
    order.sort_unstable_by_key(|p| p.seq);
    let split = order.iter().position(&before).unwrap_or(order.len());

    let renumbered: HashMap<Event, u64> = order[..split]
        .iter()
        .map(|p| p.event)
        .chain(moving.iter().copied())
        .chain(order[split..].iter().map(|p| p.event))
        .zip(1..)
        .collect();
    for span in doc.ranges.iter_mut() {
        if let Some(seq) = renumbered.get(&Event::Span(span.id)) {
            span.seq = *seq;
        }
    }
    for marker in &mut doc.markers {
        if let Some(seq) = renumbered.get(&Event::Marker(marker.id)) {
            marker.seq = *seq;
        }
    }
    doc.ids.restart_seq(renumbered.len() as u64);
}

pub(crate) fn delete(doc: &mut Document, range: Range<usize>) -> Result<Shift, EditError> {
    let shift = remove_range(doc, range)?;
    Ok(drop_dangling_separators(doc, shift))
}

/// Delete `range`, then insert `text` where it was.
pub(crate) fn replace(
    doc: &mut Document,
    range: Range<usize>,
    text: &str,
) -> Result<Shift, EditError> {
    let removed = remove_range(doc, range.clone())?;
    let inserted = insert_text(doc, range.start, text, false)?;
    let shift = Shift {
        start: range.start,
        removed: removed.removed,
        inserted: inserted.inserted,
    };
    Ok(drop_dangling_separators(doc, shift))
}

fn remove_range(doc: &mut Document, range: Range<usize>) -> Result<Shift, EditError> {
    let (a, b) = (range.start, range.end);
    let shift = doc.buffer.delete(a, b)?;
    if a == b {
        return Ok(shift);
    }

    // Classification happens in pre-edit coordinates.
    doc.sort_markers();
    let doomed_pairs: Vec<(usize, usize, Vec<usize>)> = pair_delimiters(&doc.markers)
        .into_iter()
        .filter_map(|(open, close)| {
            let open = doc.markers.iter().position(|m| m.id == open)?;
            let close = doc.markers.iter().position(|m| m.id == close)?;
            let (from, to) = (doc.markers[open].offset, doc.markers[close].offset);
            (a <= from && from < to && to <= b).then_some((from, to, vec![open, close]))
        })
        .collect();
    let in_pair_region: HashSet<SpanId> = doc
        .ranges
        .iter()
        .filter(|s| {
            doomed_pairs
                .iter()
                .any(|(from, to, _)| *from <= s.start && s.end <= *to)
        })
        .map(|s| s.id)
        .collect();

    let joins_block = |s: &FormatSpan| s.block && !s.void;
    let upper: Vec<SpanId> = doc
        .ranges
        .iter()
        .filter(|s| joins_block(s) && s.start <= a && a <= s.end && s.end < b)
        .map(|s| s.id)
        .collect();
    let lower: Vec<SpanId> = doc
        .ranges
        .iter()
        .filter(|s| joins_block(s) && a < s.start && s.start <= b)
        .map(|s| s.id)
        .collect();

    doc.ranges.retain(|s| {
        let inside = a <= s.start && s.end <= b;
        if s.void {
            return !inside;
        }
        if s.block {
            return true;
        }
        if s.is_empty() {
            return !(a < s.start && s.start < b);
        }
        !inside
    });
    for span in doc.ranges.iter_mut() {
        span.start = shift.map(span.start);
        span.end = shift.map(span.end);
    }

    join_blocks(doc, a, &upper, &lower);

    let doomed_markers: HashSet<usize> = doomed_pairs
        .iter()
        .flat_map(|(_, _, idx)| idx.iter().copied())
        .collect();
    let mut index = 0;
    doc.markers.retain(|m| {
        let keep = !doomed_markers.contains(&index) && !(a < m.offset && m.offset < b);
        index += 1;
        keep
    });
    for marker in &mut doc.markers {
        marker.offset = shift.map(marker.offset);
    }

    if !doomed_pairs.is_empty() {
        doc.ranges
            .retain(|s| !(in_pair_region.contains(&s.id) && s.is_empty()));
    }

    log::trace!(
        "delete {shift:?}: joined {} upper / {} lower blocks, dropped {} delimiter pairs",
        upper.len(),
        lower.len(),
        doomed_pairs.len()
    );
    Ok(shift)
}

/// Deleting a block separator merges the line below into the block above.
fn join_blocks(doc: &mut Document, a: usize, upper: &[SpanId], lower: &[SpanId]) {
    if upper.is_empty() && lower.is_empty() {
        return;
    }
    let chars = doc.buffer.chars();

    if !upper.is_empty() {
        let line_end = chars[a..]
            .iter()
            .position(|&c| c == '\n')
            .map_or(chars.len(), |i| a + i);
        for id in upper {
            if let Some(span) = doc.ranges.get_mut(*id) {
                span.end = span.end.max(line_end);
            }
        }
        for id in lower.iter().filter(|id| !upper.contains(id)) {
            let Some(span) = doc.ranges.get_mut(*id) else {
                continue;
            };
            span.start = line_end + 1;
            if span.start > span.end {
                doc.ranges.remove(*id);
            }
        }
    } else {
        let line_start = chars[..a]
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |i| i + 1);
        for id in lower {
            if let Some(span) = doc.ranges.get_mut(*id) {
                span.start = span.start.min(line_start);
            }
        }
    }
}

/// Removes separators left with nothing to separate next to the edited
/// region (`shift.start` up to the inserted text's end), widening `shift`
/// to cover them.
fn drop_dangling_separators(doc: &mut Document, mut shift: Shift) -> Shift {
    loop {
        let chars = doc.buffer.chars();
        let edges = doc.ranges.block_edges();
        let (lo, hi) = (shift.start, shift.start + shift.inserted);
        let doomed = if lo > 0 && edges.is_dangling(&chars, lo - 1) {
            lo - 1
        } else if edges.is_dangling(&chars, hi) {
            hi
        } else {
            break;
        };
        if remove_char(doc, doomed).is_err() {
            break;
        }
        log::trace!("dropped dangling separator at {doomed}");
        if doomed < lo {
            shift.start -= 1;
        }
        shift.removed += 1;
    }
    shift
}

fn remove_char(doc: &mut Document, at: usize) -> Result<(), EditError> {
    let shift = doc.buffer.delete(at, at + 1)?;
    doc.ranges
        .retain(|s| s.block || !(s.start == at && s.end == at + 1));
    for span in doc.ranges.iter_mut() {
        span.start = shift.map(span.start);
        span.end = shift.map(span.end);
    }
    for marker in &mut doc.markers {
        marker.offset = shift.map(marker.offset);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn after_insert(html: &str, at: usize, text: &str) -> String {
        let mut doc = Document::decode(html).unwrap();
        doc.apply_insert(at, text).unwrap();
        doc.encode()
    }

    fn after_delete(html: &str, range: Range<usize>) -> String {
        let mut doc = Document::decode(html).unwrap();
        doc.apply_delete(range.start, range.end).unwrap();
        doc.encode()
    }

    #[rstest]
    #[case("<b>bold</b>", 2, "X", "<b>boXld</b>")]
    #[case("<b>bold</b>", 4, "X", "<b>bold</b>X")]
    #[case("<b>bold</b>", 0, "X", "X<b>bold</b>")]
    #[case("<p>para</p>", 4, "X", "<p>paraX</p>")]
    #[case("<p>para</p>", 0, "X", "<p>Xpara</p>")]
    #[case("<p>a</p><p>b</p>", 2, "X", "<p>a</p><p>Xb</p>")]
    #[case("<p>a<img src=\"i\">b</p>", 2, "X", "<p>a<img src=\"i\">Xb</p>")]
    #[case("<p>a<!--c--></p>", 1, "X", "<p>a<!--c-->X</p>")]
    #[case("<b>a</b><!--c-->", 1, "X", "<b>a</b><!--c-->X")]
    fn insert_placement(
        #[case] html: &str,
        #[case] at: usize,
        #[case] text: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(after_insert(html, at, text), expected);
    }

    #[test]
    fn sticky_insert_extends_inline_span() {
        let mut doc = Document::decode("<b>bold</b>").unwrap();
        doc.apply(crate::Cmd::InsertText {
            at: 4,
            text: "er".into(),
            sticky: true,
        })
        .unwrap();
        assert_eq!(doc.encode(), "<b>bolder</b>");
    }

    #[test]
    fn typing_into_empty_element_fills_it() {
        assert_eq!(
            after_insert("<ul><li></li></ul>", 0, "x"),
            "<ul><li>x</li></ul>"
        );
        assert_eq!(after_insert("<p><b></b></p>", 0, "x"), "<p><b>x</b></p>");
    }

    #[test]
    fn closing_delimiter_follows_grown_list() {
        assert_eq!(
            after_insert(
                "<!-- wp:list --><ul><li></li></ul><!-- /wp:list -->",
                0,
                "x"
            ),
            "<!-- wp:list --><ul><li>x</li></ul><!-- /wp:list -->"
        );
    }

    #[test]
    fn newline_splits_item_and_inline_formatting() {
        assert_eq!(
            after_insert("<ul><li>a<b>bc</b>d</li></ul>", 2, "\n"),
            "<ul><li>a<b>b</b></li><li><b>c</b>d</li></ul>"
        );
    }

    #[test]
    fn newline_at_item_start_puts_fresh_item_first() {
        assert_eq!(
            after_insert("<ol><li a=\"1\">Ordered</li><li>after</li></ol>", 0, "\n"),
            "<ol><li></li><li a=\"1\">Ordered</li><li>after</li></ol>"
        );
    }

    #[test]
    fn newline_outside_lists_is_a_line_break() {
        assert_eq!(after_insert("<p>ab</p>", 1, "\n"), "<p>a<br>b</p>");
    }

    #[rstest]
    #[case("<b>bold</b>", 1..3, "<b>bd</b>")]
    #[case("x<b>bold</b>y", 1..5, "xy")]
    #[case("<b>bo</b><i>it</i>", 1..3, "<b>b</b><i>t</i>")]
    #[case("<p>a<img src=\"i\">b</p>", 1..2, "<p>ab</p>")]
    #[case("<p>a<!--c-->b</p>", 0..2, "<p></p>")]
    #[case("<p>a<!--c-->b</p>", 1..2, "<p>a<!--c--></p>")]
    fn delete_spans_and_markers(
        #[case] html: &str,
        #[case] range: Range<usize>,
        #[case] expected: &str,
    ) {
        assert_eq!(after_delete(html, range), expected);
    }

    #[rstest]
    #[case("<p>ab</p><p>cd</p>", 2..3, "<p>abcd</p>")]
    #[case("<p>ab</p><p>cd</p>", 1..4, "<p>ad</p>")]
    #[case("<p>ab</p><p>cd</p>", 0..3, "<p>cd</p>")]
    #[case("<ul><li>a</li><li>b</li></ul>", 1..2, "<ul><li>ab</li></ul>")]
    #[case("<ul><li>a</li></ul><ul><li>b</li></ul>", 1..2, "<ul><li>ab</li></ul>")]
    #[case("<p>a</p><p>b<br>c</p>", 1..2, "<p>ab</p><p>c</p>")]
    #[case("x<p>y</p>", 1..2, "<p>xy</p>")]
    #[case(
        "<p>x</p><blockquote><p>a</p><p>b</p></blockquote>",
        1..2,
        "<p>xa</p><blockquote><p>b</p></blockquote>"
    )]
    fn delete_joins_blocks(
        #[case] html: &str,
        #[case] range: Range<usize>,
        #[case] expected: &str,
    ) {
        assert_eq!(after_delete(html, range), expected);
    }

    #[test]
    fn deleting_item_text_keeps_the_item() {
        assert_eq!(
            after_delete("<ul><li a=\"A\">a</li><li>b</li></ul>", 0..1),
            "<ul><li a=\"A\"></li><li>b</li></ul>"
        );
    }

    #[test]
    fn deleting_a_whole_delimited_block_drops_its_comments() {
        assert_eq!(
            after_delete(
                "<!-- wp:paragraph --><p>a</p><!-- /wp:paragraph --><!-- wp:list --><ul><li>b</li></ul><!-- /wp:list -->",
                1..3
            ),
            "<!-- wp:paragraph --><p>a</p><!-- /wp:paragraph -->"
        );
    }

    #[rstest]
    #[case::delimited_list(
        "<!-- wp:list --><ul><li>item 1</li><li>item2</li></ul><!-- /wp:list -->",
        12,
        "<!-- wp:list --><ul><li>item 1</li><li>item2</li><li></li></ul><!-- /wp:list -->"
    )]
    #[case::list_before_paragraph(
        "<ul><li>a</li></ul><p>b</p>",
        1,
        "<ul><li>a</li><li></li></ul><p>b</p>"
    )]
    fn newline_at_item_end_adds_an_item_inside_the_list(
        #[case] html: &str,
        #[case] at: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(after_insert(html, at, "\n"), expected);
    }

    #[rstest]
    #[case::paragraph_in_item(
        "<ul><li><p>abc</p></li></ul>",
        1,
        "<ul><li><p>a</p></li><li><p>bc</p></li></ul>"
    )]
    #[case::delimited_heading_in_item(
        "<ul><li><!-- wp:x --><h2>abc</h2><!-- /wp:x --></li><li></li></ul>",
        0,
        "<ul><li></li><li><!-- wp:x --><h2>abc</h2><!-- /wp:x --></li><li></li></ul>"
    )]
    fn newline_splits_blocks_nested_in_the_item(
        #[case] html: &str,
        #[case] at: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(after_insert(html, at, "\n"), expected);
    }

    #[test]
    fn newline_against_a_nested_block_stays_a_line_break() {
        assert_eq!(
            after_insert("<ul><li><p>a</p><p>b</p></li></ul>", 1, "\n"),
            "<ul><li><p>a<br></p><p>b</p></li></ul>"
        );
    }

    #[test]
    fn newline_in_empty_last_item_leaves_the_list() {
        let mut doc =
            Document::decode("<!-- wp:list --><ul><li>a</li><li></li></ul><!-- /wp:list -->")
                .unwrap();
        let patch = doc.apply_insert(2, "\n").unwrap();
        assert_eq!(
            doc.encode(),
            "<!-- wp:list --><ul><li>a</li></ul><!-- /wp:list -->"
        );
        assert_eq!(doc.text(), "a");
        assert_eq!(
            patch.shift,
            Shift {
                start: 1,
                removed: 1,
                inserted: 0
            }
        );
    }

    #[test]
    fn newline_in_a_lone_empty_item_splits_it() {
        assert_eq!(
            after_insert("<ul><li>a</li></ul><ul><li></li></ul>", 2, "\n"),
            "<ul><li>a</li></ul><ul><li></li><li></li></ul>"
        );
    }

    #[test]
    fn text_typed_against_a_rule_gets_its_own_line() {
        let mut doc = Document::decode("<p>a</p><hr><p>b</p>").unwrap();
        let patch = doc.apply_insert(3, "x").unwrap();
        assert_eq!(doc.encode(), "<p>a</p><hr>x<p>b</p>");
        assert_eq!(patch.shift.inserted, 2);
        assert_eq!(after_insert("<p>a</p><hr><p>b</p>", 2, "x"), "<p>a</p>x<hr><p>b</p>");
    }

    #[rstest]
    #[case::plain_line_after_paragraph("<p>a</p>b", 2..3, "<p>a</p>")]
    #[case::plain_line_before_paragraph("a<p>b</p>", 0..1, "<p>b</p>")]
    #[case::plain_line_after_list("<ul><li>a</li></ul>b", 2..3, "<ul><li>a</li></ul>")]
    fn delete_drops_separators_left_with_nothing_to_separate(
        #[case] html: &str,
        #[case] range: Range<usize>,
        #[case] expected: &str,
    ) {
        let mut doc = Document::decode(html).unwrap();
        let patch = doc.apply_delete(range.start, range.end).unwrap();
        assert_eq!(doc.encode(), expected);
        assert_eq!(doc.len(), 1);
        assert_eq!(patch.shift.removed, 2);
    }

    #[test]
    fn replace_joins_then_types() {
        let mut doc = Document::decode("<p>ab</p><p>cd</p>").unwrap();
        doc.apply(crate::Cmd::ReplaceRange {
            range: 1..4,
            text: "X".into(),
        })
        .unwrap();
        assert_eq!(doc.encode(), "<p>aXd</p>");

        let mut doc = Document::decode("<p>a</p>b").unwrap();
        doc.apply(crate::Cmd::ReplaceRange {
            range: 2..3,
            text: String::new(),
        })
        .unwrap();
        assert_eq!(doc.encode(), "<p>a</p>");
    }
}
