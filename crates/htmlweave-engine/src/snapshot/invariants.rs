use crate::buffer::OBJECT_REPLACEMENT;
use crate::editing::Document;
use crate::error::InvariantViolation;
use crate::model::FormatSpan;

fn violation(rule: &'static str, detail: String) -> Result<(), InvariantViolation> {
    Err(InvariantViolation { rule, detail })
}

/// Verify the model invariants that every committed edit must preserve.
pub fn check(doc: &Document) -> Result<(), InvariantViolation> {
    let len = doc.len();
    let chars = doc.buffer.chars();

    for s in doc.ranges.iter() {
        if s.start > s.end || s.end > len {
            return violation(
                "span-bounds",
                format!("{:?} <{}> {}..{} (len {len})", s.id, s.tag, s.start, s.end),
            );
        }
        if s.void && (s.len() != 1 || chars.get(s.start) != Some(&OBJECT_REPLACEMENT)) {
            return violation(
                "void-object",
                format!("{:?} <{}> {}..{}", s.id, s.tag, s.start, s.end),
            );
        }
        if s.is_list_item() && doc.enclosing_list(s.id).is_none() {
            return violation(
                "list-item-container",
                format!("{:?} {}..{} has no enclosing list", s.id, s.start, s.end),
            );
        }
    }

    // Blocks sit on whole lines: the text around them is a separator, the
    // document edge, or the matching edge of an enclosing block.
    let shares_edge = |s: &FormatSpan, edge: fn(&FormatSpan) -> usize| {
        doc.ranges
            .iter()
            .any(|p| p.block && !p.void && p.depth < s.depth && edge(p) == edge(s))
    };
    for s in doc.ranges.iter().filter(|s| s.block) {
        let opens_line = s.start == 0
            || chars.get(s.start - 1) == Some(&'\n')
            || shares_edge(s, |p: &FormatSpan| p.start);
        let closes_line =
            s.end == len || chars.get(s.end) == Some(&'\n') || shares_edge(s, |p: &FormatSpan| p.end);
        if !opens_line || !closes_line {
            return violation(
                "block-boundary",
                format!("{:?} <{}> {}..{} shares a line", s.id, s.tag, s.start, s.end),
            );
        }
    }

    let edges = doc.ranges.block_edges();
    if let Some(i) = (0..len).find(|&i| edges.is_dangling(&chars, i)) {
        return violation(
            "separator",
            format!("block separator at {i} has nothing to separate"),
        );
    }

    let spans: Vec<_> = doc.ranges.iter().collect();
    for (i, a) in spans.iter().enumerate() {
        for b in &spans[i + 1..] {
            let overlapping = a.start < b.end && b.start < a.end;
            if a.can_coalesce_with(b) && overlapping {
                return violation(
                    "coalesced",
                    format!("{:?} and {:?} <{}> overlap", a.id, b.id, a.tag),
                );
            }
        }
    }

    for pair in doc.markers.windows(2) {
        if (pair[0].offset, pair[0].seq) > (pair[1].offset, pair[1].seq) {
            return violation(
                "marker-order",
                format!("{:?} after {:?}", pair[0].id, pair[1].id),
            );
        }
    }
    if let Some(m) = doc.markers.iter().find(|m| m.offset > len) {
        return violation(
            "marker-order",
            format!("{:?} at {} past end (len {len})", m.id, m.offset),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decoded_documents_pass() {
        for html in [
            "<p>a<img src=\"x\">b</p>",
            "<ul><li></li><li>b</li></ul>",
            "<!-- wp:list --><ul><li>a</li></ul><!-- /wp:list -->",
            "a<ul><li></li><li></li><li a=\"1\">1</li><li></li><li></li></ul>b",
            "<p>a</p><hr><p>b</p><br>",
            "<div><p></p><p>b</p></div><b><p>c</p></b>",
            "<ul><li>a<ul><li>b</li></ul></li></ul>",
        ] {
            assert_eq!(check(&Document::decode(html).unwrap()), Ok(()));
        }
    }

    #[test]
    fn void_span_must_cover_object_character() {
        let mut doc = Document::decode("<p>a<img src=\"x\">b</p>").unwrap();
        doc.buffer = "a b".into();
        assert_eq!(check(&doc).unwrap_err().rule, "void-object");
    }

    #[test]
    fn spans_must_stay_in_bounds() {
        let mut doc = Document::decode("<b>abc</b>").unwrap();
        doc.buffer = "ab".into();
        assert_eq!(check(&doc).unwrap_err().rule, "span-bounds");
    }

    #[test]
    fn blocks_must_own_their_lines() {
        let mut doc = Document::decode("<p>a</p><p>b</p>").unwrap();
        doc.buffer = "a b".into();
        assert_eq!(check(&doc).unwrap_err().rule, "block-boundary");
    }

    #[test]
    fn separators_must_separate() {
        let mut doc = Document::decode("<p>a</p>b").unwrap();
        doc.buffer = "a\n ".into();
        assert_eq!(check(&doc), Ok(()));
        doc.buffer = "a\n".into();
        assert_eq!(check(&doc).unwrap_err().rule, "separator");
    }

    #[test]
    fn markers_must_be_ordered() {
        let mut doc = Document::decode("a<!--x-->b<!--y-->").unwrap();
        doc.markers.swap(0, 1);
        assert_eq!(check(&doc).unwrap_err().rule, "marker-order");
    }
}
