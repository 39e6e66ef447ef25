use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MarkerId(pub u64);

/// An HTML comment anchored at a zero-width position in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentMarker {
    pub id: MarkerId,
    pub offset: usize,
    /// Comment body between `<!--` and `-->`, verbatim
    pub text: String,
    /// Number of elements open where the comment appeared
    pub depth: u32,
    pub seq: u64,
}

/// Classification of block-delimiter comments such as `<!-- wp:list -->`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockDelimiter {
    Open { name: String, attrs: Option<String> },
    Close { name: String },
    SelfContained { name: String, attrs: Option<String> },
}

static DELIMITER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*(/)?wp:([a-z][a-z0-9_-]*(?:/[a-z][a-z0-9_-]*)?)(?:\s+(.*?))?\s*(/)?\s*$")
        .expect("valid delimiter pattern")
});

impl CommentMarker {
    pub fn delimiter(&self) -> Option<BlockDelimiter> {
        let caps = DELIMITER.captures(&self.text)?;
        let name = caps.get(2)?.as_str().to_string();
        let attrs = caps
            .get(3)
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty());
        let closing = caps.get(1).is_some();
        let self_contained = caps.get(4).is_some();

        Some(match (closing, self_contained) {
            (true, _) => BlockDelimiter::Close { name },
            (false, true) => BlockDelimiter::SelfContained { name, attrs },
            (false, false) => BlockDelimiter::Open { name, attrs },
        })
    }
}

/// Pairs opening and closing delimiters by name in document order.
/// `markers` must be sorted by position. Unbalanced delimiters are skipped.
pub fn pair_delimiters(markers: &[CommentMarker]) -> Vec<(MarkerId, MarkerId)> {
    let mut stack: Vec<(String, MarkerId)> = Vec::new();
    let mut pairs = Vec::new();

    for marker in markers {
        match marker.delimiter() {
            Some(BlockDelimiter::Open { name, .. }) => stack.push((name, marker.id)),
            Some(BlockDelimiter::Close { name }) => {
                if let Some(pos) = stack.iter().rposition(|(open, _)| *open == name) {
                    let (_, open_id) = stack.remove(pos);
                    stack.truncate(pos);
                    pairs.push((open_id, marker.id));
                }
            }
            _ => {}
        }
    }
    pairs
}
