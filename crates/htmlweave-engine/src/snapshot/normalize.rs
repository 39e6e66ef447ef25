use serde::Serialize;

use crate::editing::Document;

#[derive(Debug, Serialize)]
pub struct Snap {
    pub text: String,
    pub spans: Vec<SpanSnap>,
    pub markers: Vec<MarkerSnap>,
}

#[derive(Debug, Serialize)]
pub struct SpanSnap {
    pub kind: String,
    pub tag: String,
    pub span: (usize, usize),
    pub depth: u32,
    /// Covered text with `\n` shown as `⏎`; omitted for empty spans
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<(String, Option<String>)>,
}

#[derive(Debug, Serialize)]
pub struct MarkerSnap {
    pub offset: usize,
    pub text: String,
    pub depth: u32,
}

fn preview(text: &str) -> String {
    text.replace('\n', "⏎")
}

/// Stable, id-free view of a document for snapshot tests and `inspect`.
pub fn normalize(doc: &Document) -> Snap {
    let spans = doc
        .spans()
        .into_iter()
        .map(|s| SpanSnap {
            kind: s.kind.to_string(),
            tag: s.tag.clone(),
            span: (s.start, s.end),
            depth: s.depth,
            text: (!s.is_empty())
                .then(|| doc.read(s.range()).ok())
                .flatten()
                .map(|t| preview(&t)),
            attributes: s
                .attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
                .collect(),
        })
        .collect();

    let markers = doc
        .markers()
        .iter()
        .map(|m| MarkerSnap {
            offset: m.offset,
            text: m.text.clone(),
            depth: m.depth,
        })
        .collect();

    Snap {
        text: preview(&doc.text()),
        spans,
        markers,
    }
}
