use std::fmt;

use uuid::Uuid;

use crate::buffer::{OBJECT_REPLACEMENT, Shift};
use crate::editing::{Cmd, Document, Patch, transform};
use crate::error::EditError;
use crate::model::{AttributeBag, FormatKind, FormatSpan, SpanId};

/// Handle given to an external uploader for pending media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaceholderId(pub Uuid);

impl PlaceholderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlaceholderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlaceholderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Document {
    /// Insert a U+FFFC carrying an image span with `attributes`.
    pub fn insert_placeholder(
        &mut self,
        offset: usize,
        attributes: AttributeBag,
    ) -> Result<(PlaceholderId, Patch), EditError> {
        let placeholder = PlaceholderId::new();
        let mut next = self.clone();
        let shift = transform::insert(&mut next, offset, &OBJECT_REPLACEMENT.to_string(), false)?;

        let tag = FormatKind::Image.default_tag();
        let span = FormatSpan {
            id: next.ids.span(),
            kind: FormatKind::Image,
            depth: next.ranges.depth_for(&(offset..offset + 1)),
            seq: next.ids.seq(),
            block: next.options.is_block_tag(&tag),
            tag,
            start: offset,
            end: offset + 1,
            attributes,
            void: true,
            self_closing: false,
        };
        next.placeholders.insert(placeholder, span.id);
        next.ranges.insert(span);

        let patch = self.commit(next, shift)?;
        log::debug!("placeholder {placeholder} inserted at {offset}");
        Ok((placeholder, patch))
    }

    /// Replace the placeholder's attributes with the final ones.
    pub fn resolve_placeholder(
        &mut self,
        id: PlaceholderId,
        attributes: AttributeBag,
    ) -> Result<Patch, EditError> {
        let span_id = self.placeholder_span(id)?;
        let mut next = self.clone();
        let Some(span) = next.ranges.get_mut(span_id) else {
            return Err(EditError::UnknownPlaceholder(id));
        };
        span.attributes = attributes;
        next.placeholders.remove(&id);

        let patch = self.commit(next, Shift::default())?;
        log::debug!("placeholder {id} resolved");
        Ok(patch)
    }

    /// Delete the placeholder character and its span.
    pub fn cancel_placeholder(&mut self, id: PlaceholderId) -> Result<Patch, EditError> {
        let span_id = self.placeholder_span(id)?;
        let Some(start) = self.ranges.get(span_id).map(|s| s.start) else {
            return Err(EditError::UnknownPlaceholder(id));
        };
        let patch = self.apply(Cmd::delete(start..start + 1))?;
        self.placeholders.remove(&id);

        log::debug!("placeholder {id} cancelled");
        Ok(patch)
    }

    fn placeholder_span(&self, id: PlaceholderId) -> Result<SpanId, EditError> {
        self.placeholders
            .get(&id)
            .copied()
            .filter(|span_id| self.ranges.get(*span_id).is_some())
            .ok_or(EditError::UnknownPlaceholder(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn image(src: &str) -> AttributeBag {
        [("src", src)].into_iter().collect()
    }

    #[test]
    fn placeholder_resolves_to_final_attributes() {
        let mut doc = Document::decode("<p>ab</p>").unwrap();
        let (id, patch) = doc.insert_placeholder(1, image("local.png")).unwrap();
        assert_eq!(patch.spans.added.len(), 1);
        assert_eq!(doc.encode(), "<p>a<img src=\"local.png\">b</p>");

        doc.resolve_placeholder(id, image("https://cdn/x.png")).unwrap();
        assert_eq!(doc.encode(), "<p>a<img src=\"https://cdn/x.png\">b</p>");
    }

    #[test]
    fn cancelled_placeholder_leaves_no_trace() {
        let mut doc = Document::decode("<p>ab</p>").unwrap();
        let (id, _) = doc.insert_placeholder(2, image("local.png")).unwrap();
        doc.cancel_placeholder(id).unwrap();
        assert_eq!(doc.encode(), "<p>ab</p>");
        assert_eq!(
            doc.cancel_placeholder(id).unwrap_err(),
            EditError::UnknownPlaceholder(id)
        );
    }

    #[test]
    fn deleted_placeholder_is_unknown() {
        let mut doc = Document::decode("<p>ab</p>").unwrap();
        let (id, _) = doc.insert_placeholder(1, image("local.png")).unwrap();
        doc.apply_delete(0, 3).unwrap();
        assert_eq!(
            doc.resolve_placeholder(id, image("x")).unwrap_err(),
            EditError::UnknownPlaceholder(id)
        );
    }
}
