//! UniFFI bindings for htmlweave mobile editors
//!
//! Exposes a document handle that a Kotlin or Swift editing surface can load
//! HTML into, mutate as the user types, and serialize back. Offsets are char
//! offsets into the document text.

use htmlweave_engine::{
    AttributeBag, BlockDelimiter, Cmd, CodecOptions, CommentMarker, Document, FormatSpan,
    MarkerId, Patch, PlaceholderId, SpanId,
};
use std::sync::Mutex;
use uuid::Uuid;

uniffi::setup_scaffolding!();

// ============ Errors ============

/// Errors that can cross the FFI boundary
/// Note: Field is named `reason` not `message` to avoid conflict with Throwable.message in Kotlin
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    #[error("Parse error: {reason}")]
    ParseError { reason: String },
    #[error("Edit error: {reason}")]
    EditError { reason: String },
}

impl FfiError {
    fn edit(e: impl std::fmt::Display) -> Self {
        Self::EditError {
            reason: e.to_string(),
        }
    }
}

// ============ Document Handle ============

/// A handle to a decoded HTML document.
#[derive(uniffi::Object)]
pub struct DocumentHandle {
    inner: Mutex<Document>,
}

impl DocumentHandle {
    fn with_doc<T>(&self, f: impl FnOnce(&mut Document) -> T) -> T {
        // Recover from poisoned mutex (another thread panicked while holding lock)
        let mut doc = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut doc)
    }
}

#[uniffi::export]
impl DocumentHandle {
    /// Decode a document from an HTML string.
    #[uniffi::constructor]
    pub fn from_html(html: String) -> Result<Self, FfiError> {
        let doc = Document::decode(&html).map_err(|e| FfiError::ParseError {
            reason: e.to_string(),
        })?;

        Ok(Self {
            inner: Mutex::new(doc),
        })
    }

    /// Decode with extra block, void or preformatted tags.
    #[uniffi::constructor]
    pub fn from_html_with(html: String, options: CodecOptionsDto) -> Result<Self, FfiError> {
        let doc = Document::decode_with(&html, &options.into_engine()).map_err(|e| {
            FfiError::ParseError {
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            inner: Mutex::new(doc),
        })
    }

    pub fn to_html(&self) -> String {
        self.with_doc(|doc| doc.encode())
    }

    /// Plain text, with `\n` between blocks and U+FFFC for embedded objects.
    pub fn get_text(&self) -> String {
        self.with_doc(|doc| doc.text())
    }

    pub fn version(&self) -> u64 {
        self.with_doc(|doc| doc.version())
    }

    pub fn read(&self, start: u64, end: u64) -> Result<String, FfiError> {
        self.with_doc(|doc| {
            doc.read(start as usize..end as usize)
                .map_err(FfiError::edit)
        })
    }

    /// Lines `first..end` joined with `\n`; lines past the end are skipped.
    pub fn text_at(&self, first: u64, end: u64) -> String {
        self.with_doc(|doc| doc.text_at(first as usize..end as usize))
    }

    pub fn line_count(&self) -> u64 {
        self.with_doc(|doc| doc.line_count() as u64)
    }

    pub fn is_line_blank(&self, line: u64) -> bool {
        self.with_doc(|doc| doc.is_line_blank(line as usize))
    }

    pub fn insert(&self, offset: u64, text: String, sticky: bool) -> Result<PatchDto, FfiError> {
        self.with_doc(|doc| {
            let offset = offset as usize;
            let patch = if sticky {
                doc.apply_insert_sticky(offset, &text)
            } else {
                doc.apply_insert(offset, &text)
            };
            patch.map(PatchDto::from_engine).map_err(FfiError::edit)
        })
    }

    pub fn delete(&self, start: u64, end: u64) -> Result<PatchDto, FfiError> {
        self.with_doc(|doc| {
            doc.apply_delete(start as usize, end as usize)
                .map(PatchDto::from_engine)
                .map_err(FfiError::edit)
        })
    }

    /// Delete `start..end` and type `text` in its place, as one edit.
    pub fn replace(&self, start: u64, end: u64, text: String) -> Result<PatchDto, FfiError> {
        self.with_doc(|doc| {
            doc.apply(Cmd::ReplaceRange {
                range: start as usize..end as usize,
                text,
            })
            .map(PatchDto::from_engine)
            .map_err(FfiError::edit)
        })
    }

    /// Spans at `offset`, outermost first.
    pub fn spans_at(&self, offset: u64) -> Vec<SpanDto> {
        self.with_doc(|doc| {
            doc.spans_at(offset as usize)
                .into_iter()
                .map(SpanDto::from_engine)
                .collect()
        })
    }

    pub fn spans(&self) -> Vec<SpanDto> {
        self.with_doc(|doc| doc.spans().into_iter().map(SpanDto::from_engine).collect())
    }

    /// Comments in document order, with block-editor delimiters classified.
    pub fn markers(&self) -> Vec<MarkerDto> {
        self.with_doc(|doc| doc.markers().iter().map(MarkerDto::from_engine).collect())
    }

    /// Insert a pending-media placeholder and return its id.
    pub fn insert_placeholder(
        &self,
        offset: u64,
        attributes: Vec<AttributeDto>,
    ) -> Result<String, FfiError> {
        self.with_doc(|doc| {
            doc.insert_placeholder(offset as usize, AttributeDto::to_bag(attributes))
                .map(|(id, _)| id.to_string())
                .map_err(FfiError::edit)
        })
    }

    pub fn resolve_placeholder(
        &self,
        id: String,
        attributes: Vec<AttributeDto>,
    ) -> Result<PatchDto, FfiError> {
        let id = parse_placeholder(&id)?;
        self.with_doc(|doc| {
            doc.resolve_placeholder(id, AttributeDto::to_bag(attributes))
                .map(PatchDto::from_engine)
                .map_err(FfiError::edit)
        })
    }

    pub fn cancel_placeholder(&self, id: String) -> Result<PatchDto, FfiError> {
        let id = parse_placeholder(&id)?;
        self.with_doc(|doc| {
            doc.cancel_placeholder(id)
                .map(PatchDto::from_engine)
                .map_err(FfiError::edit)
        })
    }
}

fn parse_placeholder(id: &str) -> Result<PlaceholderId, FfiError> {
    Uuid::parse_str(id)
        .map(PlaceholderId)
        .map_err(FfiError::edit)
}

// ============ DTOs ============

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct AttributeDto {
    pub name: String,
    /// `None` for bare attributes such as `disabled`
    pub value: Option<String>,
}

impl AttributeDto {
    fn to_bag(attributes: Vec<AttributeDto>) -> AttributeBag {
        let mut bag = AttributeBag::new();
        for attr in attributes {
            bag.push(attr.name, attr.value);
        }
        bag
    }
}

/// A format span as seen by the editing surface.
#[derive(Debug, Clone, uniffi::Record)]
pub struct SpanDto {
    /// Stable identifier for this span (persists across edits)
    pub id: u64,
    /// Kind name, e.g. "Bold", "ListItem", "Heading(2)"
    pub kind: String,
    pub tag: String,
    pub start: u64,
    pub end: u64,
    pub depth: u32,
    pub block: bool,
    pub attributes: Vec<AttributeDto>,
}

impl SpanDto {
    fn from_engine(span: &FormatSpan) -> Self {
        Self {
            id: span.id.0,
            kind: span.kind.to_string(),
            tag: span.tag.clone(),
            start: span.start as u64,
            end: span.end as u64,
            depth: span.depth,
            block: span.block,
            attributes: span
                .attributes
                .iter()
                .map(|(name, value)| AttributeDto {
                    name: name.to_string(),
                    value: value.map(str::to_string),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct CodecOptionsDto {
    pub extra_block_tags: Vec<String>,
    pub extra_void_tags: Vec<String>,
    pub preformatted_tags: Vec<String>,
    pub ignore_inter_block_whitespace: bool,
}

impl CodecOptionsDto {
    fn into_engine(self) -> CodecOptions {
        CodecOptions {
            extra_block_tags: self.extra_block_tags,
            extra_void_tags: self.extra_void_tags,
            preformatted_tags: self.preformatted_tags,
            ignore_inter_block_whitespace: self.ignore_inter_block_whitespace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum MarkerKind {
    Comment,
    BlockOpen,
    BlockClose,
    BlockSelfContained,
}

/// A comment kept at a text offset.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct MarkerDto {
    pub id: u64,
    pub offset: u64,
    /// Comment body, verbatim
    pub text: String,
    pub kind: MarkerKind,
    /// Block name of a delimiter, e.g. "list" or "core/image"
    pub block_name: Option<String>,
}

impl MarkerDto {
    fn from_engine(marker: &CommentMarker) -> Self {
        let (kind, block_name) = match marker.delimiter() {
            None => (MarkerKind::Comment, None),
            Some(BlockDelimiter::Open { name, .. }) => (MarkerKind::BlockOpen, Some(name)),
            Some(BlockDelimiter::Close { name }) => (MarkerKind::BlockClose, Some(name)),
            Some(BlockDelimiter::SelfContained { name, .. }) => {
                (MarkerKind::BlockSelfContained, Some(name))
            }
        };
        Self {
            id: marker.id.0,
            offset: marker.offset as u64,
            text: marker.text.clone(),
            kind,
            block_name,
        }
    }
}

/// What one edit changed.
#[derive(Debug, Clone, uniffi::Record)]
pub struct PatchDto {
    pub version: u64,
    pub start: u64,
    pub removed: u64,
    pub inserted: u64,
    pub added_spans: Vec<u64>,
    pub removed_spans: Vec<u64>,
    pub modified_spans: Vec<u64>,
    pub removed_markers: Vec<u64>,
    pub moved_markers: Vec<u64>,
}

impl PatchDto {
    fn from_engine(patch: Patch) -> Self {
        let ids = |ids: Vec<SpanId>| -> Vec<u64> { ids.into_iter().map(|id| id.0).collect() };
        let marker_ids =
            |ids: Vec<MarkerId>| -> Vec<u64> { ids.into_iter().map(|id| id.0).collect() };
        Self {
            version: patch.version,
            start: patch.shift.start as u64,
            removed: patch.shift.removed as u64,
            inserted: patch.shift.inserted as u64,
            added_spans: ids(patch.spans.added),
            removed_spans: ids(patch.spans.removed),
            modified_spans: ids(patch.spans.modified),
            removed_markers: marker_ids(patch.markers.removed),
            moved_markers: marker_ids(patch.markers.moved),
        }
    }
}
