use htmlweave_syntax::{LexError, LexErrorKind};
use thiserror::Error;

use crate::editing::PlaceholderId;
use crate::model::SpanId;

/// Decoding failure. `offset` is a byte offset into the HTML input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at byte {offset}")]
pub struct ParseError {
    pub offset: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("unterminated tag")]
    UnterminatedTag,
    #[error("malformed attribute")]
    MalformedAttribute,
    #[error("malformed end tag")]
    MalformedEndTag,
    #[error("unsupported markup declaration")]
    UnsupportedDeclaration,
    #[error("end tag </{0}> has no open element")]
    UnexpectedEndTag(String),
    #[error("end tag </{found}> does not match open <{expected}>")]
    MismatchedEndTag { expected: String, found: String },
    #[error("end tag </{0}> for a void element")]
    VoidEndTag(String),
    #[error("<{0}> is never closed")]
    UnclosedElement(String),
    #[error("<li> outside of a list")]
    ListItemOutsideList,
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        let kind = match e.kind {
            LexErrorKind::UnterminatedComment => ParseErrorKind::UnterminatedComment,
            LexErrorKind::UnterminatedTag => ParseErrorKind::UnterminatedTag,
            LexErrorKind::MalformedEndTag => ParseErrorKind::MalformedEndTag,
            LexErrorKind::UnsupportedDeclaration => ParseErrorKind::UnsupportedDeclaration,
            LexErrorKind::MalformedAttribute => ParseErrorKind::MalformedAttribute,
        };
        ParseError {
            offset: e.offset,
            kind,
        }
    }
}

/// An offset or range outside `[0, len]` of the text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("range {start}..{end} out of bounds (len {len})")]
pub struct OutOfRangeError {
    pub start: usize,
    pub end: usize,
    pub len: usize,
}

/// A broken model invariant. Returned instead of committing an edit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invariant `{rule}` violated: {detail}")]
pub struct InvariantViolation {
    pub rule: &'static str,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error(transparent)]
    OutOfRange(#[from] OutOfRangeError),
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
    #[error("no span with id {0:?}")]
    UnknownSpan(SpanId),
    #[error("placeholder {0} no longer exists")]
    UnknownPlaceholder(PlaceholderId),
    #[error("{0} spans must cover text")]
    EmptySpanNotAllowed(&'static str),
}

/// Umbrella error for callers that decode and edit through one path.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Edit(#[from] EditError),
}
