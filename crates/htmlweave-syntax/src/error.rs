use thiserror::Error;

/// A malformed construct found while tokenizing, with its byte offset in the
/// input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at byte {offset}")]
pub struct LexError {
    pub offset: usize,
    pub kind: LexErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("unterminated tag")]
    UnterminatedTag,
    #[error("malformed end tag")]
    MalformedEndTag,
    #[error("unsupported markup declaration")]
    UnsupportedDeclaration,
    #[error("malformed attribute")]
    MalformedAttribute,
}
