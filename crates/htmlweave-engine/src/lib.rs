//! Rich-text editing core: a plain-text buffer with format spans and comment
//! markers laid over it, a canonical HTML codec, and an edit transformer that
//! keeps the spans right as the text changes.

pub mod buffer;
pub mod codec;
pub mod editing;
pub mod error;
pub mod model;
pub mod snapshot;

// Re-export key types for easier usage
pub use buffer::{OBJECT_REPLACEMENT, Shift, TextBuffer};
pub use codec::{CodecOptions, decode, decode_with, encode};
pub use editing::{Cmd, Document, MarkerDelta, Patch, PlaceholderId, SpanDelta};
pub use error::{EditError, Error, InvariantViolation, OutOfRangeError, ParseError, ParseErrorKind};
pub use model::{
    AttributeBag, BlockDelimiter, CommentMarker, FormatKind, FormatSpan, MarkerId, SpanId,
};
