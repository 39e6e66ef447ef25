//! HTML codec: [`decode`] builds a [`Document`](crate::Document) from an
//! HTML string, [`encode`] serializes one back.

pub mod decode;
pub mod encode;
pub mod options;

pub use decode::{decode, decode_with};
pub use encode::encode;
pub use options::CodecOptions;
