//! Start/end tag tokenizing.
//!
//! The lexer only finds where a tag begins and ends. This module splits the
//! tag text into a name and its attributes, keeping the attributes in source
//! order. Values are returned raw: entity decoding is left to the caller.

use std::ops::Range;

use crate::cursor::Cursor;
use crate::error::{LexError, LexErrorKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag<'a> {
    pub name: &'a str,
    pub attributes: Vec<RawAttribute<'a>>,
    /// Written as `<name ... />`
    pub self_closing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttribute<'a> {
    pub name: &'a str,
    /// `None` for a bare attribute such as `disabled`
    pub value: Option<&'a str>,
    /// Absolute byte span of the whole `name="value"` text
    pub span: Range<usize>,
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b':' | b'-' | b'_')
}

fn is_attr_name_byte(b: u8) -> bool {
    !b.is_ascii_whitespace() && !matches!(b, b'/' | b'>' | b'=' | b'"' | b'\'' | b'<')
}

/// Parse the text of a start tag token (`<name attr="v">`). `base` is the
/// byte offset of the tag in the full input, used for error offsets.
pub fn parse_start_tag(text: &str, base: usize) -> Result<StartTag<'_>, LexError> {
    let mut cur = Cursor::new(text, base);
    let unterminated = |pos: usize| LexError {
        offset: pos,
        kind: LexErrorKind::UnterminatedTag,
    };
    let malformed = |pos: usize| LexError {
        offset: pos,
        kind: LexErrorKind::MalformedAttribute,
    };

    if cur.bump() != Some(b'<') {
        return Err(unterminated(base));
    }
    let name = cur.eat_while(is_name_byte);
    if name.is_empty() {
        return Err(unterminated(base));
    }

    let mut attributes: Vec<RawAttribute<'_>> = Vec::new();
    let mut self_closing = false;
    loop {
        cur.skip_whitespace();
        if cur.starts_with(b"/>") {
            self_closing = true;
            cur.bump_n(2);
            break;
        }
        match cur.peek() {
            None => return Err(unterminated(base)),
            Some(b'>') => {
                cur.bump();
                break;
            }
            Some(b'/') => {
                cur.bump();
                continue;
            }
            Some(_) => {}
        }

        let start = cur.pos();
        let attr_name = cur.eat_while(is_attr_name_byte);
        if attr_name.is_empty() {
            return Err(malformed(start));
        }

        let mut lookahead = cur.clone();
        lookahead.skip_whitespace();
        if lookahead.peek() != Some(b'=') {
            attributes.push(RawAttribute {
                name: attr_name,
                value: None,
                span: start..cur.pos(),
            });
            continue;
        }
        cur = lookahead;
        cur.bump();
        cur.skip_whitespace();

        let value = match cur.peek() {
            Some(q @ (b'"' | b'\'')) => {
                cur.bump();
                let value = cur.eat_while(|b| b != q);
                if cur.bump() != Some(q) {
                    return Err(unterminated(base));
                }
                value
            }
            Some(_) => {
                let value = cur.eat_while(|b| !b.is_ascii_whitespace() && b != b'>');
                if value.is_empty() {
                    return Err(malformed(cur.pos()));
                }
                value
            }
            None => return Err(unterminated(base)),
        };
        attributes.push(RawAttribute {
            name: attr_name,
            value: Some(value),
            span: start..cur.pos(),
        });
    }

    if !cur.eof() {
        return Err(unterminated(base));
    }

    Ok(StartTag {
        name,
        attributes,
        self_closing,
    })
}

/// The element name of an end tag token (`</name >`).
pub fn end_tag_name(text: &str) -> &str {
    let inner = text.strip_prefix("</").unwrap_or(text);
    let inner = inner.strip_suffix('>').unwrap_or(inner);
    inner.trim_end()
}
