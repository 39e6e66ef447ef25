//! # Lexer - Tokenizing HTML Source
//!
//! This module is the first stage of decoding: it breaks an HTML string into
//! a flat list of tokens using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Coverage Guarantee
//!
//! Every byte of a successfully lexed input belongs to exactly one token, so
//! concatenating the token texts gives back the input:
//!
//! ```
//! use htmlweave_syntax::lexer::lex;
//!
//! let input = "<p class=\"x\">Hi<!-- note --></p>";
//! let tokens = lex(input).unwrap();
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Token Design
//!
//! Tokens are context-free. The lexer does not know whether `<li>` is
//! allowed where it appears or which elements are void; that is the
//! decoder's job. It only recognizes four shapes:
//!
//! - `<!-- ... -->` → [`TokenKind::Comment`]
//! - `<name ...>` → [`TokenKind::StartTag`] (attributes are tokenized
//!   separately by [`crate::tag::parse_start_tag`])
//! - `</name>` → [`TokenKind::EndTag`]
//! - everything else → [`TokenKind::Text`], or [`TokenKind::Lt`] for a `<`
//!   that cannot start markup (`a < b`)
//!
//! Malformed markup (an unterminated comment, a tag without `>`, `</ p>`)
//! is reported as a [`LexError`] carrying the byte offset.

use std::ops::Range;

use logos::{Lexer, Logos};

use crate::error::{LexError, LexErrorKind};

/// Token kinds produced by the Logos lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `<!-- ... -->`, body included
    #[token("<!--", comment_body)]
    Comment,

    /// `</name>` with optional trailing whitespace before `>`
    #[regex(r"</[A-Za-z][A-Za-z0-9:_-]*[ \t\r\n]*>")]
    EndTag,

    /// `<name ...>` or `<name .../>`
    #[regex(r"<[A-Za-z]", start_tag)]
    StartTag,

    /// A `<` that does not start markup
    #[token("<", lone_lt)]
    Lt,

    /// Character data between markup
    #[regex(r"[^<]+")]
    Text,
}

/// Consumes through the closing `-->`.
fn comment_body(lex: &mut Lexer<TokenKind>) -> bool {
    match lex.remainder().find("-->") {
        Some(i) => {
            lex.bump(i + 3);
            true
        }
        None => false,
    }
}

/// Consumes through the `>` that closes the tag. A `>` inside a quoted
/// attribute value does not count.
fn start_tag(lex: &mut Lexer<TokenKind>) -> bool {
    let bytes = lex.remainder().as_bytes();
    let mut quote: Option<u8> = None;
    let mut after_eq = false;

    for (i, &b) in bytes.iter().enumerate() {
        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
            continue;
        }
        match b {
            b'>' => {
                lex.bump(i + 1);
                return true;
            }
            b'"' | b'\'' if after_eq => {
                quote = Some(b);
                continue;
            }
            b'<' => return false,
            _ => {}
        }
        after_eq = b == b'=' || (after_eq && b.is_ascii_whitespace());
    }
    false
}

fn lone_lt(lex: &mut Lexer<TokenKind>) -> bool {
    !matches!(lex.remainder().as_bytes().first(), Some(b'/' | b'!'))
}

/// A token with its kind, source text and byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Range<usize>,
}

/// Tokenize `input`, stopping at the first malformed construct.
pub fn lex(input: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut tokens = Vec::new();
    for (result, span) in TokenKind::lexer(input).spanned() {
        match result {
            Ok(kind) => tokens.push(Token {
                kind,
                text: &input[span.clone()],
                span,
            }),
            Err(()) => {
                return Err(LexError {
                    offset: span.start,
                    kind: classify_error(&input[span.start..]),
                });
            }
        }
    }
    Ok(tokens)
}

/// Tokenize `input`, returning `(kind, span)` pairs only.
pub fn lex_with_spans(input: &str) -> Result<Vec<(TokenKind, Range<usize>)>, LexError> {
    Ok(lex(input)?.into_iter().map(|t| (t.kind, t.span)).collect())
}

fn classify_error(rest: &str) -> LexErrorKind {
    if rest.starts_with("<!--") {
        LexErrorKind::UnterminatedComment
    } else if rest.starts_with("</") {
        LexErrorKind::MalformedEndTag
    } else if rest.starts_with("<!") {
        LexErrorKind::UnsupportedDeclaration
    } else {
        LexErrorKind::UnterminatedTag
    }
}
