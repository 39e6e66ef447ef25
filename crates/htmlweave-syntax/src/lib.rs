//! # htmlweave-syntax
//!
//! Tokenizer for the HTML subset that htmlweave documents are stored in.
//!
//! The crate knows nothing about formatting semantics. It turns a string
//! into comments, start tags, end tags and text, with byte spans, and splits
//! start tags into a name plus ordered raw attributes. The engine's decoder
//! builds the document model on top of these tokens.
//!
//! ```text
//! "<b h=\"H\">Bold</b>" → [StartTag, Text("Bold"), EndTag]
//!                          └─ parse_start_tag → name "b", [h="H"]
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! htmlweave-syntax/
//! ├── lib.rs     # This file - public API
//! ├── lexer.rs   # Logos-based tokenizer
//! ├── tag.rs     # Start tag name/attribute tokenizing
//! ├── cursor.rs  # Byte cursor used by tag.rs
//! └── error.rs   # LexError
//! ```

pub mod cursor;
pub mod error;
pub mod lexer;
pub mod tag;

pub use error::{LexError, LexErrorKind};
pub use lexer::{Token, TokenKind, lex, lex_with_spans};
pub use tag::{RawAttribute, StartTag, end_tag_name, parse_start_tag};

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn describe(input: &str) -> String {
        lex(input)
            .unwrap()
            .iter()
            .map(|t| format!("{:?}@{:?} {:?}", t.kind, t.span, t.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn snapshot_gutenberg_list() {
        let input = "<!-- wp:list --><ul><li>a</li></ul><!-- /wp:list -->";
        assert_snapshot!(describe(input), @r#"
        Comment@0..16 "<!-- wp:list -->"
        StartTag@16..20 "<ul>"
        StartTag@20..24 "<li>"
        Text@24..25 "a"
        EndTag@25..30 "</li>"
        EndTag@30..35 "</ul>"
        Comment@35..52 "<!-- /wp:list -->"
        "#);
    }

    #[test]
    fn roundtrip_preserves_text() {
        let inputs = [
            "plain",
            "<p>para</p>",
            "<b h=\"H\">Bold</b>",
            "a<br>b",
            "<img src=\"x\" />",
            "<!--more-->",
            "x &amp; y",
        ];

        for input in inputs {
            let text: String = lex(input).unwrap().iter().map(|t| t.text).collect();
            assert_eq!(text, input, "Roundtrip failed for: {:?}", input);
        }
    }
}
