//! HTML → document.
//!
//! Walks the token stream once, keeping a stack of open elements. Each
//! element becomes a [`FormatSpan`] whose start is fixed on open and whose
//! end is filled in on close. Text goes straight into the buffer; `<br>`
//! becomes `\n`; void elements become U+FFFC.
//!
//! Adjacent blocks are separated by a single `\n`. The [`Flow`] state
//! decides when one is needed.

use std::collections::HashSet;

use htmlweave_syntax::{Token, TokenKind, end_tag_name, lex, parse_start_tag};

use crate::buffer::{OBJECT_REPLACEMENT, TextBuffer};
use crate::codec::CodecOptions;
use crate::editing::Document;
use crate::error::{ParseError, ParseErrorKind};
use crate::model::{
    AttributeBag, CommentMarker, FormatKind, FormatRanges, FormatSpan, IdGen, SpanId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Document start, or just inside a freshly opened block
    Start,
    /// Content has been emitted since the last block boundary
    Inline,
    /// A block just closed
    AfterBlock,
}

struct OpenElement {
    id: SpanId,
    tag: String,
    block: bool,
    list: bool,
    preformatted: bool,
}

struct DocBuilder<'o> {
    options: &'o CodecOptions,
    text: String,
    len: usize,
    ranges: FormatRanges,
    markers: Vec<CommentMarker>,
    ids: IdGen,
    stack: Vec<OpenElement>,
    flow: Flow,
}

pub fn decode(html: &str) -> Result<Document, ParseError> {
    decode_with(html, &CodecOptions::default())
}

pub fn decode_with(html: &str, options: &CodecOptions) -> Result<Document, ParseError> {
    let tokens = lex(html)?;
    let mut builder = DocBuilder::new(options);

    for token in &tokens {
        match token.kind {
            TokenKind::Comment => builder.comment(token),
            TokenKind::StartTag => builder.start_tag(token)?,
            TokenKind::EndTag => builder.end_tag(token)?,
            TokenKind::Text | TokenKind::Lt => builder.text(token.text),
        }
    }

    let doc = builder.finish(html.len())?;
    log::debug!(
        "decoded {} bytes into {} chars, {} spans, {} markers",
        html.len(),
        doc.len(),
        doc.ranges.len(),
        doc.markers.len()
    );
    Ok(doc)
}

impl<'o> DocBuilder<'o> {
    fn new(options: &'o CodecOptions) -> Self {
        Self {
            options,
            text: String::new(),
            len: 0,
            ranges: FormatRanges::new(),
            markers: Vec::new(),
            ids: IdGen::default(),
            stack: Vec::new(),
            flow: Flow::Start,
        }
    }

    fn push_char(&mut self, c: char) {
        self.text.push(c);
        self.len += 1;
    }

    fn depth(&self) -> u32 {
        self.stack.len() as u32
    }

    fn separate_block(&mut self) {
        if self.flow != Flow::Start {
            self.push_char('\n');
        }
    }

    fn separate_content(&mut self) {
        if self.flow == Flow::AfterBlock {
            self.push_char('\n');
        }
        self.flow = Flow::Inline;
    }

    fn comment(&mut self, token: &Token<'_>) {
        let body = token
            .text
            .strip_prefix("<!--")
            .and_then(|s| s.strip_suffix("-->"))
            .unwrap_or_default();
        let id = self.ids.marker();
        let seq = self.ids.seq();
        self.markers.push(CommentMarker {
            id,
            offset: self.len,
            text: body.to_string(),
            depth: self.depth(),
            seq,
        });
    }

    fn text(&mut self, raw: &str) {
        let preformatted = self.stack.iter().any(|e| e.preformatted);
        let ignorable = raw.contains('\n') && raw.chars().all(char::is_whitespace);
        let in_list = self.stack.last().is_some_and(|e| e.list);
        if !preformatted
            && ignorable
            && self.options.ignore_inter_block_whitespace
            && (self.flow != Flow::Inline || in_list)
        {
            return;
        }

        let decoded = html_escape::decode_html_entities(raw);
        let normalized = if preformatted {
            decoded.replace("\r\n", "\n")
        } else {
            decoded.replace("\r\n", " ").replace(['\r', '\n'], " ")
        };
        if normalized.is_empty() {
            return;
        }

        self.separate_content();
        self.len += normalized.chars().count();
        self.text.push_str(&normalized);
    }

    fn start_tag(&mut self, token: &Token<'_>) -> Result<(), ParseError> {
        let tag = parse_start_tag(token.text, token.span.start)?;
        let name = tag.name.to_ascii_lowercase();

        if name == "br" {
            self.separate_content();
            self.push_char('\n');
            return Ok(());
        }

        let kind = FormatKind::from_tag(&name);
        if kind == FormatKind::ListItem && !self.stack.iter().any(|e| e.list) {
            return Err(ParseError {
                offset: token.span.start,
                kind: ParseErrorKind::ListItemOutsideList,
            });
        }

        let block = self.options.is_block_tag(&name);
        let void = tag.self_closing || self.options.is_void_tag(&name);
        if block {
            self.separate_block();
        } else {
            self.separate_content();
        }

        let mut attributes = AttributeBag::new();
        for attr in &tag.attributes {
            let value = attr
                .value
                .map(|v| html_escape::decode_html_entities(v).into_owned());
            attributes.push(attr.name, value);
        }

        let start = self.len;
        let id = self.ids.span();
        let seq = self.ids.seq();
        let depth = self.depth();
        let list = kind.is_list();

        if void {
            self.push_char(OBJECT_REPLACEMENT);
        }
        self.ranges.insert(FormatSpan {
            id,
            kind,
            tag: name.clone(),
            start,
            end: self.len,
            attributes,
            depth,
            seq,
            block,
            void,
            self_closing: tag.self_closing,
        });

        if void {
            self.flow = if block { Flow::AfterBlock } else { Flow::Inline };
        } else {
            self.stack.push(OpenElement {
                id,
                preformatted: self.options.is_preformatted(&name),
                tag: name,
                block,
                list,
            });
            self.flow = if block { Flow::Start } else { Flow::Inline };
        }
        Ok(())
    }

    fn end_tag(&mut self, token: &Token<'_>) -> Result<(), ParseError> {
        let name = end_tag_name(token.text).to_ascii_lowercase();
        let offset = token.span.start;

        if self.options.is_void_tag(&name) {
            return Err(ParseError {
                offset,
                kind: ParseErrorKind::VoidEndTag(name),
            });
        }
        let Some(open) = self.stack.pop() else {
            return Err(ParseError {
                offset,
                kind: ParseErrorKind::UnexpectedEndTag(name),
            });
        };
        if open.tag != name {
            return Err(ParseError {
                offset,
                kind: ParseErrorKind::MismatchedEndTag {
                    expected: open.tag,
                    found: name,
                },
            });
        }

        let end = self.len;
        if let Some(span) = self.ranges.get_mut(open.id) {
            span.end = end;
        }
        if open.block {
            self.flow = Flow::AfterBlock;
        }
        Ok(())
    }

    fn finish(mut self, input_len: usize) -> Result<Document, ParseError> {
        if let Some(open) = self.stack.pop() {
            return Err(ParseError {
                offset: input_len,
                kind: ParseErrorKind::UnclosedElement(open.tag),
            });
        }

        let anchored: HashSet<usize> = self.markers.iter().map(|m| m.offset).collect();
        self.ranges.coalesce(|offset| anchored.contains(&offset));

        Ok(Document::from_parts(
            TextBuffer::from(self.text.as_str()),
            self.ranges,
            self.markers,
            self.ids,
            self.options.clone(),
        ))
    }
}
