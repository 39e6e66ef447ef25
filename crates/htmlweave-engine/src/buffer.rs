//! Text buffer addressed by Unicode scalar offsets.
//!
//! The text lives in an `xi_rope::Rope`, which is byte-addressed. Offsets in
//! the public API count chars, so every call converts at the boundary.

use std::ops::Range;

use xi_rope::Rope;
use xi_rope::delta::Builder;

use crate::error::OutOfRangeError;

/// U+FFFC, the character that stands in for an embedded object.
pub const OBJECT_REPLACEMENT: char = '\u{FFFC}';

/// Description of one buffer mutation, in char offsets of the pre-edit text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Shift {
    pub start: usize,
    pub removed: usize,
    pub inserted: usize,
}

impl Shift {
    /// Map a pre-edit offset through this shift.
    ///
    /// Offsets inside a removed range collapse onto `start`. Offsets at
    /// `start` stay put on insertion.
    pub fn map(&self, offset: usize) -> usize {
        if offset <= self.start {
            offset
        } else if offset >= self.start + self.removed {
            offset - self.removed + self.inserted
        } else {
            self.start
        }
    }
}

#[derive(Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
    len: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn insert(&mut self, offset: usize, text: &str) -> Result<Shift, OutOfRangeError> {
        self.check(offset, offset)?;
        let at = self.byte_offset(offset);
        let mut builder = Builder::new(self.rope.len());
        builder.replace(at..at, Rope::from(text));
        self.rope = builder.build().apply(&self.rope);

        let inserted = text.chars().count();
        self.len += inserted;
        Ok(Shift {
            start: offset,
            removed: 0,
            inserted,
        })
    }

    pub fn delete(&mut self, start: usize, end: usize) -> Result<Shift, OutOfRangeError> {
        self.check(start, end)?;
        let bytes = self.byte_range(start..end);
        let mut builder = Builder::new(self.rope.len());
        builder.delete(bytes);
        self.rope = builder.build().apply(&self.rope);

        self.len -= end - start;
        Ok(Shift {
            start,
            removed: end - start,
            inserted: 0,
        })
    }

    pub fn read(&self, start: usize, end: usize) -> Result<String, OutOfRangeError> {
        self.check(start, end)?;
        Ok(self
            .rope
            .slice_to_cow(self.byte_range(start..end))
            .into_owned())
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        if offset >= self.len {
            return None;
        }
        self.rope
            .slice_to_cow(self.byte_range(offset..offset + 1))
            .chars()
            .next()
    }

    /// The whole text as a `Vec<char>`, indexed by offset.
    pub fn chars(&self) -> Vec<char> {
        self.to_string().chars().collect()
    }

    pub fn line_count(&self) -> usize {
        self.to_string().split('\n').count()
    }

    /// Char range of line `line` (without its trailing `\n`).
    pub fn line_range(&self, line: usize) -> Option<Range<usize>> {
        let mut start = 0;
        for (i, text) in self.to_string().split('\n').enumerate() {
            let end = start + text.chars().count();
            if i == line {
                return Some(start..end);
            }
            start = end + 1;
        }
        None
    }

    fn check(&self, start: usize, end: usize) -> Result<(), OutOfRangeError> {
        if start > end || end > self.len {
            return Err(OutOfRangeError {
                start,
                end,
                len: self.len,
            });
        }
        Ok(())
    }

    fn byte_range(&self, range: Range<usize>) -> Range<usize> {
        let start = self.byte_offset(range.start);
        let end = start + self.byte_len_from(start, range.end - range.start);
        start..end
    }

    fn byte_offset(&self, offset: usize) -> usize {
        self.byte_len_from(0, offset)
    }

    /// Byte length of `count` chars starting at byte `from`.
    fn byte_len_from(&self, from: usize, count: usize) -> usize {
        let mut remaining = count;
        let mut bytes = 0;
        for chunk in self.rope.iter_chunks(from..self.rope.len()) {
            if remaining == 0 {
                break;
            }
            for (i, _) in chunk.char_indices() {
                if remaining == 0 {
                    return bytes + i;
                }
                remaining -= 1;
            }
            bytes += chunk.len();
        }
        bytes
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self {
            rope: Rope::from(text),
            len: text.chars().count(),
        }
    }
}

impl std::fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for chunk in self.rope.iter_chunks(..) {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TextBuffer").field(&self.to_string()).finish()
    }
}
