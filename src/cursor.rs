//! Offset arithmetic over a flat source buffer.
//!
//! Every search answers with an `Option<usize>` offset into the buffer, so a
//! failed search has to be handled before it can take part in any arithmetic.
//!
//! All delimiters searched for are ASCII, so every offset returned here is on
//! a `char` boundary and can be used to slice the source directly.
use memchr::{memchr, memmem};
use std::ops::Range;

/// Returns true for the six whitespace bytes recognized between markup:
/// space, tab, newline, carriage return, form feed and vertical tab.
#[inline]
#[must_use]
pub fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

/// Trims the whitespace recognized by [`is_space`] from both ends of `text`.
#[must_use]
pub fn trim(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_ascii() && is_space(c as u8))
}

/// A read-only view of the source buffer being parsed.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'src> {
    text: &'src str,
}
impl<'src> Cursor<'src> {
    /// Creates a cursor over the given text.
    #[must_use]
    pub fn new(text: &'src str) -> Self {
        Self { text }
    }

    /// Returns the length of the source buffer in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Return true if the buffer is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the text between two offsets.
    ///
    /// Both offsets must come from searches on this cursor.
    #[inline]
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> &'src str {
        &self.text[range]
    }

    /// Returns the byte at `offset`, if the buffer extends that far.
    #[inline]
    #[must_use]
    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        self.text.as_bytes().get(offset).copied()
    }

    /// Returns true if the buffer holds `prefix` at `offset`.
    #[inline]
    #[must_use]
    pub fn starts_with(&self, offset: usize, prefix: &str) -> bool {
        self.rest(offset)
            .is_some_and(|rest| rest.starts_with(prefix.as_bytes()))
    }

    /// The offset of the next `<` at or after `from`.
    #[must_use]
    pub fn find_next_tag_start(&self, from: usize) -> Option<usize> {
        self.find_byte(from, b'<')
    }

    /// The earliest offset at or after `from` holding whitespace.
    #[must_use]
    pub fn first_whitespace(&self, from: usize) -> Option<usize> {
        self.first_whitespace_before(from, self.len())
    }

    /// Like [`Cursor::first_whitespace`], but only searches up to `limit`.
    #[must_use]
    pub fn first_whitespace_before(&self, from: usize, limit: usize) -> Option<usize> {
        let window = self.window(from, limit)?;
        window.iter().position(|b| is_space(*b)).map(|i| from + i)
    }

    /// The first offset at or after `from` that does not hold whitespace.
    ///
    /// Returns the buffer length if only whitespace remains.
    #[must_use]
    pub fn skip_whitespace(&self, from: usize) -> usize {
        match self.rest(from) {
            Some(rest) => rest
                .iter()
                .position(|b| !is_space(*b))
                .map_or(self.len(), |i| from + i),
            None => self.len(),
        }
    }

    /// The offset of the next occurrence of `byte` at or after `from`.
    #[must_use]
    pub fn find_byte(&self, from: usize, byte: u8) -> Option<usize> {
        self.find_byte_before(from, self.len(), byte)
    }

    /// Like [`Cursor::find_byte`], but only searches up to `limit`.
    #[must_use]
    pub fn find_byte_before(&self, from: usize, limit: usize, byte: u8) -> Option<usize> {
        let window = self.window(from, limit)?;
        memchr(byte, window).map(|i| from + i)
    }

    /// The offset of the next occurrence of `needle` at or after `from`.
    #[must_use]
    pub fn find(&self, from: usize, needle: &str) -> Option<usize> {
        self.find_before(from, self.len(), needle)
    }

    /// Like [`Cursor::find`], but the whole of `needle` must end by `limit`.
    #[must_use]
    pub fn find_before(&self, from: usize, limit: usize, needle: &str) -> Option<usize> {
        let window = self.window(from, limit)?;
        memmem::find(window, needle.as_bytes()).map(|i| from + i)
    }

    /// The earliest occurrence of any of `needles` at or after `from`.
    ///
    /// Returns the offset and the index of the needle found there. When two
    /// needles match at the same offset, the one listed first wins.
    ///
    /// Each search stops where the best match so far starts, so list the
    /// needle expected nearest first.
    #[must_use]
    pub fn find_any(&self, from: usize, needles: &[&str]) -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize)> = None;
        for (index, needle) in needles.iter().enumerate() {
            let limit = best.map_or(self.len(), |(offset, _)| (offset + needle.len()).saturating_sub(1));
            if let Some(offset) = self.find_before(from, limit, needle) {
                if best.is_none_or(|(best, _)| offset < best) {
                    best = Some((offset, index));
                }
            }
        }

        best
    }

    /// Finds the `</name>` closing the element whose content starts at `from`.
    ///
    /// Same-named elements opened in between must be closed first, so
    /// `<a><a>x</a></a>` closes the outer `a` at the second `</a>`.
    /// Self-closing `<name/>` tags do not nest. The search stops at `limit`.
    ///
    /// Returns the range of the whole close tag, `<` through `>`.
    #[must_use]
    pub fn find_matching_close(&self, from: usize, limit: usize, name: &str) -> Option<Range<usize>> {
        let limit = limit.min(self.len());
        let mut depth = 0usize;
        let mut pos = from;

        while let Some(lt) = self.find_next_tag_start(pos).filter(|lt| *lt < limit) {
            if self.byte_at(lt + 1) == Some(b'/') {
                let name_start = lt + 2;
                if self.starts_with(name_start, name) {
                    let gt = self.skip_whitespace(name_start + name.len());
                    if gt < limit && self.byte_at(gt) == Some(b'>') {
                        if depth == 0 {
                            return Some(lt..gt + 1);
                        }
                        depth -= 1;
                    }
                }
                pos = name_start;
            } else if self.is_open_tag_named(lt, name) {
                let gt = self.find_byte(lt + 1, b'>')?;
                if self.byte_at(gt - 1) != Some(b'/') {
                    depth += 1;
                }
                pos = gt + 1;
            } else {
                pos = lt + 1;
            }
        }

        None
    }

    /// Calculates the 1-based line and column of `offset`.
    ///
    /// Warning: This walks the buffer from the start. Use [`Cursor::position_from`]
    /// when positions are needed in increasing order.
    #[must_use]
    pub fn position(&self, offset: usize) -> (usize, usize) {
        self.position_from(0, (1, 1), offset)
    }

    /// Continues a line and column count from `from`, whose position is `start`,
    /// up to `offset`.
    ///
    /// Only the text between the two offsets is walked. If `offset` is before
    /// `from`, or `from` is not a `char` boundary, `start` is returned.
    #[must_use]
    pub fn position_from(&self, from: usize, start: (usize, usize), offset: usize) -> (usize, usize) {
        let (mut row, mut col) = start;
        let Some(text) = self.text.get(from..offset.min(self.len())) else {
            return start;
        };

        for c in text.chars() {
            if c == '\n' {
                row += 1;
                col = 1;
            } else {
                col += 1;
            }
        }

        (row, col)
    }

    fn is_open_tag_named(&self, lt: usize, name: &str) -> bool {
        let name_start = lt + 1;
        self.starts_with(name_start, name)
            && self
                .byte_at(name_start + name.len())
                .is_some_and(|b| is_space(b) || b == b'>' || b == b'/')
    }

    fn rest(&self, from: usize) -> Option<&'src [u8]> {
        self.text.as_bytes().get(from..)
    }

    fn window(&self, from: usize, limit: usize) -> Option<&'src [u8]> {
        self.text.as_bytes().get(from..limit.min(self.len()))
    }
}
