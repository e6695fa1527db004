//! Cursor over a single line of source text.
//!
//! The cursor advances through the line byte-by-byte and remembers where
//! the current lexeme started, so the scanner can classify the text it
//! just consumed. Reads past the end of the line return `0x00`, which acts
//! as a virtual sentinel: every byte classification predicate used by the
//! scanner rejects it, so `eat_while` loops terminate without explicit
//! bounds checks at the call site.
//!
//! # Interior Null Bytes
//!
//! A line may contain U+0000. [`Cursor::current`] returns `0x00` for both
//! an interior null and the end of the line; use [`Cursor::is_eol`] to
//! tell them apart.

/// Cursor over one line of text.
///
/// The cursor is [`Copy`], enabling cheap snapshots for lookahead.
///
/// # Invariant
///
/// `start <= pos <= len`, and both positions fall on UTF-8 character
/// boundaries of `line` whenever control returns to the caller.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    line: &'a str,
    /// Current read position (byte index into `line`).
    pos: u32,
    /// Start of the lexeme being scanned.
    start: u32,
    /// Length of `line` in bytes, saturated to `u32::MAX`.
    len: u32,
}

/// Size assertion: `&str` = 16, three `u32`s = 12, padded to 32 bytes.
const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 32);

impl<'a> Cursor<'a> {
    /// Create a cursor at the beginning of `line`.
    ///
    /// Lines longer than `u32::MAX` bytes are truncated to that length.
    pub fn new(line: &'a str) -> Self {
        let len = u32::try_from(line.len()).unwrap_or(u32::MAX);
        Self {
            line,
            pos: 0,
            start: 0,
            len,
        }
    }

    /// Returns the byte at the current position, or `0x00` at end of line.
    #[inline]
    pub fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    /// Returns the byte one position ahead of current, or `0x00`.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.byte_at(self.pos.saturating_add(1))
    }

    #[inline]
    fn byte_at(&self, pos: u32) -> u8 {
        if pos < self.len {
            self.line.as_bytes()[pos as usize]
        } else {
            0
        }
    }

    /// Advance the cursor by one byte.
    ///
    /// Only call this when the current byte is ASCII; use
    /// [`advance_char`](Self::advance_char) otherwise.
    #[inline]
    pub fn advance(&mut self) {
        debug_assert!(!self.is_eol(), "advance past end of line");
        self.pos += 1;
    }

    /// Advance the cursor by `n` ASCII bytes.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        debug_assert!(self.pos + n <= self.len, "advance_n past end of line");
        self.pos += n;
    }

    /// Returns the number of bytes in the UTF-8 character starting with `byte`.
    ///
    /// - `0xC0..=0xDF`: 2 bytes
    /// - `0xE0..=0xEF`: 3 bytes
    /// - `0xF0..=0xF7`: 4 bytes
    /// - Everything else (ASCII, continuation, invalid): 1 byte
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Advance past one full UTF-8 character. No-op at end of line.
    #[inline]
    pub fn advance_char(&mut self) {
        if self.is_eol() {
            return;
        }
        let width = Self::utf8_char_width(self.current());
        self.pos = (self.pos + width).min(self.len);
    }

    /// Returns `true` once every byte of the line has been consumed.
    #[inline]
    pub fn is_eol(&self) -> bool {
        self.pos >= self.len
    }

    /// Current byte offset in the line.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Byte offset where the current lexeme started.
    #[inline]
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Length of the line in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Returns `true` if the line is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Mark the current position as the start of a new lexeme.
    #[inline]
    pub fn mark_start(&mut self) {
        self.start = self.pos;
    }

    /// Text consumed since the last [`mark_start`](Self::mark_start).
    pub fn lexeme(&self) -> &'a str {
        self.slice(self.start, self.pos)
    }

    /// Text that has not been consumed yet.
    pub fn rest(&self) -> &'a str {
        self.slice(self.pos, self.len)
    }

    /// Extract a substring of the line.
    ///
    /// Returns the empty string if `start..end` is out of bounds or does
    /// not fall on character boundaries.
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        self.line
            .get(start as usize..end as usize)
            .unwrap_or_default()
    }

    /// Consume `byte` if it is the current byte.
    #[inline]
    pub fn eat(&mut self, byte: u8) -> bool {
        if !self.is_eol() && self.current() == byte {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Advance while `pred` returns `true` for the current byte.
    ///
    /// # Contract
    ///
    /// `pred(0)` must return `false`, and `pred` must only accept ASCII
    /// bytes, so the cursor never stops inside a multi-byte character.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eol() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Consume a run of whitespace, ASCII or Unicode (see
    /// [`is_unicode_whitespace`]). Returns `true` if anything was consumed.
    #[inline]
    pub fn eat_whitespace(&mut self) -> bool {
        let before = self.pos;
        loop {
            self.eat_while(is_whitespace);
            if self.current() < 0x80 {
                break;
            }
            match self.rest().chars().next() {
                Some(c) if is_unicode_whitespace(c) => self.advance_char(),
                _ => break,
            }
        }
        self.pos > before
    }

    /// Advance to the next `"` or `\` in the line using SIMD-accelerated
    /// search. Returns the byte found, or 0 when the line ran out.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset < remaining.len() <= len which fits in u32"
    )]
    pub fn skip_to_string_delim(&mut self) -> u8 {
        let remaining = &self.line.as_bytes()[self.pos as usize..self.len as usize];
        if let Some(offset) = memchr::memchr2(b'"', b'\\', remaining) {
            self.pos += offset as u32;
            self.current()
        } else {
            self.pos = self.len;
            0
        }
    }

    /// Advance to the next `(`, `*`, or `)` in the line.
    ///
    /// Returns the number of bytes skipped. Bytes between comment
    /// delimiters never take part in nesting, so the comment scanner can
    /// jump over them wholesale.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset < remaining.len() <= len which fits in u32"
    )]
    pub fn skip_to_comment_delim(&mut self) -> u32 {
        let start = self.pos;
        let remaining = &self.line.as_bytes()[self.pos as usize..self.len as usize];
        match memchr::memchr3(b'(', b'*', b')', remaining) {
            Some(offset) => self.pos += offset as u32,
            None => self.pos = self.len,
        }
        self.pos - start
    }
}

/// Whitespace separating lexemes: space, tab, vertical tab, form feed,
/// carriage return and line feed.
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\x0B' | b'\x0C' | b'\r' | b'\n')
}

/// Non-ASCII whitespace that separates lexemes like a space does: no-break
/// space, the Unicode space separators, line/paragraph separators and the
/// zero-width no-break space.
#[inline]
pub fn is_unicode_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
