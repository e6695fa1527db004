//! The scanner state machine.
//!
//! [`Scanner::next_token`] classifies one lexeme per call and advances the
//! cursor past it. State that must survive the end of a line (an open
//! string, open comments) lives in a caller-owned [`ScanState`].
//!
//! # Design
//!
//! Whitespace is checked first in every mode. After that the call
//! dispatches on [`Mode`]:
//!
//! - `Base` matches the first byte against the lexeme rules. A `"` or `(*`
//!   switches mode and falls straight into the string or comment
//!   sub-scanner within the same call.
//! - `InString` scans to an unescaped `"` or the end of the line.
//! - `InComment` scans `(*` / `*)` pairs until the depth returns to zero
//!   or the line ends.
//!
//! Every call on a non-exhausted cursor consumes at least one character,
//! and no input is an error: anything unmatched becomes a `Variable`.

use crate::cursor::Cursor;
use crate::source::{lines, strip_bom};
use crate::state::{Mode, ScanState};
use crate::token::{Span, Token};
use crate::words::WordTable;
use crate::Category;

/// Scanner for OCaml-like cells. Immutable; share it freely.
#[derive(Clone, Debug, Default)]
pub struct Scanner {
    words: WordTable,
}

impl Scanner {
    /// Create a scanner over the given word tables.
    pub fn new(words: WordTable) -> Self {
        Self { words }
    }

    /// Scanner with the default OCaml word tables.
    pub fn ocaml() -> Self {
        Self::new(WordTable::ocaml())
    }

    /// Word tables used for identifier classification.
    pub fn words(&self) -> &WordTable {
        &self.words
    }

    /// State for the start of a new source unit.
    #[inline]
    pub fn start_state(&self) -> ScanState {
        ScanState::new()
    }

    /// Classify the next lexeme and advance `cursor` past it.
    ///
    /// Marks the cursor's lexeme start, so after the call
    /// [`Cursor::lexeme`] is exactly the text that was classified.
    ///
    /// # Contract
    ///
    /// The cursor must not be at end of line. Calling anyway consumes
    /// nothing and returns [`Category::Whitespace`].
    pub fn next_token(&self, cursor: &mut Cursor<'_>, state: &mut ScanState) -> Category {
        cursor.mark_start();
        if cursor.is_eol() || cursor.eat_whitespace() {
            return Category::Whitespace;
        }
        let category = match state.mode() {
            Mode::Base => self.base(cursor, state),
            Mode::InString => string(cursor, state),
            Mode::InComment => comment(cursor, state),
        };
        debug_assert!(cursor.pos() > cursor.start(), "scanner made no progress");
        debug_assert!(state.is_consistent(), "inconsistent state {state:?}");
        category
    }

    // ─── Base Mode ──────────────────────────────────────────────────

    #[inline]
    fn base(&self, cursor: &mut Cursor<'_>, state: &mut ScanState) -> Category {
        match cursor.current() {
            b'"' => {
                cursor.advance(); // consume opening '"'
                state.enter_string();
                string(cursor, state)
            }
            b'(' if cursor.peek() == b'*' => {
                cursor.advance_n(2); // consume '(*'
                state.open_comment();
                comment(cursor, state)
            }
            b'~' => prefixed_word(cursor, Category::LabeledVariable),
            b'`' => prefixed_word(cursor, Category::QuotedSymbol),
            b'0'..=b'9' => number(cursor),
            b'+' | b'-' | b'*' | b'&' | b'%' | b'=' | b'<' | b'>' | b'!' | b'?' | b'|' => {
                cursor.advance();
                Category::Operator
            }
            _ => self.word(cursor),
        }
    }

    /// Default rule: the current character, then any word characters.
    ///
    /// The first character may be anything (`(`, `.`, a non-ASCII letter);
    /// it is always consumed so the scanner makes progress.
    fn word(&self, cursor: &mut Cursor<'_>) -> Category {
        cursor.advance_char();
        cursor.eat_while(is_word);
        self.words.classify(cursor.lexeme())
    }

    // ─── Line & Document Helpers ────────────────────────────────────

    /// Iterate over the tokens of one line, carrying `state` in and out.
    ///
    /// Tokens cover the line exactly: spans are contiguous, start at 0 and
    /// end at `line.len()`. Whitespace tokens are included.
    pub fn tokenize_line<'a, 's>(
        &'s self,
        line: &'a str,
        state: &'s mut ScanState,
    ) -> LineTokens<'a, 's> {
        LineTokens {
            scanner: self,
            cursor: Cursor::new(line),
            state,
        }
    }

    /// Tokenize consecutive lines of one source unit, carrying `state`
    /// across them. Returns one token vector per line, with line-relative
    /// spans.
    pub fn highlight_lines<'a, I>(&self, lines: I, state: &mut ScanState) -> Vec<Vec<Token>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| {
                let tokens: Vec<Token> = self.tokenize_line(line, state).collect();
                if !state.is_base() {
                    tracing::trace!(
                        line = index,
                        mode = ?state.mode(),
                        depth = state.comment_depth(),
                        "scan state carried past end of line"
                    );
                }
                tokens
            })
            .collect()
    }

    /// Tokenize a whole source unit from a fresh state.
    ///
    /// Spans are relative to `source`. A leading BOM and line terminators
    /// are not covered by any token. Offsets saturate at `u32::MAX`, so
    /// spans past 4 GiB are clamped rather than wrapped.
    pub fn tokenize(&self, source: &str) -> Vec<Token> {
        let (text, _) = strip_bom(source);
        let base = u32::try_from(source.len() - text.len()).unwrap_or(0);
        let mut state = self.start_state();
        let mut tokens = Vec::new();
        for line in lines(text) {
            let offset = base.saturating_add(line.offset);
            tokens.extend(
                self.tokenize_line(line.text, &mut state)
                    .map(|tok| tok.shifted(offset)),
            );
        }
        if !state.is_base() {
            tracing::debug!(
                mode = ?state.mode(),
                depth = state.comment_depth(),
                "source ended inside a string or comment"
            );
        }
        tokens
    }
}

// ─── Sub-scanners ───────────────────────────────────────────────────

/// `~label` or `` `Tag ``: the prefix, then word characters.
fn prefixed_word(cursor: &mut Cursor<'_>, category: Category) -> Category {
    cursor.advance(); // consume '~' or '`'
    cursor.eat_while(is_word);
    category
}

/// Digits, then optionally `.` and more digits. No exponent, no sign.
fn number(cursor: &mut Cursor<'_>) -> Category {
    cursor.eat_while(|b| b.is_ascii_digit());
    if cursor.eat(b'.') {
        cursor.eat_while(|b| b.is_ascii_digit());
    }
    Category::Number
}

/// String body, entered just after the opening quote or at the start of a
/// continuation line.
///
/// A backslash escapes exactly the next character. The escape does not
/// carry over a line break: a line ending in `\` leaves the string open
/// and the next line starts unescaped.
fn string(cursor: &mut Cursor<'_>, state: &mut ScanState) -> Category {
    loop {
        // SIMD-accelerated skip past ordinary string content
        match cursor.skip_to_string_delim() {
            b'"' => {
                cursor.advance(); // consume closing '"'
                state.leave_string();
                return Category::String;
            }
            b'\\' => {
                cursor.advance(); // consume '\'
                cursor.advance_char(); // skip escaped char (no-op at end of line)
            }
            _ => return Category::String, // end of line: string stays open
        }
    }
}

/// Comment body, entered just after `(*` or at the start of a
/// continuation line.
///
/// Nesting follows adjacent pairs of consumed characters: `(` then `*`
/// opens, `*` then `)` closes. The pair window starts empty on every call,
/// so the `*` of the opener cannot pair with a following `)`.
fn comment(cursor: &mut Cursor<'_>, state: &mut ScanState) -> Category {
    let mut prev = 0u8;
    while state.comment_depth() > 0 {
        if cursor.skip_to_comment_delim() > 0 {
            prev = 0;
        }
        if cursor.is_eol() {
            break;
        }
        let next = cursor.current();
        cursor.advance();
        match (prev, next) {
            (b'(', b'*') => state.open_comment(),
            (b'*', b')') => state.close_comment(),
            _ => {}
        }
        prev = next;
    }
    Category::Comment
}

/// Iterator over the tokens of one line. Created by
/// [`Scanner::tokenize_line`].
pub struct LineTokens<'a, 's> {
    scanner: &'s Scanner,
    cursor: Cursor<'a>,
    state: &'s mut ScanState,
}

impl Iterator for LineTokens<'_, '_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.cursor.is_eol() {
            return None;
        }
        let category = self.scanner.next_token(&mut self.cursor, self.state);
        Some(Token::new(
            category,
            Span::new(self.cursor.start(), self.cursor.pos()),
        ))
    }
}

/// 256-byte lookup table for word characters: `[A-Za-z0-9_]`.
/// The end-of-line byte (0x00) maps to `false`, terminating loops.
#[allow(
    clippy::cast_possible_truncation,
    reason = "loop counter i is 0..=255, always fits in u8"
)]
static IS_WORD_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut i = 0u16;
    while i < 256 {
        table[i as usize] = matches!(
            i as u8,
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_'
        );
        i += 1;
    }
    table
};

/// Returns `true` if `b` is a word character.
#[inline]
pub fn is_word(b: u8) -> bool {
    IS_WORD_TABLE[b as usize]
}

/// Convenience function: tokenize a source unit with the default tables.
///
/// For incremental, line-at-a-time use construct a [`Scanner`] and call
/// [`Scanner::tokenize_line`] or [`Scanner::next_token`] directly.
pub fn tokenize(source: &str) -> Vec<Token> {
    Scanner::ocaml().tokenize(source)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
