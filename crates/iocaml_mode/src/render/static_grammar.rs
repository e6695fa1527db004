//! Whole-document OCaml grammar for static code blocks.
//!
//! Rendered output (help text, exported notebooks) is highlighted by a
//! second, simpler rule set than the editor scanner. It sees the whole
//! block at once and has no line state:
//!
//! - `"""…"""` strings, `'…'` and `"…"` strings with backslash escapes
//! - `(* … *)` and `/* … */` comments, neither of which nests
//! - `type` declarations, up to `(`, `=` or end of line, with every
//!   identifier in them marked as a title
//! - `[< … >]` annotations
//! - C-style numbers: `0x1F`, `12`, `1.5`, `.5`, `2e-3`
//! - keywords and builtins from a [`WordTable`], keyword first
//!
//! Unterminated delimited rules run to the end of the block.

use std::fmt;

use iocaml_scanner::{is_unicode_whitespace, is_whitespace, is_word, WordTable};

use super::escape_into;

/// Class attached to a highlighted span.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StaticClass {
    Keyword,
    BuiltIn,
    String,
    Comment,
    /// A `type` declaration head.
    Class,
    /// A name inside a `type` declaration head.
    Title,
    Annotation,
    Number,
}

impl StaticClass {
    /// CSS class name written into the `<span>`.
    pub const fn name(self) -> &'static str {
        match self {
            StaticClass::Keyword => "keyword",
            StaticClass::BuiltIn => "built_in",
            StaticClass::String => "string",
            StaticClass::Comment => "comment",
            StaticClass::Class => "class",
            StaticClass::Title => "title",
            StaticClass::Annotation => "annotation",
            StaticClass::Number => "number",
        }
    }
}

impl fmt::Display for StaticClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A rule that can begin at a given position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Rule {
    TripleString,
    Comment,
    /// `type` plus the whitespace character after it (its byte width).
    TypeDecl(usize),
    Annotation,
    CComment,
    Quoted(u8),
    /// End of the number literal.
    Number(usize),
}

/// Highlight `source` as one static block.
///
/// Returns HTML with `<span class="CLASS">` around highlighted runs; all
/// text is escaped.
pub fn highlight_static(words: &WordTable, source: &str) -> String {
    let mut hl = StaticHighlighter {
        words,
        src: source,
        out: String::with_capacity(source.len() * 2),
    };
    hl.block();
    hl.out
}

struct StaticHighlighter<'a> {
    words: &'a WordTable,
    src: &'a str,
    out: String,
}

impl StaticHighlighter<'_> {
    fn bytes(&self) -> &[u8] {
        self.src.as_bytes()
    }

    fn byte(&self, pos: usize) -> u8 {
        self.bytes().get(pos).copied().unwrap_or(0)
    }

    fn at_word_boundary(&self, pos: usize) -> bool {
        pos == 0 || !is_word(self.byte(pos - 1))
    }

    fn text(&mut self, start: usize, end: usize) {
        if start < end {
            let text = self.src.get(start..end).unwrap_or_default();
            escape_into(&mut self.out, text);
        }
    }

    fn span(&mut self, class: StaticClass, start: usize, end: usize) {
        self.open(class);
        self.text(start, end);
        self.out.push_str("</span>");
    }

    fn open(&mut self, class: StaticClass) {
        self.out.push_str("<span class=\"");
        self.out.push_str(class.name());
        self.out.push_str("\">");
    }

    // ─── Top Level ──────────────────────────────────────────────────

    fn block(&mut self) {
        let len = self.src.len();
        let mut pos = 0;
        let mut plain = 0;
        while pos < len {
            if let Some(rule) = self.rule_at(pos) {
                self.text(plain, pos);
                pos = self.apply(rule, pos);
                plain = pos;
                continue;
            }
            if is_word(self.byte(pos)) {
                let end = word_end(self.bytes(), pos);
                let word = self.src.get(pos..end).unwrap_or_default();
                let class = if self.words.is_keyword(word) {
                    Some(StaticClass::Keyword)
                } else if self.words.is_builtin(word) {
                    Some(StaticClass::BuiltIn)
                } else {
                    None
                };
                if let Some(class) = class {
                    self.text(plain, pos);
                    self.span(class, pos, end);
                    plain = end;
                }
                pos = end;
            } else {
                pos += 1;
            }
        }
        self.text(plain, len);
    }

    /// First rule that begins at `pos`, in priority order.
    fn rule_at(&self, pos: usize) -> Option<Rule> {
        let rest = &self.bytes()[pos..];
        let boundary = self.at_word_boundary(pos);
        if rest.starts_with(b"\"\"\"") {
            return Some(Rule::TripleString);
        }
        if rest.starts_with(b"(*") {
            return Some(Rule::Comment);
        }
        if boundary && rest.starts_with(b"type") {
            let after = self.src.get(pos + 4..).and_then(|s| s.chars().next());
            let is_space = |c: &char| {
                u8::try_from(*c).map_or_else(|_| is_unicode_whitespace(*c), is_whitespace)
            };
            if let Some(ws) = after.filter(is_space) {
                return Some(Rule::TypeDecl(ws.len_utf8()));
            }
        }
        if rest.starts_with(b"[<") {
            return Some(Rule::Annotation);
        }
        if rest.starts_with(b"/*") {
            return Some(Rule::CComment);
        }
        if let Some(&quote @ (b'\'' | b'"')) = rest.first() {
            return Some(Rule::Quoted(quote));
        }
        number_end(self.bytes(), pos, boundary).map(Rule::Number)
    }

    /// Emit `rule` starting at `pos`; returns the position after it.
    fn apply(&mut self, rule: Rule, pos: usize) -> usize {
        match rule {
            Rule::TripleString => self.delimited(StaticClass::String, pos, 3, "\"\"\""),
            Rule::Comment => self.delimited(StaticClass::Comment, pos, 2, "*)"),
            Rule::CComment => self.delimited(StaticClass::Comment, pos, 2, "*/"),
            Rule::Annotation => self.delimited(StaticClass::Annotation, pos, 2, ">]"),
            Rule::Quoted(quote) => self.quoted(pos, quote),
            Rule::Number(end) => {
                self.span(StaticClass::Number, pos, end);
                end
            }
            Rule::TypeDecl(ws_len) => self.type_decl(pos, ws_len),
        }
    }

    // ─── Rules ──────────────────────────────────────────────────────

    /// Opener of `open_len` bytes, then everything up to and including
    /// `close`.
    fn delimited(
        &mut self,
        class: StaticClass,
        pos: usize,
        open_len: usize,
        close: &str,
    ) -> usize {
        let body = pos + open_len;
        let end = self.src[body..]
            .find(close)
            .map_or(self.src.len(), |i| body + i + close.len());
        self.span(class, pos, end);
        end
    }

    /// `'…'` or `"…"`; a backslash escapes any one character.
    fn quoted(&mut self, pos: usize, quote: u8) -> usize {
        let bytes = self.bytes();
        let mut i = pos + 1;
        let end = loop {
            match bytes.get(i) {
                None => break bytes.len(),
                Some(&b) if b == quote => break i + 1,
                Some(b'\\') => {
                    i += 1;
                    i += self
                        .src
                        .get(i..)
                        .and_then(|s| s.chars().next())
                        .map_or(0, char::len_utf8);
                }
                Some(_) => i += 1,
            }
        };
        self.span(StaticClass::String, pos, end);
        end
    }

    /// `type` head: the keyword, then names as titles, up to and including
    /// `(` or `=`, or up to the end of the line.
    fn type_decl(&mut self, pos: usize, ws_len: usize) -> usize {
        self.open(StaticClass::Class);
        self.span(StaticClass::Keyword, pos, pos + 4);
        let mut i = pos + 4;
        let mut plain = i;
        i += ws_len;
        let len = self.src.len();
        loop {
            let b = self.byte(i);
            if i >= len || b == b'\n' || b == b'\r' {
                self.text(plain, i);
                break;
            }
            if b == b'(' || b == b'=' {
                self.text(plain, i + 1);
                i += 1;
                break;
            }
            if b.is_ascii_alphabetic() || b == b'_' {
                let end = word_end(self.bytes(), i);
                self.text(plain, i);
                self.span(StaticClass::Title, i, end);
                i = end;
                plain = i;
            } else {
                i += 1;
            }
        }
        self.out.push_str("</span>");
        i
    }
}

/// End of the run of word characters starting at `pos`.
fn word_end(bytes: &[u8], pos: usize) -> usize {
    bytes[pos..]
        .iter()
        .position(|&b| !is_word(b))
        .map_or(bytes.len(), |n| pos + n)
}

fn digits_end(bytes: &[u8], pos: usize) -> usize {
    bytes[pos..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map_or(bytes.len(), |n| pos + n)
}

/// End of a C-style number starting at `pos`, if one starts there.
///
/// Hex needs a word boundary before the `0`; decimals either start at a
/// word boundary with a digit, or with `.` and a digit anywhere.
fn number_end(bytes: &[u8], pos: usize, boundary: bool) -> Option<usize> {
    let at = |i: usize| bytes.get(i).copied().unwrap_or(0);

    if boundary
        && at(pos) == b'0'
        && matches!(at(pos + 1), b'x' | b'X')
        && at(pos + 2).is_ascii_hexdigit()
    {
        let end = bytes[pos + 2..]
            .iter()
            .position(|b| !b.is_ascii_hexdigit())
            .map_or(bytes.len(), |n| pos + 2 + n);
        return Some(end);
    }

    let mut end = if boundary && at(pos).is_ascii_digit() {
        let int_end = digits_end(bytes, pos);
        if at(int_end) == b'.' {
            digits_end(bytes, int_end + 1)
        } else {
            int_end
        }
    } else if at(pos) == b'.' && at(pos + 1).is_ascii_digit() {
        digits_end(bytes, pos + 1)
    } else {
        return None;
    };

    if matches!(at(end), b'e' | b'E') {
        let digits = if matches!(at(end + 1), b'+' | b'-') {
            end + 2
        } else {
            end + 1
        };
        if at(digits).is_ascii_digit() {
            end = digits_end(bytes, digits);
        }
    }
    Some(end)
}
