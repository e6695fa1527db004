//! Splitting a source unit into lines.
//!
//! The scanner works one line at a time. A source unit (one notebook code
//! cell) is split on `\n`, `\r\n` and lone `\r`; the terminators themselves
//! belong to no line. A trailing terminator does not start an extra line,
//! but an empty source is one empty line.

use memchr::memchr2;

/// UTF-8 byte order mark.
pub const UTF8_BOM: &str = "\u{FEFF}";

/// One line of a source unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Line<'a> {
    /// Byte offset of the first byte of the line in the source.
    pub offset: u32,
    /// Line text without its terminator.
    pub text: &'a str,
}

/// Iterator over the lines of a source unit. Created by [`lines`].
#[derive(Clone, Debug)]
pub struct Lines<'a> {
    source: &'a str,
    pos: usize,
    done: bool,
}

/// Split `source` into lines.
pub fn lines(source: &str) -> Lines<'_> {
    Lines {
        source,
        pos: 0,
        done: false,
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Line<'a>> {
        if self.done {
            return None;
        }
        let start = self.pos;
        let rest = &self.source[start..];
        let offset = u32::try_from(start).unwrap_or(u32::MAX);

        let Some(i) = memchr2(b'\n', b'\r', rest.as_bytes()) else {
            self.done = true;
            if rest.is_empty() && start > 0 {
                return None;
            }
            self.pos = self.source.len();
            return Some(Line { offset, text: rest });
        };

        let bytes = rest.as_bytes();
        let terminator = if bytes[i] == b'\r' && bytes.get(i + 1) == Some(&b'\n') {
            2
        } else {
            1
        };
        self.pos = start + i + terminator;
        if self.pos == self.source.len() {
            self.done = true;
        }
        Some(Line {
            offset,
            text: &rest[..i],
        })
    }
}

/// Strip a leading UTF-8 BOM. Returns the remaining text and whether a BOM
/// was present.
pub fn strip_bom(source: &str) -> (&str, bool) {
    match source.strip_prefix(UTF8_BOM) {
        Some(rest) => (rest, true),
        None => (source, false),
    }
}
