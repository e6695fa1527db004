//! Classified tokens and their byte spans.

use std::fmt;
use std::ops::Range;

use crate::Category;

/// Half-open byte range `start..end`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    #[inline]
    pub const fn len(self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Move the span right by `offset` bytes (line-relative to
    /// document-relative), saturating at `u32::MAX`.
    #[inline]
    pub const fn shifted(self, offset: u32) -> Self {
        Self {
            start: self.start.saturating_add(offset),
            end: self.end.saturating_add(offset),
        }
    }

    #[inline]
    pub fn range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// One scanned lexeme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub category: Category,
    pub span: Span,
}

impl Token {
    #[inline]
    pub const fn new(category: Category, span: Span) -> Self {
        Self { category, span }
    }

    /// Source text of this token. `source` must be the text the span is
    /// relative to.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.span.range()).unwrap_or_default()
    }

    #[must_use]
    #[inline]
    pub const fn shifted(self, offset: u32) -> Self {
        Self {
            category: self.category,
            span: self.span.shifted(offset),
        }
    }
}
