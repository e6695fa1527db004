//! Token categories.
//!
//! A [`Category`] is the only thing the scanner reports about a lexeme.
//! Highlighting hosts map categories to style names via
//! [`Category::style`]; whitespace has no style.

use std::fmt;

/// Classification of one scanned lexeme.
///
/// Uses `#[repr(u8)]` so per-line token caches stay one byte per tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Category {
    /// Reserved word (`let`, `match`, `false`, ...).
    Keyword = 0,
    /// Predefined type or value (`int`, `string`, `ignore`, ...).
    Builtin = 1,
    /// String literal, including an unterminated or continued one.
    String = 2,
    /// Block comment `(* ... *)`, or the part of it on this line.
    Comment = 3,
    /// Decimal integer or float.
    Number = 4,
    /// Single-character operator.
    Operator = 5,
    /// Identifier, or any run the other rules do not claim.
    Variable = 6,
    /// Polymorphic variant tag: `` `Foo ``.
    QuotedSymbol = 7,
    /// Labeled argument: `~foo`.
    LabeledVariable = 8,
    /// Whitespace. Not emitted as a styled token.
    Whitespace = 9,
}

impl Category {
    /// All categories in discriminant order.
    pub const ALL: [Category; 10] = [
        Category::Keyword,
        Category::Builtin,
        Category::String,
        Category::Comment,
        Category::Number,
        Category::Operator,
        Category::Variable,
        Category::QuotedSymbol,
        Category::LabeledVariable,
        Category::Whitespace,
    ];

    /// Style name understood by CodeMirror-style editors, or `None` for
    /// whitespace.
    pub const fn style(self) -> Option<&'static str> {
        match self {
            Category::Keyword => Some("keyword"),
            Category::Builtin => Some("builtin"),
            Category::String => Some("string"),
            Category::Comment => Some("comment"),
            Category::Number => Some("number"),
            Category::Operator => Some("operator"),
            Category::Variable => Some("variable"),
            Category::QuotedSymbol => Some("quote"),
            Category::LabeledVariable => Some("variable-2"),
            Category::Whitespace => None,
        }
    }

    /// Human-readable name, used in debug dumps.
    pub const fn name(self) -> &'static str {
        match self {
            Category::Keyword => "keyword",
            Category::Builtin => "builtin",
            Category::String => "string",
            Category::Comment => "comment",
            Category::Number => "number",
            Category::Operator => "operator",
            Category::Variable => "variable",
            Category::QuotedSymbol => "quoted-symbol",
            Category::LabeledVariable => "labeled-variable",
            Category::Whitespace => "whitespace",
        }
    }

    /// Returns `true` for categories a host should not style.
    #[inline]
    pub const fn is_trivia(self) -> bool {
        matches!(self, Category::Whitespace)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
