//! Keyword and builtin word tables.
//!
//! Two sets, checked in order:
//! 1. **Keywords**: reserved words of the language.
//! 2. **Builtins**: predefined types and values.
//!
//! A word present in both sets is a keyword. Matching is exact and
//! case-sensitive: `letter` is not `let`, `Let` is not `let`.
//!
//! The tables are built once and never mutated. A [`crate::Scanner`] owns
//! one and only reads from it.

use rustc_hash::FxHashSet;

use crate::Category;

/// Reserved words of the OCaml-like cell language.
pub const KEYWORDS: &[&str] = &[
    "and",
    "as",
    "assert",
    "begin",
    "class",
    "constraint",
    "do",
    "done",
    "downto",
    "else",
    "end",
    "exception",
    "extern",
    "external",
    "for",
    "fun",
    "function",
    "functor",
    "if",
    "in",
    "include",
    "inherit",
    "initializer",
    "lazy",
    "let",
    "match",
    "method",
    "module",
    "mutable",
    "new",
    "of",
    "open",
    "or",
    "private",
    "rec",
    "sig",
    "struct",
    "then",
    "to",
    "try",
    "type",
    "val",
    "virtual",
    "when",
    "while",
    "with",
];

/// Predefined types and values.
pub const BUILTINS: &[&str] = &[
    "bool",
    "char",
    "float",
    "int",
    "list",
    "unit",
    "array",
    "exn",
    "option",
    "int32",
    "int64",
    "nativeint",
    "format4",
    "format6",
    "lazy_t",
    "in_channel",
    "out_channel",
    "string",
    "true",
    "false",
    "ignore",
];

/// Words classified as keywords even though they also appear among the
/// builtins.
pub const KEYWORD_OVERRIDES: &[&str] = &["false"];

/// Immutable keyword/builtin lookup.
#[derive(Clone, Debug)]
pub struct WordTable {
    keywords: FxHashSet<Box<str>>,
    builtins: FxHashSet<Box<str>>,
    /// Length of the longest word in either set. Longer lexemes are
    /// rejected without hashing.
    max_len: usize,
}

impl WordTable {
    /// Build a table from arbitrary keyword and builtin sets.
    pub fn new<K, B>(keywords: K, builtins: B) -> Self
    where
        K: IntoIterator,
        K::Item: Into<Box<str>>,
        B: IntoIterator,
        B::Item: Into<Box<str>>,
    {
        let keywords: FxHashSet<Box<str>> = keywords.into_iter().map(Into::into).collect();
        let builtins: FxHashSet<Box<str>> = builtins.into_iter().map(Into::into).collect();
        let max_len = keywords
            .iter()
            .chain(builtins.iter())
            .map(|w| w.len())
            .max()
            .unwrap_or(0);
        Self {
            keywords,
            builtins,
            max_len,
        }
    }

    /// The default tables: [`KEYWORDS`] plus [`KEYWORD_OVERRIDES`], and
    /// [`BUILTINS`].
    pub fn ocaml() -> Self {
        Self::new(
            KEYWORDS.iter().chain(KEYWORD_OVERRIDES).copied(),
            BUILTINS.iter().copied(),
        )
    }

    /// Classify a complete word. Keywords win over builtins; anything
    /// else is a variable.
    #[inline]
    pub fn classify(&self, word: &str) -> Category {
        if word.is_empty() || word.len() > self.max_len {
            return Category::Variable;
        }
        if self.keywords.contains(word) {
            Category::Keyword
        } else if self.builtins.contains(word) {
            Category::Builtin
        } else {
            Category::Variable
        }
    }

    /// Returns `true` if `word` is in the keyword set.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    /// Returns `true` if `word` is in the builtin set.
    pub fn is_builtin(&self, word: &str) -> bool {
        self.builtins.contains(word)
    }

    /// Number of keywords.
    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    /// Number of builtins.
    pub fn builtin_count(&self) -> usize {
        self.builtins.len()
    }

    /// Iterate over the keywords in unspecified order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(AsRef::as_ref)
    }

    /// Iterate over the builtins in unspecified order.
    pub fn builtins(&self) -> impl Iterator<Item = &str> {
        self.builtins.iter().map(AsRef::as_ref)
    }
}

impl Default for WordTable {
    fn default() -> Self {
        Self::ocaml()
    }
}
