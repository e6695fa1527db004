//! Line-oriented lexical scanner for OCaml-like notebook cells.
//!
//! This crate is standalone: it knows nothing about notebooks or editors.
//! A host drives it one line at a time and keeps a [`ScanState`] per
//! source unit so strings and nested block comments can span lines.
//!
//! ```
//! use iocaml_scanner::{Category, Cursor, Scanner};
//!
//! let scanner = Scanner::ocaml();
//! let mut state = scanner.start_state();
//! let mut cursor = Cursor::new("let x = 1");
//! assert_eq!(scanner.next_token(&mut cursor, &mut state), Category::Keyword);
//! assert_eq!(cursor.lexeme(), "let");
//! ```

mod category;
mod cursor;
mod scanner;
pub mod source;
mod state;
mod token;
pub mod words;

pub use category::Category;
pub use cursor::{is_unicode_whitespace, is_whitespace, Cursor};
pub use scanner::{is_word, tokenize, LineTokens, Scanner};
pub use state::{Mode, ScanState};
pub use token::{Span, Token};
pub use words::WordTable;

/// Block comment delimiters of the language.
pub const BLOCK_COMMENT: (&str, &str) = ("(*", "*)");

/// Line comment marker of the language. It has none.
pub const LINE_COMMENT: Option<&str> = None;
