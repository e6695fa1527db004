//! CLI command implementations.
//!
//! Each command takes source text and returns the text to print, so the
//! binary only deals with arguments and I/O.

use std::fmt::Write as _;

use iocaml_scanner::Scanner;
use serde::Serialize;

use crate::render::highlight_html;
use crate::render::static_grammar::highlight_static;

/// One token in the JSON dump.
#[derive(Debug, Serialize)]
struct TokenRecord<'a> {
    category: &'static str,
    style: Option<&'static str>,
    start: u32,
    end: u32,
    text: &'a str,
}

/// Debug dump of every non-whitespace token, one per line.
pub fn lex_output(scanner: &Scanner, path: &str, source: &str) -> String {
    let tokens: Vec<_> = scanner
        .tokenize(source)
        .into_iter()
        .filter(|t| !t.category.is_trivia())
        .collect();
    let mut out = format!("Tokens for '{}' ({} tokens):\n", path, tokens.len());
    for tok in &tokens {
        let _ = writeln!(
            out,
            "  {} @ {} {:?}",
            tok.category,
            tok.span,
            tok.text(source)
        );
    }
    out
}

/// Highlighted HTML for the whole source.
pub fn html_output(scanner: &Scanner, source: &str) -> String {
    let mut out = highlight_html(scanner, source);
    out.push('\n');
    out
}

/// Static-block HTML for the whole source, using the scanner's word
/// tables.
pub fn static_html_output(scanner: &Scanner, source: &str) -> String {
    let mut out = highlight_static(scanner.words(), source);
    out.push('\n');
    out
}

/// Pretty-printed JSON array of every non-whitespace token.
pub fn json_output(scanner: &Scanner, source: &str) -> Result<String, serde_json::Error> {
    let records: Vec<TokenRecord<'_>> = scanner
        .tokenize(source)
        .into_iter()
        .filter(|t| !t.category.is_trivia())
        .map(|t| TokenRecord {
            category: t.category.name(),
            style: t.category.style(),
            start: t.span.start,
            end: t.span.end,
            text: t.text(source),
        })
        .collect();
    let mut out = serde_json::to_string_pretty(&records)?;
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
