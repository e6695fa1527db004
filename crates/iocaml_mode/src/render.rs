//! HTML output: highlighted cells and pager text.

pub mod static_grammar;

use std::fmt::Write as _;

use iocaml_scanner::{source, Scanner};

use crate::host::PagerRendering;

/// URL schemes linked by [`pager_html`].
const LINK_SCHEMES: [&str; 3] = ["https", "http", "ftp"];

/// Render `source` as HTML, one `<span class="cm-STYLE">` per styled
/// token. Whitespace is emitted unwrapped; lines are joined with `\n`.
pub fn highlight_html(scanner: &Scanner, source: &str) -> String {
    let (text, _) = source::strip_bom(source);
    let mut state = scanner.start_state();
    let mut out = String::with_capacity(text.len() * 2);
    for (index, line) in source::lines(text).enumerate() {
        if index > 0 {
            out.push('\n');
        }
        for token in scanner.tokenize_line(line.text, &mut state) {
            let lexeme = token.text(line.text);
            match token.category.style() {
                Some(style) => {
                    let _ = write!(out, "<span class=\"cm-{style}\">");
                    escape_into(&mut out, lexeme);
                    out.push_str("</span>");
                }
                None => escape_into(&mut out, lexeme),
            }
        }
    }
    out
}

/// Render pager text.
///
/// [`PagerRendering::Html`] treats the text as markup: it is passed
/// through unescaped, with bare URLs linked, inside a `<div>`.
/// [`PagerRendering::Preformatted`] escapes it into a `<pre>` block.
pub fn pager_html(text: &str, rendering: PagerRendering) -> String {
    match rendering {
        PagerRendering::Html => format!("<div>{}</div>", auto_link_urls(text)),
        PagerRendering::Preformatted => {
            let mut out = String::from("<pre>");
            escape_into(&mut out, text);
            out.push_str("</pre>");
            out
        }
    }
}

/// Wrap bare URLs in `<a target="_blank">` links. Everything else is
/// copied as-is.
///
/// A URL is a known scheme, `:`, and at least one character that is not
/// whitespace or a quote or `>`. It must start the text or follow
/// whitespace.
pub fn auto_link_urls(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut at_boundary = true;
    while !rest.is_empty() {
        if at_boundary {
            if let Some(len) = url_len(rest) {
                let url = &rest[..len];
                let _ = write!(out, "<a target=\"_blank\" href=\"{url}\">{url}</a>");
                rest = &rest[len..];
                at_boundary = false;
                continue;
            }
        }
        let Some(ch) = rest.chars().next() else {
            break;
        };
        out.push(ch);
        at_boundary = ch.is_whitespace();
        rest = &rest[ch.len_utf8()..];
    }
    out
}

/// Length of the URL at the start of `text`, if there is one.
fn url_len(text: &str) -> Option<usize> {
    let scheme = LINK_SCHEMES.iter().find(|scheme| {
        text.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })?;
    let after = text[scheme.len()..].strip_prefix(':')?;
    let body = after
        .find(|c: char| c.is_whitespace() || matches!(c, '\'' | '"' | '>'))
        .unwrap_or(after.len());
    (body > 0).then_some(scheme.len() + 1 + body)
}

/// Append `text` to `out` with HTML special characters escaped.
pub fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}
