use pretty_assertions::assert_eq;

use super::*;
use crate::state::Mode;

/// Helper: scan one line from `state`, returning (category, text) pairs.
fn scan_from<'a>(line: &'a str, state: &mut ScanState) -> Vec<(Category, &'a str)> {
    let scanner = Scanner::ocaml();
    scanner
        .tokenize_line(line, state)
        .map(|tok| (tok.category, tok.text(line)))
        .collect()
}

/// Helper: scan one line from a fresh state.
fn scan(line: &str) -> Vec<(Category, &str)> {
    scan_from(line, &mut ScanState::new())
}

/// Helper: categories only, whitespace dropped.
fn categories(line: &str) -> Vec<Category> {
    scan(line)
        .into_iter()
        .map(|(c, _)| c)
        .filter(|c| !c.is_trivia())
        .collect()
}

// ─── next_token Contract ────────────────────────────────────────────

#[test]
fn start_state_is_base() {
    let state = Scanner::ocaml().start_state();
    assert_eq!(state.mode(), Mode::Base);
    assert_eq!(state.comment_depth(), 0);
}

#[test]
fn let_binding_category_sequence() {
    let scanner = Scanner::ocaml();
    let mut state = scanner.start_state();
    let mut cursor = Cursor::new("let x = 1");
    let mut seen = Vec::new();
    while !cursor.is_eol() {
        seen.push(scanner.next_token(&mut cursor, &mut state));
    }
    assert_eq!(
        seen,
        vec![
            Category::Keyword,
            Category::Whitespace,
            Category::Variable,
            Category::Whitespace,
            Category::Operator,
            Category::Whitespace,
            Category::Number,
        ]
    );
}

#[test]
fn lexeme_is_marked_after_each_call() {
    let scanner = Scanner::ocaml();
    let mut state = scanner.start_state();
    let mut cursor = Cursor::new("~label  `Tag");
    assert_eq!(
        scanner.next_token(&mut cursor, &mut state),
        Category::LabeledVariable
    );
    assert_eq!(cursor.lexeme(), "~label");
    assert_eq!(
        scanner.next_token(&mut cursor, &mut state),
        Category::Whitespace
    );
    assert_eq!(cursor.lexeme(), "  ");
    assert_eq!(
        scanner.next_token(&mut cursor, &mut state),
        Category::QuotedSymbol
    );
    assert_eq!(cursor.lexeme(), "`Tag");
}

#[test]
fn call_at_end_of_line_consumes_nothing() {
    let scanner = Scanner::ocaml();
    let mut state = scanner.start_state();
    let mut cursor = Cursor::new("x");
    scanner.next_token(&mut cursor, &mut state);
    assert!(cursor.is_eol());
    assert_eq!(
        scanner.next_token(&mut cursor, &mut state),
        Category::Whitespace
    );
    assert_eq!(cursor.pos(), 1);
}

// ─── Whitespace ─────────────────────────────────────────────────────

#[test]
fn whitespace_run_is_one_token() {
    assert_eq!(
        scan("a \t  b"),
        vec![
            (Category::Variable, "a"),
            (Category::Whitespace, " \t  "),
            (Category::Variable, "b"),
        ]
    );
}

#[test]
fn no_break_space_separates_words() {
    assert_eq!(
        scan("let\u{A0}x"),
        vec![
            (Category::Keyword, "let"),
            (Category::Whitespace, "\u{A0}"),
            (Category::Variable, "x"),
        ]
    );
}

#[test]
fn mixed_ascii_and_unicode_spaces_are_one_token() {
    assert_eq!(
        scan("1 \u{3000}\t2"),
        vec![
            (Category::Number, "1"),
            (Category::Whitespace, " \u{3000}\t"),
            (Category::Number, "2"),
        ]
    );
}

#[test]
fn leading_whitespace_in_string_continuation_is_ignored() {
    let mut state = ScanState::new();
    scan_from("\"abc", &mut state);
    assert_eq!(
        scan_from("   def\"", &mut state),
        vec![(Category::Whitespace, "   "), (Category::String, "def\"")]
    );
    assert!(state.is_base());
}

// ─── Keywords, Builtins, Variables ──────────────────────────────────

#[test]
fn keyword_exact_match() {
    assert_eq!(scan("let"), vec![(Category::Keyword, "let")]);
    assert_eq!(scan("letter"), vec![(Category::Variable, "letter")]);
}

#[test]
fn false_is_keyword_not_builtin() {
    assert_eq!(scan("false"), vec![(Category::Keyword, "false")]);
    assert_eq!(scan("true"), vec![(Category::Builtin, "true")]);
}

#[test]
fn builtin_types() {
    assert_eq!(
        categories("int list option in_channel"),
        vec![Category::Builtin; 4]
    );
}

#[test]
fn identifiers_with_digits_and_underscores() {
    assert_eq!(scan("x_1'"), vec![(Category::Variable, "x_1"), (Category::Variable, "'")]);
}

#[test]
fn unmatched_char_starts_variable_run() {
    assert_eq!(scan("(x"), vec![(Category::Variable, "(x")]);
    assert_eq!(scan(".foo"), vec![(Category::Variable, ".foo")]);
    assert_eq!(scan(";;"), vec![(Category::Variable, ";"), (Category::Variable, ";")]);
}

#[test]
fn lone_paren_is_variable() {
    assert_eq!(
        scan("( )"),
        vec![
            (Category::Variable, "("),
            (Category::Whitespace, " "),
            (Category::Variable, ")"),
        ]
    );
}

#[test]
fn keyword_after_punctuation_is_not_a_keyword() {
    // The unmatched char joins the word that follows it.
    assert_eq!(scan("(let"), vec![(Category::Variable, "(let")]);
}

#[test]
fn non_ascii_char_starts_a_word() {
    assert_eq!(
        scan("\u{3bb}x \u{1F600}"),
        vec![
            (Category::Variable, "\u{3bb}x"),
            (Category::Whitespace, " "),
            (Category::Variable, "\u{1F600}"),
        ]
    );
}

#[test]
fn interior_null_is_a_variable() {
    assert_eq!(scan("\0a"), vec![(Category::Variable, "\0a")]);
}

// ─── Labels & Variant Tags ──────────────────────────────────────────

#[test]
fn labeled_variable_includes_tilde() {
    assert_eq!(scan("~foo"), vec![(Category::LabeledVariable, "~foo")]);
}

#[test]
fn bare_tilde_is_labeled_variable() {
    assert_eq!(scan("~"), vec![(Category::LabeledVariable, "~")]);
}

#[test]
fn quoted_symbol_includes_backtick() {
    assert_eq!(
        scan("`Red `Green"),
        vec![
            (Category::QuotedSymbol, "`Red"),
            (Category::Whitespace, " "),
            (Category::QuotedSymbol, "`Green"),
        ]
    );
}

// ─── Numbers ────────────────────────────────────────────────────────

#[test]
fn integers_and_floats() {
    assert_eq!(scan("42"), vec![(Category::Number, "42")]);
    assert_eq!(scan("3.14"), vec![(Category::Number, "3.14")]);
}

#[test]
fn trailing_dot_belongs_to_number() {
    assert_eq!(scan("1."), vec![(Category::Number, "1.")]);
}

#[test]
fn only_one_dot_in_number() {
    assert_eq!(
        scan("1.2.3"),
        vec![(Category::Number, "1.2"), (Category::Variable, ".3")]
    );
}

#[test]
fn no_exponent_or_hex() {
    assert_eq!(
        scan("1e5"),
        vec![(Category::Number, "1"), (Category::Variable, "e5")]
    );
    assert_eq!(
        scan("0xFF"),
        vec![(Category::Number, "0"), (Category::Variable, "xFF")]
    );
}

#[test]
fn negative_sign_is_separate_operator() {
    assert_eq!(
        scan("-7"),
        vec![(Category::Operator, "-"), (Category::Number, "7")]
    );
}

// ─── Operators ──────────────────────────────────────────────────────

#[test]
fn operators_are_single_chars() {
    let tokens = scan("+-*&%=<>!?|");
    assert_eq!(tokens.len(), 11);
    assert!(tokens.iter().all(|(c, t)| *c == Category::Operator && t.len() == 1));
}

#[test]
fn compound_operators_split() {
    assert_eq!(
        scan("->"),
        vec![(Category::Operator, "-"), (Category::Operator, ">")]
    );
    assert_eq!(
        scan(":="),
        vec![(Category::Variable, ":"), (Category::Operator, "=")]
    );
}

#[test]
fn star_paren_in_base_mode_is_operator_then_variable() {
    assert_eq!(
        scan("*)"),
        vec![(Category::Operator, "*"), (Category::Variable, ")")]
    );
}

// ─── Strings ────────────────────────────────────────────────────────

#[test]
fn simple_string() {
    let mut state = ScanState::new();
    assert_eq!(
        scan_from("\"hello world\" x", &mut state),
        vec![
            (Category::String, "\"hello world\""),
            (Category::Whitespace, " "),
            (Category::Variable, "x"),
        ]
    );
    assert!(state.is_base());
}

#[test]
fn empty_string() {
    assert_eq!(scan("\"\""), vec![(Category::String, "\"\"")]);
}

#[test]
fn escaped_quote_does_not_terminate() {
    let mut state = ScanState::new();
    let line = r#""abc\"def""#;
    assert_eq!(scan_from(line, &mut state), vec![(Category::String, line)]);
    assert!(state.is_base());
}

#[test]
fn escaped_backslash_then_quote_terminates() {
    let mut state = ScanState::new();
    assert_eq!(
        scan_from(r#""a\\" b"#, &mut state),
        vec![
            (Category::String, r#""a\\""#),
            (Category::Whitespace, " "),
            (Category::Variable, "b"),
        ]
    );
    assert!(state.is_base());
}

#[test]
fn keywords_inside_string_are_string() {
    assert_eq!(
        scan("\"let (* x *)\""),
        vec![(Category::String, "\"let (* x *)\"")]
    );
}

#[test]
fn unterminated_string_continues_on_next_line() {
    let mut state = ScanState::new();
    assert_eq!(
        scan_from("\"abc", &mut state),
        vec![(Category::String, "\"abc")]
    );
    assert_eq!(state.mode(), Mode::InString);

    assert_eq!(
        scan_from("def\" x", &mut state),
        vec![
            (Category::String, "def\""),
            (Category::Whitespace, " "),
            (Category::Variable, "x"),
        ]
    );
    assert!(state.is_base());
}

#[test]
fn string_spans_several_lines() {
    let mut state = ScanState::new();
    scan_from("\"one", &mut state);
    assert_eq!(
        scan_from("two", &mut state),
        vec![(Category::String, "two")]
    );
    assert_eq!(state.mode(), Mode::InString);
    scan_from("three\"", &mut state);
    assert!(state.is_base());
}

#[test]
fn trailing_backslash_does_not_escape_next_line() {
    let mut state = ScanState::new();
    scan_from("\"abc\\", &mut state);
    assert_eq!(state.mode(), Mode::InString);
    assert_eq!(scan_from("\"", &mut state), vec![(Category::String, "\"")]);
    assert!(state.is_base());
}

#[test]
fn string_with_multibyte_escape() {
    let mut state = ScanState::new();
    let line = "\"\\\u{3bb}\"";
    assert_eq!(scan_from(line, &mut state), vec![(Category::String, line)]);
    assert!(state.is_base());
}

// ─── Comments ───────────────────────────────────────────────────────

#[test]
fn simple_comment() {
    let mut state = ScanState::new();
    assert_eq!(
        scan_from("(* hi *) x", &mut state),
        vec![
            (Category::Comment, "(* hi *)"),
            (Category::Whitespace, " "),
            (Category::Variable, "x"),
        ]
    );
    assert!(state.is_base());
}

#[test]
fn empty_comment() {
    let mut state = ScanState::new();
    assert_eq!(scan_from("(**)", &mut state), vec![(Category::Comment, "(**)")]);
    assert!(state.is_base());
}

#[test]
fn nested_comment_closes_at_outer_end() {
    let scanner = Scanner::ocaml();
    let mut state = scanner.start_state();
    let line = "(* a (* b *) c *)";
    let mut cursor = Cursor::new(line);

    assert_eq!(
        scanner.next_token(&mut cursor, &mut state),
        Category::Comment
    );
    assert_eq!(cursor.lexeme(), line);
    assert!(cursor.is_eol());
    assert_eq!(state.mode(), Mode::Base);
    assert_eq!(state.comment_depth(), 0);
}

#[test]
fn nested_comment_depth_across_lines() {
    let mut state = ScanState::new();
    scan_from("(* a (* b", &mut state);
    assert_eq!(state.mode(), Mode::InComment);
    assert_eq!(state.comment_depth(), 2);

    scan_from("c *) d", &mut state);
    assert_eq!(state.comment_depth(), 1);

    assert_eq!(
        scan_from("e *) f", &mut state),
        vec![
            (Category::Comment, "e *)"),
            (Category::Whitespace, " "),
            (Category::Variable, "f"),
        ]
    );
    assert!(state.is_base());
}

#[test]
fn unterminated_comment_stays_open() {
    let mut state = ScanState::new();
    assert_eq!(
        scan_from("(* open", &mut state),
        vec![(Category::Comment, "(* open")]
    );
    assert_eq!(state.mode(), Mode::InComment);
    assert_eq!(state.comment_depth(), 1);
}

#[test]
fn opener_star_does_not_close() {
    let mut state = ScanState::new();
    scan_from("(*)", &mut state);
    assert_eq!(state.mode(), Mode::InComment);
    assert_eq!(state.comment_depth(), 1);
}

#[test]
fn paren_star_paren_inside_comment_is_neutral() {
    // `(*` opens and the `*` then pairs with `)` to close again.
    let mut state = ScanState::new();
    assert_eq!(
        scan_from("(* (*) *) x", &mut state),
        vec![
            (Category::Comment, "(* (*) *)"),
            (Category::Whitespace, " "),
            (Category::Variable, "x"),
        ]
    );
    assert!(state.is_base());
}

#[test]
fn comment_continuation_skips_leading_whitespace() {
    let mut state = ScanState::new();
    scan_from("(*", &mut state);
    assert_eq!(
        scan_from("  body *)", &mut state),
        vec![(Category::Whitespace, "  "), (Category::Comment, "body *)")]
    );
    assert!(state.is_base());
}

#[test]
fn quote_inside_comment_does_not_open_string() {
    let mut state = ScanState::new();
    scan_from("(* \" *)", &mut state);
    assert!(state.is_base());
}

#[test]
fn comment_with_non_ascii_body() {
    let mut state = ScanState::new();
    let line = "(* \u{3bb} \u{1F600} *)";
    assert_eq!(scan_from(line, &mut state), vec![(Category::Comment, line)]);
    assert!(state.is_base());
}

#[test]
fn deep_nesting() {
    let mut state = ScanState::new();
    let open = "(*".repeat(50);
    scan_from(&open, &mut state);
    assert_eq!(state.comment_depth(), 50);
    let close = "*)".repeat(50);
    scan_from(&close, &mut state);
    assert!(state.is_base());
}

// ─── Line & Document Helpers ────────────────────────────────────────

#[test]
fn empty_line_yields_no_tokens() {
    assert!(scan("").is_empty());
}

#[test]
fn empty_line_preserves_state() {
    let mut state = ScanState::new();
    scan_from("(* a", &mut state);
    assert!(scan_from("", &mut state).is_empty());
    assert_eq!(state.comment_depth(), 1);
}

#[test]
fn highlight_lines_carries_state() {
    let scanner = Scanner::ocaml();
    let mut state = scanner.start_state();
    let out = scanner.highlight_lines(["let s = \"a", "b\" in (* c", "*) s"], &mut state);
    assert_eq!(out.len(), 3);
    assert_eq!(out[1][0].category, Category::String);
    assert_eq!(out[2][0].category, Category::Comment);
    assert_eq!(out[2][0].span, Span::new(0, 2));
    assert!(state.is_base());
}

#[test]
fn tokenize_uses_document_offsets() {
    let source = "let x\n  = 1";
    let tokens = tokenize(source);
    let texts: Vec<_> = tokens
        .iter()
        .filter(|t| !t.category.is_trivia())
        .map(|t| (t.category, t.text(source)))
        .collect();
    assert_eq!(
        texts,
        vec![
            (Category::Keyword, "let"),
            (Category::Variable, "x"),
            (Category::Operator, "="),
            (Category::Number, "1"),
        ]
    );
}

#[test]
fn tokenize_skips_bom() {
    let source = "\u{FEFF}let";
    let tokens = tokenize(source);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].span, Span::new(3, 6));
    assert_eq!(tokens[0].text(source), "let");
}

#[test]
fn tokenize_multiline_comment() {
    let source = "(* a\r\nb *) c";
    let cats: Vec<_> = tokenize(source).iter().map(|t| t.category).collect();
    assert_eq!(
        cats,
        vec![
            Category::Comment,
            Category::Comment,
            Category::Whitespace,
            Category::Variable,
        ]
    );
}

#[test]
fn custom_word_tables() {
    let scanner = Scanner::new(WordTable::new(["fn"], ["i32"]));
    let mut state = scanner.start_state();
    let cats: Vec<_> = scanner
        .tokenize_line("fn let i32", &mut state)
        .map(|t| t.category)
        .filter(|c| !c.is_trivia())
        .collect();
    assert_eq!(
        cats,
        vec![Category::Keyword, Category::Variable, Category::Builtin]
    );
}

#[test]
fn realistic_function() {
    assert_eq!(
        categories("let rec fact ~n = if n <= 1 then 1 else n * fact (n - 1)"),
        vec![
            Category::Keyword,         // let
            Category::Keyword,         // rec
            Category::Variable,        // fact
            Category::LabeledVariable, // ~n
            Category::Operator,        // =
            Category::Keyword,         // if
            Category::Variable,        // n
            Category::Operator,        // <
            Category::Operator,        // =
            Category::Number,          // 1
            Category::Keyword,         // then
            Category::Number,          // 1
            Category::Keyword,         // else
            Category::Variable,        // n
            Category::Operator,        // *
            Category::Variable,        // fact
            Category::Variable,        // (n
            Category::Operator,        // -
            Category::Number,          // 1
            Category::Variable,        // )
        ]
    );
}

// ─── Property Tests ─────────────────────────────────────────────────

#[test]
fn spans_cover_line_exactly() {
    let lines = [
        "",
        "x",
        "let x = 42",
        "  let f ~x `A = x +. 1.5 ;;",
        "match x with | Some y -> y | None -> 0",
        "\"str\" (* c *) 'c' #dir",
        "\u{3bb} \u{1F600} \0 \x7F",
    ];
    for line in lines {
        let mut state = ScanState::new();
        let tokens: Vec<Token> = Scanner::ocaml().tokenize_line(line, &mut state).collect();
        let mut expected_start = 0;
        for tok in &tokens {
            assert_eq!(tok.span.start, expected_start, "gap before {tok:?} in {line:?}");
            assert!(!tok.span.is_empty(), "empty token {tok:?} in {line:?}");
            expected_start = tok.span.end;
        }
        assert_eq!(expected_start as usize, line.len(), "coverage for {line:?}");
        let rebuilt: String = tokens.iter().map(|t| t.text(line)).collect();
        assert_eq!(rebuilt, line);
    }
}

mod proptest_scanner {
    use super::*;
    use proptest::prelude::*;

    /// Lines built from the characters that matter to the scanner.
    fn interesting_line() -> impl Strategy<Value = String> {
        proptest::collection::vec(
            prop_oneof![
                Just("("),
                Just("*"),
                Just(")"),
                Just("\""),
                Just("\\"),
                Just(" "),
                Just("~"),
                Just("`"),
                Just("1"),
                Just("."),
                Just("let"),
                Just("x"),
                Just("\u{3bb}"),
            ],
            0..40,
        )
        .prop_map(|parts| parts.concat())
    }

    proptest! {
        #[test]
        fn every_line_is_covered_without_gaps(line in "\\PC{0,64}") {
            let mut state = ScanState::new();
            let tokens: Vec<Token> = Scanner::ocaml().tokenize_line(&line, &mut state).collect();
            let rebuilt: String = tokens.iter().map(|t| t.text(&line)).collect();
            prop_assert_eq!(rebuilt, line);
            prop_assert!(tokens.iter().all(|t| !t.span.is_empty()));
        }

        #[test]
        fn state_stays_consistent_across_lines(
            lines in proptest::collection::vec(interesting_line(), 1..8)
        ) {
            let scanner = Scanner::ocaml();
            let mut state = scanner.start_state();
            for line in &lines {
                let covered: u32 = scanner
                    .tokenize_line(line, &mut state)
                    .map(|t| t.span.len())
                    .sum();
                prop_assert_eq!(covered as usize, line.len());
                prop_assert!(state.is_consistent(), "{:?} after {:?}", state, line);
            }
        }

        #[test]
        fn quote_free_lines_end_in_base_mode(
            line in "[a-z0-9 +*&%=<>!?|~`.;,_-]{0,64}"
        ) {
            let mut state = ScanState::new();
            let count = Scanner::ocaml().tokenize_line(&line, &mut state).count();
            prop_assert!(count <= line.len());
            prop_assert!(state.is_base());
        }
    }
}
