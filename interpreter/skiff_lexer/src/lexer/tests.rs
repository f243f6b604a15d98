use pretty_assertions::assert_eq;
use skiff_diagnostic::{Diagnostic, ErrorCode};
use skiff_ir::{StringInterner, TokenKind, TokenList};

use super::tokenize;

fn lex(source: &str) -> (StringInterner, TokenList) {
    let interner = StringInterner::new();
    match tokenize(source, &interner) {
        Ok(tokens) => (interner, tokens),
        Err(diag) => panic!("lexing {source:?} failed: {diag}"),
    }
}

fn lex_err(source: &str) -> Diagnostic {
    let interner = StringInterner::new();
    match tokenize(source, &interner) {
        Ok(tokens) => panic!("expected {source:?} to fail, got {} tokens", tokens.len()),
        Err(diag) => diag,
    }
}

fn kinds(tokens: &TokenList) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

fn texts(interner: &StringInterner, tokens: &TokenList) -> Vec<&'static str> {
    tokens.iter().map(|t| interner.lookup(t.text)).collect()
}

#[test]
fn integer_literal_preserves_text() {
    let (interner, tokens) = lex("42");
    assert_eq!(kinds(&tokens), vec![TokenKind::Numeric]);
    assert_eq!(texts(&interner, &tokens), vec!["42"]);
}

#[test]
fn float_literal_preserves_text() {
    let (interner, tokens) = lex("3.14");
    assert_eq!(kinds(&tokens), vec![TokenKind::Numeric]);
    assert_eq!(texts(&interner, &tokens), vec!["3.14"]);
}

#[test]
fn float_with_trailing_dot() {
    let (interner, tokens) = lex("12.");
    assert_eq!(texts(&interner, &tokens), vec!["12."]);
}

#[test]
fn numeral_terminated_by_delimiter() {
    let (interner, tokens) = lex("f(2)");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Ident,
            TokenKind::Delimiter,
            TokenKind::Numeric,
            TokenKind::Delimiter,
        ],
    );
    assert_eq!(texts(&interner, &tokens), vec!["f", "(", "2", ")"]);
}

#[test]
fn numeral_terminated_by_operator() {
    let (interner, tokens) = lex("1+2");
    assert_eq!(texts(&interner, &tokens), vec!["1", "+", "2"]);
}

#[test]
fn letter_inside_numeral_is_malformed() {
    let diag = lex_err("12a");
    assert_eq!(diag.code, ErrorCode::E0003);
    assert_eq!(diag.to_string(), "error[E0003]: line 1: malformed number '12a'");
}

#[test]
fn second_dot_is_malformed() {
    let diag = lex_err("1.2.3");
    assert_eq!(diag.code, ErrorCode::E0003);
}

#[test]
fn keywords_booleans_and_identifiers() {
    let (_, tokens) = lex("while x_1 nil true fn");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Keyword,
            TokenKind::Ident,
            TokenKind::Nil,
            TokenKind::Bool,
            TokenKind::Keyword,
        ],
    );
}

#[test]
fn this_and_new_are_plain_identifiers() {
    let (_, tokens) = lex("this New");
    assert_eq!(kinds(&tokens), vec![TokenKind::Ident, TokenKind::Ident]);
}

#[test]
fn identifier_may_contain_digits() {
    let (interner, tokens) = lex("a1b2");
    assert_eq!(kinds(&tokens), vec![TokenKind::Ident]);
    assert_eq!(texts(&interner, &tokens), vec!["a1b2"]);
}

#[test]
fn operators_munch_maximally() {
    let (interner, tokens) = lex("a <= b ~= c");
    assert_eq!(texts(&interner, &tokens), vec!["a", "<=", "b", "~=", "c"]);
}

#[test]
fn compound_assignment_operators_lex() {
    let (interner, tokens) = lex("x += 1");
    assert_eq!(texts(&interner, &tokens), vec!["x", "+=", "1"]);
    assert_eq!(kinds(&tokens)[1], TokenKind::Operator);
}

#[test]
fn adjacent_operator_chars_form_one_run() {
    // '=' then '-' glue into a single run that matches no operator.
    let diag = lex_err("x=-1");
    assert_eq!(diag.code, ErrorCode::E0004);
    assert_eq!(diag.to_string(), "error[E0004]: line 1: unknown operator '=-'");
}

#[test]
fn string_literal_drops_quotes() {
    let (interner, tokens) = lex("\"abc\"");
    assert_eq!(kinds(&tokens), vec![TokenKind::Str]);
    assert_eq!(texts(&interner, &tokens), vec!["abc"]);
}

#[test]
fn single_quoted_string() {
    let (interner, tokens) = lex("'abc'");
    assert_eq!(texts(&interner, &tokens), vec!["abc"]);
}

#[test]
fn other_quote_kind_passes_through() {
    let (interner, tokens) = lex("\"it's\"");
    assert_eq!(texts(&interner, &tokens), vec!["it's"]);
}

#[test]
fn escape_keeps_next_char_verbatim() {
    let (interner, tokens) = lex(r#""a\"b""#);
    assert_eq!(texts(&interner, &tokens), vec!["a\"b"]);

    let (interner, tokens) = lex(r#""a\\b""#);
    assert_eq!(texts(&interner, &tokens), vec!["a\\b"]);
}

#[test]
fn unterminated_string_reports_its_line() {
    let diag = lex_err("x = 1\ny = \"abc");
    assert_eq!(diag.code, ErrorCode::E0001);
    assert_eq!(diag.line, 2);
    assert_eq!(diag.to_string(), "error[E0001]: line 2: unterminated string '\"abc'");
}

#[test]
fn escape_at_end_of_source_is_unterminated() {
    let diag = lex_err("\"abc\\");
    assert_eq!(diag.code, ErrorCode::E0001);
}

#[test]
fn invalid_character_aborts() {
    let diag = lex_err("x = #");
    assert_eq!(diag.code, ErrorCode::E0002);
    assert_eq!(diag.to_string(), "error[E0002]: line 1: invalid character '#'");
}

#[test]
fn tokens_carry_line_numbers() {
    let (_, tokens) = lex("a\nb\n\nc");
    let lines: Vec<u32> = tokens.iter().map(|t| t.line).collect();
    assert_eq!(lines, vec![1, 2, 4]);
}

#[test]
fn every_delimiter_is_a_single_token() {
    let (interner, tokens) = lex(",:;.()[]{}");
    assert_eq!(tokens.len(), 10);
    assert!(kinds(&tokens).iter().all(|k| *k == TokenKind::Delimiter));
    assert_eq!(
        texts(&interner, &tokens),
        vec![",", ":", ";", ".", "(", ")", "[", "]", "{", "}"],
    );
}

#[test]
fn empty_source_yields_no_tokens() {
    let (_, tokens) = lex("");
    assert!(tokens.is_empty());
}

#[test]
fn whitespace_only_source_yields_no_tokens() {
    let (_, tokens) = lex("  \t\r\n");
    assert!(tokens.is_empty());
}

#[test]
fn carriage_return_does_not_count_as_a_line() {
    let (_, tokens) = lex("a\r\nb");
    let lines: Vec<u32> = tokens.iter().map(|t| t.line).collect();
    assert_eq!(lines, vec![1, 2]);
}

mod properties {
    use proptest::prelude::*;
    use skiff_ir::{StringInterner, TokenKind};

    use super::super::tokenize;

    proptest! {
        #[test]
        fn integer_literal_text_round_trips(value in 0u64..=9_999_999_999) {
            let text = value.to_string();
            let interner = StringInterner::new();
            let tokens = tokenize(&text, &interner).unwrap_or_default();
            prop_assert_eq!(tokens.len(), 1);
            prop_assert_eq!(tokens.get(0).map(|t| t.kind), Some(TokenKind::Numeric));
            prop_assert_eq!(
                tokens.get(0).map(|t| interner.lookup(t.text)),
                Some(text.as_str()),
            );
        }

        #[test]
        fn float_literal_text_round_trips(whole in 0u64..=99_999_999, frac in 0u64..=99_999_999) {
            let text = format!("{whole}.{frac}");
            let interner = StringInterner::new();
            let tokens = tokenize(&text, &interner).unwrap_or_default();
            prop_assert_eq!(tokens.len(), 1);
            prop_assert_eq!(
                tokens.get(0).map(|t| interner.lookup(t.text)),
                Some(text.as_str()),
            );
        }
    }
}
