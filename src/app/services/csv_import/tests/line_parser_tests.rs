//! Tests for the quote-aware line tokenizer

use crate::app::services::csv_import::line_parser::{clean_value, parse_line};

#[test]
fn test_plain_semicolon_split() {
    assert_eq!(parse_line("a;b;c", ';'), vec!["a", "b", "c"]);
}

#[test]
fn test_quoted_field_keeps_embedded_delimiter() {
    assert_eq!(parse_line("\"a;b\";c", ';'), vec!["a;b", "c"]);
}

#[test]
fn test_every_field_quoted() {
    // The planner export wraps every field individually in quotes
    assert_eq!(
        parse_line("\" -3\";\"     602\";\"+\";\"165   \"", ';'),
        vec![" -3", "     602", "+", "165   "]
    );
}

#[test]
fn test_empty_fields() {
    assert_eq!(parse_line("a;;c", ';'), vec!["a", "", "c"]);
    assert_eq!(parse_line(";;", ';'), vec!["", "", ""]);
}

#[test]
fn test_trailing_delimiter_yields_empty_final_field() {
    assert_eq!(parse_line("a;b;", ';'), vec!["a", "b", ""]);
}

#[test]
fn test_single_field_line() {
    assert_eq!(parse_line("only", ';'), vec!["only"]);
}

#[test]
fn test_empty_line_yields_one_empty_field() {
    assert_eq!(parse_line("", ';'), vec![""]);
}

#[test]
fn test_alternative_delimiter() {
    assert_eq!(parse_line("a,b,\"c,d\"", ','), vec!["a", "b", "c,d"]);
}

#[test]
fn test_quotes_do_not_nest_or_escape() {
    // No escaping in the source format: quotes just toggle
    assert_eq!(parse_line("\"a\"\"b\";c", ';'), vec!["ab", "c"]);
}

#[test]
fn test_clean_value_strips_padding_and_quotes() {
    assert_eq!(clean_value("  \"  602 \"  "), "602");
    assert_eq!(clean_value("\"165   \""), "165");
    assert_eq!(clean_value("   plain   "), "plain");
}

#[test]
fn test_clean_value_keeps_asymmetric_quote() {
    assert_eq!(clean_value("\"open"), "\"open");
}

#[test]
fn test_clean_value_empty() {
    assert_eq!(clean_value(""), "");
    assert_eq!(clean_value("\"\""), "");
    assert_eq!(clean_value("   "), "");
}
