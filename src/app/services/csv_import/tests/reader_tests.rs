//! Tests for whole-file reading and decoding

use std::io::Write;

use super::test_config;
use crate::Error;
use crate::app::services::csv_import::read_file;
use crate::config::{ColumnConfig, TextEncoding};

fn write_temp(content: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_missing_file_is_file_not_found() {
    let result = read_file(std::path::Path::new("/no/such/export.csv"), &test_config());
    assert!(matches!(result, Err(Error::FileNotFound { .. })));
}

#[test]
fn test_empty_file_is_empty_input() {
    let file = write_temp(b"");
    let result = read_file(file.path(), &test_config());
    assert!(matches!(result, Err(Error::EmptyInput { .. })));
}

#[test]
fn test_header_only_file_is_empty_input() {
    let file = write_temp("\"Stichtag\";\"Abf.\"\n".as_bytes());
    let result = read_file(file.path(), &test_config());
    assert!(matches!(result, Err(Error::EmptyInput { .. })));
}

#[test]
fn test_reads_header_and_rows() {
    let file = write_temp(
        "\"Stichtag\";\"Abf.\";\"Wochen bis\";\"Sau-Nr.\"\n\" -3\";\"602\";\"+\";\"165\"\n"
            .as_bytes(),
    );
    let parsed = read_file(file.path(), &test_config()).unwrap();
    assert_eq!(parsed.headers[1], "Abf.");
    assert_eq!(parsed.rows.len(), 1);
    assert_eq!(parsed.rows[0].len(), 4);
}

#[test]
fn test_blank_lines_are_skipped() {
    let file = write_temp(b"\"Abf.\";\"Sau-Nr.\"\n\n\"602\";\"165\"\n\n");
    let parsed = read_file(file.path(), &test_config()).unwrap();
    assert_eq!(parsed.rows.len(), 1);
}

#[test]
fn test_headerless_file_uses_configured_names() {
    let mut config = test_config();
    config.has_header = false;
    let file = write_temp(b"\"-3\";\"602\";\"+\";\"165\"\n");
    let parsed = read_file(file.path(), &config).unwrap();
    assert_eq!(parsed.headers.len(), config.columns.len());
    assert_eq!(parsed.headers[1], "Abf.");
    assert_eq!(parsed.rows.len(), 1);
}

#[test]
fn test_latin1_umlauts_decode() {
    // "Trächtig" in ISO-8859-1: 0xE4 for ä
    let mut config = ColumnConfig::musterplan();
    config.encoding = TextEncoding::Iso8859_1;
    let file = write_temp(b"\"Abf.\";\"Sau-Nr.\"\n\"Tr\xE4chtig\";\"165\"\n");
    let parsed = read_file(file.path(), &config).unwrap();
    assert_eq!(parsed.rows[0][0], "Trächtig");
}

#[test]
fn test_invalid_utf8_is_encoding_error() {
    let file = write_temp(b"\"Abf.\";\"Sau-Nr.\"\n\"Tr\xE4chtig\";\"165\"\n");
    let result = read_file(file.path(), &test_config());
    assert!(matches!(result, Err(Error::Encoding { .. })));
}

#[test]
fn test_file_name_is_recorded() {
    let file = write_temp(b"\"Abf.\";\"Sau-Nr.\"\n\"602\";\"165\"\n");
    let parsed = read_file(file.path(), &test_config()).unwrap();
    let expected = file.path().file_name().unwrap().to_string_lossy();
    assert_eq!(parsed.file_name, expected);
}
