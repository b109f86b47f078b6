//! Reading and tokenizing delimited planner exports
//!
//! This service turns a file path plus a column configuration into cleaned
//! header names and raw field rows, handling the declared text encoding and
//! the input-level error cases (missing file, empty file, undecodable bytes).
//! Semantic interpretation of the fields happens in the store's merge.

use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::config::{ColumnConfig, TextEncoding};
use crate::{Error, Result};

pub mod column_map;
pub mod field_parsers;
pub mod line_parser;

#[cfg(test)]
pub mod tests;

pub use column_map::ResolvedColumns;
pub use line_parser::{clean_value, parse_line};

/// One export file tokenized into header and data rows
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFile {
    /// File name without directory, recorded in stored entries
    pub file_name: String,

    /// Cleaned header names; synthesized from the configuration when the
    /// file carries no header row
    pub headers: Vec<String>,

    /// Raw field rows in file order, quotes consumed, padding kept
    pub rows: Vec<Vec<String>>,
}

/// Read and tokenize one export file.
///
/// Fails with `FileNotFound` for a missing path, `Encoding` when the bytes
/// do not decode under the configured encoding, and `EmptyInput` when no
/// non-blank line remains. Rows with too few fields are kept; the merge
/// counts them as skipped.
pub fn read_file(path: &Path, config: &ColumnConfig) -> Result<ParsedFile> {
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }

    let bytes = fs::read(path).map_err(|e| Error::io(format!("reading {}", path.display()), e))?;
    let text = decode(&bytes, config.encoding)
        .ok_or_else(|| Error::encoding(path.display().to_string(), config.encoding.name()))?;

    let mut lines = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty());

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let headers: Vec<String> = if config.has_header {
        let Some(header_line) = lines.next() else {
            return Err(Error::empty_input(path.display().to_string()));
        };
        parse_line(header_line, config.delimiter)
            .iter()
            .map(|field| clean_value(field))
            .collect()
    } else {
        config
            .columns
            .iter()
            .map(|column| column.source_name.clone())
            .collect()
    };

    let rows: Vec<Vec<String>> = lines
        .map(|line| parse_line(line, config.delimiter))
        .collect();

    if rows.is_empty() {
        return Err(Error::empty_input(path.display().to_string()));
    }

    debug!(
        "parsed {} with {} header columns and {} data rows",
        file_name,
        headers.len(),
        rows.len()
    );
    info!("read {} rows from {}", rows.len(), file_name);

    Ok(ParsedFile {
        file_name,
        headers,
        rows,
    })
}

/// Decode raw bytes under the declared encoding.
///
/// ISO-8859-1 and Windows-1252 decode every byte sequence; UTF-8 input with
/// malformed sequences is rejected rather than silently replaced.
fn decode(bytes: &[u8], encoding: TextEncoding) -> Option<String> {
    let (text, _, had_errors) = encoding.encoding().decode(bytes);
    if had_errors && encoding == TextEncoding::Utf8 {
        return None;
    }
    Some(text.into_owned())
}
