//! Durable JSON documents behind the authoritative store
//!
//! Two documents live under the application data directory: the store
//! document (all stored entries plus a last-updated stamp) and the
//! append-only import history. Both carry a schema version; files written by
//! a newer release are refused at load instead of being misparsed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::app::models::{ImportHistoryEntry, StoredEntry};
use crate::constants::DOCUMENT_VERSION;
use crate::{Error, Result};

fn default_version() -> u32 {
    DOCUMENT_VERSION
}

/// Persisted form of the authoritative store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreDocument {
    /// Schema version; absent in pre-versioned files
    #[serde(default = "default_version")]
    pub version: u32,

    /// Timestamp of the write that produced this document
    pub last_updated: DateTime<Utc>,

    /// All stored entries
    pub entries: Vec<StoredEntry>,
}

/// Persisted form of the import history log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryDocument {
    /// Schema version; absent in pre-versioned files
    #[serde(default = "default_version")]
    pub version: u32,

    /// Append-only import log, oldest first
    pub imports: Vec<ImportHistoryEntry>,
}

/// Load the store document, or `None` when no file exists yet
pub fn load_store(path: &Path) -> Result<Option<StoreDocument>> {
    let Some(json) = read_document(path)? else {
        return Ok(None);
    };
    let document: StoreDocument = serde_json::from_str(&json)
        .map_err(|e| Error::persistence_with(format!("invalid store document {}", path.display()), e))?;
    check_version(document.version)?;
    info!(
        "loaded {} entries from store document {}",
        document.entries.len(),
        path.display()
    );
    Ok(Some(document))
}

/// Write the full store document synchronously
pub fn save_store(path: &Path, entries: &[StoredEntry], last_updated: DateTime<Utc>) -> Result<()> {
    let document = StoreDocument {
        version: DOCUMENT_VERSION,
        last_updated,
        entries: entries.to_vec(),
    };
    write_document(path, &serde_json::to_string_pretty(&document)?)?;
    debug!("saved {} entries to {}", entries.len(), path.display());
    Ok(())
}

/// Load the history document, or `None` when no file exists yet
pub fn load_history(path: &Path) -> Result<Option<HistoryDocument>> {
    let Some(json) = read_document(path)? else {
        return Ok(None);
    };
    let document: HistoryDocument = serde_json::from_str(&json).map_err(|e| {
        Error::persistence_with(format!("invalid history document {}", path.display()), e)
    })?;
    check_version(document.version)?;
    Ok(Some(document))
}

/// Write the full history document synchronously
pub fn save_history(path: &Path, imports: &[ImportHistoryEntry]) -> Result<()> {
    let document = HistoryDocument {
        version: DOCUMENT_VERSION,
        imports: imports.to_vec(),
    };
    write_document(path, &serde_json::to_string_pretty(&document)?)?;
    debug!("saved {} history entries to {}", imports.len(), path.display());
    Ok(())
}

fn check_version(version: u32) -> Result<()> {
    if version > DOCUMENT_VERSION {
        return Err(Error::document_version(version, DOCUMENT_VERSION));
    }
    Ok(())
}

fn read_document(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .map_err(|e| Error::persistence_with(format!("reading {}", path.display()), e))
}

fn write_document(path: &Path, json: &str) -> Result<()> {
    fs::write(path, json)
        .map_err(|e| Error::persistence_with(format!("writing {}", path.display()), e))
}
