//! Stallplan Library
//!
//! A Rust library for importing breeding-sow records from delimited planner
//! exports (DB Sauenplaner and compatible formats) into a durable local store
//! and serving them grouped by ventil station.
//!
//! This library provides tools for:
//! - Parsing semicolon-delimited exports with quoted, space-padded fields
//! - Mapping raw columns to semantic roles via configurable column profiles
//! - Deriving a traffic-light classification per record with fixed precedence
//! - Merging imports into a deduplicated, retention-bounded store
//! - Serving per-ventil record lists from a wholesale-rebuilt index
//! - Comprehensive error handling and recovery

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod csv_import;
        pub mod serving_index;
        pub mod sow_store;
        pub mod traffic_light;
        pub mod ventil_code;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ImportResult, SortOrder, SowRecord, TrafficLight};
pub use app::services::sow_store::SowStore;
pub use config::ColumnConfig;

/// Result type alias for stallplan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for import and store operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Import input file does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Import input file contains no rows
    #[error("Empty input file: {path}")]
    EmptyInput { path: String },

    /// Import input could not be decoded with the configured encoding
    #[error("Encoding error in file '{path}': not valid {encoding}")]
    Encoding { path: String, encoding: String },

    /// Column configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Durable store read/write failure
    #[error("Persistence error: {message}")]
    Persistence {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Persisted document written by a newer release
    #[error("Unsupported document version {found} (supported up to {supported})")]
    DocumentVersion { found: u32, supported: u32 },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create an empty input error
    pub fn empty_input(path: impl Into<String>) -> Self {
        Self::EmptyInput { path: path.into() }
    }

    /// Create an encoding error
    pub fn encoding(path: impl Into<String>, encoding: impl Into<String>) -> Self {
        Self::Encoding {
            path: path.into(),
            encoding: encoding.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a persistence error without an underlying cause
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
            source: None,
        }
    }

    /// Create a persistence error wrapping an underlying cause
    pub fn persistence_with(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Persistence {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a document version error
    pub fn document_version(found: u32, supported: u32) -> Self {
        Self::DocumentVersion { found, supported }
    }

    /// True for errors that leave the store untouched by contract
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. } | Self::EmptyInput { .. } | Self::Encoding { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Persistence {
            message: "JSON serialization failed".to_string(),
            source: Some(Box::new(error)),
        }
    }
}
