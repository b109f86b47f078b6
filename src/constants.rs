//! Application constants for stallplan
//!
//! This module contains all configuration constants, default values,
//! and keyword sets used throughout the import and store pipeline.

// =============================================================================
// Persisted File Names and Directories
// =============================================================================

/// Application directory name under the user data directory
pub const APP_DIR_NAME: &str = "stallplan";

/// Authoritative store document file name
pub const DB_FILE_NAME: &str = "sow_database.json";

/// Import history document file name
pub const HISTORY_FILE_NAME: &str = "import_history.json";

/// Subdirectory holding column configuration profiles
pub const CONFIG_DIR_NAME: &str = "configs";

/// File name of the active column configuration
pub const CURRENT_CONFIG_FILE: &str = "current_config.json";

/// Version written into freshly persisted documents
pub const DOCUMENT_VERSION: u32 = 1;

// =============================================================================
// Retention
// =============================================================================

/// Months an imported entry survives before the retention sweep removes it
pub const RETENTION_MONTHS: u32 = 6;

// =============================================================================
// Traffic Light Classification
// =============================================================================

/// Health status keywords that force a `Purple` classification.
///
/// Matched case-insensitively as substrings; German terms first because the
/// reference export is a DB Sauenplaner file.
pub const MEDICATION_KEYWORDS: &[&str] = &[
    "medikation",
    "medication",
    "behandlung",
    "treatment",
    "krank",
    "sick",
];

/// Default day thresholds (days since the mating event)
pub mod thresholds {
    /// Lower bound of the green band
    pub const GREEN_MIN: i32 = 0;

    /// Upper bound of the green band
    pub const GREEN_MAX: i32 = 79;

    /// Lower bound of the yellow band
    pub const YELLOW_MIN: i32 = 80;

    /// Upper bound of the yellow band
    pub const YELLOW_MAX: i32 = 106;

    /// Everything at or above this is red (shortly before farrowing)
    pub const RED_MIN: i32 = 107;
}

// =============================================================================
// Column Resolution
// =============================================================================

/// Positional fallbacks for planner exports whose header text is unstable
/// but whose column order is fixed (MusterPlan layout).
pub mod fallback_columns {
    /// Ear tag number column ("Abf.")
    pub const EAR_TAG: usize = 1;

    /// Ventil / pen number column ("Sau-Nr.")
    pub const VENTIL: usize = 3;

    /// Mating date column (dynamic date header)
    pub const EVENT_DATE: usize = 4;
}

/// Suffix marker for positional column addressing in configured source names,
/// e.g. `"Belegdatum_Spalte5"` addresses the fifth column (1-based)
pub const POSITIONAL_COLUMN_SUFFIX: &str = "_Spalte";

// =============================================================================
// Parsing
// =============================================================================

/// Default field delimiter of planner exports
pub const DEFAULT_DELIMITER: char = ';';

/// Date formats accepted for event dates, tried in order
pub const EVENT_DATE_FORMATS: &[&str] = &["%d.%m.%Y", "%d.%m.%y", "%Y-%m-%d"];

/// Sentinel for `days_since_event` when the event date is missing or in the
/// future beyond representation; classifies as `Unknown` via the `days < 0`
/// rule
pub const DAYS_UNKNOWN: i32 = -1;

/// Placeholder used in unique keys for records without an event date
pub const UNKNOWN_DATE_KEY: &str = "unknown";

// =============================================================================
// Ventil Code Detection
// =============================================================================

/// Prefix of coded ventil identifiers, e.g. `"VENTIL-042"`
pub const VENTIL_CODE_PREFIX: &str = "VENTIL";
