//! Column configuration management and validation.
//!
//! Maps raw export columns to semantic roles (ventil number, ear tag, mating
//! date, ...) and carries the parsing rules for one export dialect: delimiter,
//! header presence, text encoding. Profiles are persisted as JSON documents
//! under the application data directory.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::constants::{
    CONFIG_DIR_NAME, CURRENT_CONFIG_FILE, DEFAULT_DELIMITER, POSITIONAL_COLUMN_SUFFIX,
};
use crate::{Error, Result};

// =============================================================================
// Column Definitions
// =============================================================================

/// Semantic role of a mapped column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnRole {
    /// No special meaning, carried through into `extra`
    None,
    /// Ventil / pen number, the grouping key (required, at most once)
    VentilNumber,
    /// Ear tag number, the record identity (required, at most once)
    EarTagNumber,
    /// Mating date
    EventDate,
    /// Pregnancy status text
    PregnancyStatus,
    /// Expected farrowing date
    BirthDate,
    /// Health status text, drives the medication flag
    HealthStatus,
    /// Free-form notes
    Notes,
    /// User-defined role
    Custom,
}

/// Declared value type of a column, used by display surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Text,
    Number,
    Date,
    Boolean,
    Custom,
}

/// One mapped column of the export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Header text in the source file (or positional `_Spalte<N>` address)
    pub source_name: String,

    /// Display name, user-editable
    pub display_name: String,

    /// Declared value type
    pub column_type: ColumnType,

    /// Semantic role
    pub role: ColumnRole,

    /// Whether display surfaces show this column
    pub visible: bool,

    /// Position in display surfaces
    pub display_order: usize,
}

impl ColumnDef {
    /// Create a column with display name mirroring the source name
    pub fn new(source_name: impl Into<String>, column_type: ColumnType, role: ColumnRole) -> Self {
        let source_name = source_name.into();
        Self {
            display_name: source_name.clone(),
            source_name,
            column_type,
            role,
            visible: true,
            display_order: 0,
        }
    }
}

// =============================================================================
// Text Encoding
// =============================================================================

/// Declared text encoding of the export file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    #[default]
    #[serde(rename = "UTF-8")]
    Utf8,
    #[serde(rename = "ISO-8859-1")]
    Iso8859_1,
    #[serde(rename = "Windows-1252")]
    Windows1252,
}

impl TextEncoding {
    /// Canonical name as written into persisted configs
    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Iso8859_1 => "ISO-8859-1",
            TextEncoding::Windows1252 => "Windows-1252",
        }
    }

    /// The encoding_rs implementation behind this declaration
    pub fn encoding(self) -> &'static encoding_rs::Encoding {
        match self {
            TextEncoding::Utf8 => encoding_rs::UTF_8,
            TextEncoding::Iso8859_1 => encoding_rs::WINDOWS_1252,
            TextEncoding::Windows1252 => encoding_rs::WINDOWS_1252,
        }
    }
}

// =============================================================================
// Column Configuration
// =============================================================================

/// Complete column mapping for one export dialect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Profile name
    pub name: String,

    /// Ordered column definitions
    pub columns: Vec<ColumnDef>,

    /// Field delimiter
    pub delimiter: char,

    /// Whether the first line is a header row
    pub has_header: bool,

    /// Declared text encoding
    pub encoding: TextEncoding,

    /// Last modification timestamp, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl ColumnConfig {
    /// Empty configuration with standard parsing settings
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            delimiter: DEFAULT_DELIMITER,
            has_header: true,
            encoding: TextEncoding::Utf8,
            last_modified: None,
        }
    }

    /// Standard configuration with the conventional German column names
    pub fn default_config() -> Self {
        let mut config = Self::new("Default");
        config.add_column("Ventilnummer", ColumnType::Number, ColumnRole::VentilNumber);
        config.add_column("Ohrmarkennummer", ColumnType::Text, ColumnRole::EarTagNumber);
        config.add_column("Deckdatum", ColumnType::Date, ColumnRole::EventDate);
        config.add_column(
            "Trächtigkeitsstatus",
            ColumnType::Text,
            ColumnRole::PregnancyStatus,
        );
        config.add_column("Gesundheitszustand", ColumnType::Text, ColumnRole::HealthStatus);
        config.add_column("Bemerkungen", ColumnType::Text, ColumnRole::Notes);
        config
    }

    /// Configuration for the DB Sauenplaner "MusterPlan" export.
    ///
    /// The layout is positional: ear tag at index 1 ("Abf."), ventil at
    /// index 3 ("Sau-Nr."), mating date at index 4 under a header that
    /// changes with every export (hence the `_Spalte5` positional address).
    pub fn musterplan() -> Self {
        let mut config = Self::new("MusterPlan");

        let mut stichtag = ColumnDef::new("Stichtag", ColumnType::Text, ColumnRole::None);
        stichtag.visible = false;
        config.push_column(stichtag);

        let mut ear_tag = ColumnDef::new("Abf.", ColumnType::Text, ColumnRole::EarTagNumber);
        ear_tag.display_name = "Ohrmarke".to_string();
        config.push_column(ear_tag);

        let mut status = ColumnDef::new("Wochen bis", ColumnType::Text, ColumnRole::None);
        status.display_name = "Status".to_string();
        status.visible = false;
        config.push_column(status);

        let mut ventil = ColumnDef::new("Sau-Nr.", ColumnType::Number, ColumnRole::VentilNumber);
        ventil.display_name = "Bucht (Ventil)".to_string();
        config.push_column(ventil);

        // The mating-date header carries the export date, so it is addressed
        // by position (1-based) instead of by text.
        let mut event_date = ColumnDef::new(
            format!("Belegdatum{}5", POSITIONAL_COLUMN_SUFFIX),
            ColumnType::Date,
            ColumnRole::EventDate,
        );
        event_date.display_name = "Belegdatum".to_string();
        config.push_column(event_date);

        let mut tk = ColumnDef::new("TK", ColumnType::Number, ColumnRole::None);
        tk.display_name = "Tage trächtig".to_string();
        config.push_column(tk);

        let mut group = ColumnDef::new("Bucht", ColumnType::Text, ColumnRole::None);
        group.display_name = "Gruppe".to_string();
        group.visible = false;
        config.push_column(group);

        let mut boar = ColumnDef::new("Bel.Datum", ColumnType::Text, ColumnRole::None);
        boar.display_name = "Eber".to_string();
        boar.visible = false;
        config.push_column(boar);

        let mut litter = ColumnDef::new("TRT", ColumnType::Number, ColumnRole::None);
        litter.display_name = "Wurf-Nr.".to_string();
        litter.visible = false;
        config.push_column(litter);

        let mut farrowing = ColumnDef::new("vorauss.", ColumnType::Date, ColumnRole::BirthDate);
        farrowing.display_name = "Vorauss. Abferkelung".to_string();
        config.push_column(farrowing);

        config
    }

    /// Append a column, assigning the next display order
    pub fn add_column(
        &mut self,
        source_name: impl Into<String>,
        column_type: ColumnType,
        role: ColumnRole,
    ) {
        self.push_column(ColumnDef::new(source_name, column_type, role));
    }

    fn push_column(&mut self, mut column: ColumnDef) {
        column.display_order = self.columns.len();
        self.columns.push(column);
    }

    /// Remove a column by source name; compacts display orders
    pub fn remove_column(&mut self, source_name: &str) -> bool {
        let Some(index) = self.columns.iter().position(|c| c.source_name == source_name) else {
            return false;
        };
        self.columns.remove(index);
        self.compact_display_orders();
        true
    }

    /// Rename the display name of a column
    pub fn rename_column(&mut self, source_name: &str, display_name: impl Into<String>) -> bool {
        match self.columns.iter_mut().find(|c| c.source_name == source_name) {
            Some(column) => {
                column.display_name = display_name.into();
                true
            }
            None => false,
        }
    }

    /// Move a column to a new display position, shifting the others
    pub fn reorder_column(&mut self, source_name: &str, new_order: usize) -> bool {
        if new_order >= self.columns.len() {
            return false;
        }
        let Some(index) = self.columns.iter().position(|c| c.source_name == source_name) else {
            return false;
        };
        let old_order = self.columns[index].display_order;
        for (i, column) in self.columns.iter_mut().enumerate() {
            if i == index {
                column.display_order = new_order;
            } else if new_order < old_order
                && column.display_order >= new_order
                && column.display_order < old_order
            {
                column.display_order += 1;
            } else if new_order > old_order
                && column.display_order > old_order
                && column.display_order <= new_order
            {
                column.display_order -= 1;
            }
        }
        true
    }

    fn compact_display_orders(&mut self) {
        self.columns.sort_by_key(|c| c.display_order);
        for (i, column) in self.columns.iter_mut().enumerate() {
            column.display_order = i;
        }
    }

    /// First column carrying the given role
    pub fn column_by_role(&self, role: ColumnRole) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.role == role)
    }

    /// Visible columns in display order
    pub fn visible_columns(&self) -> Vec<&ColumnDef> {
        let mut visible: Vec<&ColumnDef> = self.columns.iter().filter(|c| c.visible).collect();
        visible.sort_by_key(|c| c.display_order);
        visible
    }

    /// Validate the mapping before any row is processed.
    ///
    /// Requires exactly one `VentilNumber` and exactly one `EarTagNumber`
    /// column and unique source names.
    pub fn validate(&self) -> Result<()> {
        for role in [ColumnRole::VentilNumber, ColumnRole::EarTagNumber] {
            let count = self.columns.iter().filter(|c| c.role == role).count();
            if count == 0 {
                return Err(Error::configuration(format!(
                    "required column role {role:?} is not mapped"
                )));
            }
            if count > 1 {
                return Err(Error::configuration(format!(
                    "column role {role:?} is mapped {count} times, expected exactly one"
                )));
            }
        }

        let mut names = HashSet::new();
        for column in &self.columns {
            if !names.insert(column.source_name.as_str()) {
                return Err(Error::configuration(format!(
                    "duplicate source column name '{}'",
                    column.source_name
                )));
            }
        }

        Ok(())
    }

    /// Resolve the index of the column carrying `role` against a cleaned
    /// header row.
    ///
    /// Matching is a case-insensitive exact comparison of the source name.
    /// Source names ending in `_Spalte<N>` address the N-th column (1-based)
    /// directly, for headers whose text is unstable across exports.
    pub fn resolve_index(&self, headers: &[String], role: ColumnRole) -> Option<usize> {
        let column = self.column_by_role(role)?;

        if let Some(index) = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(&column.source_name))
        {
            return Some(index);
        }

        // Positional address, e.g. "Belegdatum_Spalte5" -> index 4
        if let Some(pos) = column.source_name.rfind(POSITIONAL_COLUMN_SUFFIX) {
            let suffix = &column.source_name[pos + POSITIONAL_COLUMN_SUFFIX.len()..];
            if let Ok(one_based) = suffix.parse::<usize>() {
                let index = one_based.checked_sub(1)?;
                if index < headers.len() {
                    return Some(index);
                }
            }
        }

        None
    }

    /// Resolve with a caller-supplied positional fallback for exports whose
    /// header text is unstable but whose column order is fixed
    pub fn resolve_index_with_fallback(
        &self,
        headers: &[String],
        role: ColumnRole,
        fallback: usize,
    ) -> Option<usize> {
        if let Some(index) = self.resolve_index(headers, role) {
            return Some(index);
        }
        if fallback < headers.len() {
            debug!(
                "using fallback index {} for column role {:?}",
                fallback, role
            );
            return Some(fallback);
        }
        None
    }

    /// Best-effort role detection from a header name.
    ///
    /// Never required for correctness; an explicit mapping always wins.
    pub fn infer_role(name: &str) -> ColumnRole {
        let lower = name.to_lowercase();
        if lower.contains("ventil") || lower.contains("bucht") {
            ColumnRole::VentilNumber
        } else if lower.contains("ohrmark") || lower.contains("ear") || lower.contains("tag") {
            ColumnRole::EarTagNumber
        } else if lower.contains("deck") || lower.contains("beleg") || lower.contains("mating") {
            ColumnRole::EventDate
        } else if lower.contains("trächt") || lower.contains("pregnan") {
            ColumnRole::PregnancyStatus
        } else if lower.contains("geburt") || lower.contains("birth") || lower.contains("abferkel")
        {
            ColumnRole::BirthDate
        } else if lower.contains("gesund") || lower.contains("health") {
            ColumnRole::HealthStatus
        } else if lower.contains("bemerk") || lower.contains("note") || lower.contains("comment") {
            ColumnRole::Notes
        } else {
            ColumnRole::None
        }
    }

    /// Best-effort type detection from a header name
    pub fn infer_type(name: &str) -> ColumnType {
        let lower = name.to_lowercase();
        if lower.contains("datum") || lower.contains("date") {
            ColumnType::Date
        } else if lower.contains("nummer") || lower.contains("number") || lower.contains("anzahl") {
            ColumnType::Number
        } else if lower.contains("status") {
            ColumnType::Boolean
        } else {
            ColumnType::Text
        }
    }
}

// =============================================================================
// Configuration Store
// =============================================================================

/// Loads and saves column configurations under the application data directory.
///
/// The active configuration lives in `current_config.json`; named profiles
/// sit next to it, one JSON file each.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    directory: PathBuf,
}

impl ConfigStore {
    /// Open (and create if needed) the configuration directory under `data_dir`
    pub fn open(data_dir: &Path) -> Result<Self> {
        let directory = data_dir.join(CONFIG_DIR_NAME);
        fs::create_dir_all(&directory)
            .map_err(|e| Error::io(format!("creating {}", directory.display()), e))?;
        Ok(Self { directory })
    }

    /// Directory holding the configuration files
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Load the active configuration, falling back to the MusterPlan profile
    /// when none has been saved yet
    pub fn load_current(&self) -> ColumnConfig {
        let path = self.directory.join(CURRENT_CONFIG_FILE);
        match self.load_file(&path) {
            Ok(Some(config)) => config,
            Ok(None) => {
                info!("no active column configuration, using MusterPlan defaults");
                ColumnConfig::musterplan()
            }
            Err(e) => {
                warn!("failed to load active column configuration: {e}");
                ColumnConfig::musterplan()
            }
        }
    }

    /// Validate and persist the active configuration
    pub fn save_current(&self, config: &ColumnConfig) -> Result<()> {
        config.validate()?;
        let mut stamped = config.clone();
        stamped.last_modified = Some(chrono::Utc::now());
        self.write_file(&self.directory.join(CURRENT_CONFIG_FILE), &stamped)
    }

    /// Persist a deep copy of `config` as a named profile
    pub fn save_profile(&self, name: &str, config: &ColumnConfig) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::configuration("profile name must not be empty"));
        }
        config.validate()?;
        let mut profile = config.clone();
        profile.name = name.to_string();
        profile.last_modified = Some(chrono::Utc::now());
        self.write_file(&self.profile_path(name), &profile)
    }

    /// Load a named profile and make it the active configuration
    pub fn load_profile(&self, name: &str) -> Result<ColumnConfig> {
        let path = self.profile_path(name);
        let config = self
            .load_file(&path)?
            .ok_or_else(|| Error::configuration(format!("profile '{name}' not found")))?;
        config.validate()?;
        self.save_current(&config)?;
        Ok(config)
    }

    /// Delete a named profile
    pub fn delete_profile(&self, name: &str) -> Result<bool> {
        let path = self.profile_path(name);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|e| Error::io(format!("deleting {}", path.display()), e))?;
        Ok(true)
    }

    /// Names of all saved profiles
    pub fn list_profiles(&self) -> Result<Vec<String>> {
        let mut profiles = Vec::new();
        for entry in fs::read_dir(&self.directory)
            .map_err(|e| Error::io(format!("reading {}", self.directory.display()), e))?
        {
            let entry = entry.map_err(Error::from)?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if stem != "current_config" {
                    profiles.push(stem.to_string());
                }
            }
        }
        profiles.sort();
        Ok(profiles)
    }

    /// Build a configuration from an unfamiliar file's header row.
    ///
    /// Roles and types are populated via the inference heuristics; parsing
    /// settings (delimiter, encoding) are taken from `base`. Best-effort
    /// only: the result still needs both required roles to validate, and a
    /// manual mapping always takes precedence.
    pub fn detect_from_csv(&self, path: &Path, base: &ColumnConfig) -> Result<ColumnConfig> {
        use crate::app::services::csv_import::{clean_value, parse_line};

        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }
        let bytes =
            fs::read(path).map_err(|e| Error::io(format!("reading {}", path.display()), e))?;
        let (text, _, _) = base.encoding.encoding().decode(&bytes);

        let Some(header_line) = text.lines().find(|line| !line.trim().is_empty()) else {
            return Err(Error::empty_input(path.display().to_string()));
        };

        let mut detected = ColumnConfig::new(format!(
            "Importiert_{}",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        ));
        detected.delimiter = base.delimiter;
        detected.has_header = true;
        detected.encoding = base.encoding;

        for raw in parse_line(header_line, base.delimiter) {
            let name = clean_value(&raw);
            if name.is_empty() {
                continue;
            }
            let role = ColumnConfig::infer_role(&name);
            let column_type = ColumnConfig::infer_type(&name);
            // Only the first candidate per required role keeps it; duplicates
            // would fail validation
            let role = if matches!(role, ColumnRole::VentilNumber | ColumnRole::EarTagNumber)
                && detected.column_by_role(role).is_some()
            {
                ColumnRole::None
            } else {
                role
            };
            detected.add_column(name, column_type, role);
        }

        info!(
            "detected {} columns from {}",
            detected.columns.len(),
            path.display()
        );
        Ok(detected)
    }

    fn profile_path(&self, name: &str) -> PathBuf {
        self.directory.join(format!("{}.json", sanitize_file_name(name)))
    }

    fn load_file(&self, path: &Path) -> Result<Option<ColumnConfig>> {
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("reading {}", path.display()), e))?;
        let config = serde_json::from_str(&json)
            .map_err(|e| Error::configuration(format!("invalid config {}: {e}", path.display())))?;
        Ok(Some(config))
    }

    fn write_file(&self, path: &Path, config: &ColumnConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        fs::write(path, json).map_err(|e| Error::io(format!("writing {}", path.display()), e))?;
        debug!("saved column configuration to {}", path.display());
        Ok(())
    }
}

/// Replace characters that are invalid in file names
fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}
