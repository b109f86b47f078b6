//! Authoritative sow-record store
//!
//! The single writable owner of all imported records. Imports merge rows
//! with per-key deduplication, persist the full document synchronously,
//! sweep entries outside the retention window, and rebuild the serving
//! index wholesale. All mutations serialize behind one mutex per store
//! instance; concurrent imports queue, they never interleave. Readers only
//! ever see the last fully rebuilt index.

use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::app::models::{
    ImportHistoryEntry, ImportResult, SortOrder, SowRecord, StoreEvent, StoreStats, StoredEntry,
};
use crate::app::services::csv_import::{self, ResolvedColumns};
use crate::app::services::csv_import::field_parsers::days_since_event;
use crate::app::services::serving_index::VentilIndex;
use crate::app::services::traffic_light::{Thresholds, classify};
use crate::config::ColumnConfig;
use crate::constants::{APP_DIR_NAME, DB_FILE_NAME, HISTORY_FILE_NAME, RETENTION_MONTHS};
use crate::{Error, Result};

pub mod import;
pub mod persistence;
pub mod retention;

#[cfg(test)]
pub mod tests;

/// Lifecycle phase of the import pipeline.
///
/// Every import passes through all phases in order; row-level failures stay
/// inside `Merging`, only unrecoverable errors reach `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportPhase {
    Idle,
    Parsing,
    Merging,
    Persisting,
    Sweeping,
    IndexRebuilding,
    Failed,
}

/// Subscriber callback for store change notifications
pub type Subscriber = Box<dyn Fn(&StoreEvent) + Send + Sync>;

/// Mutable store state guarded by the write mutex
#[derive(Debug)]
struct StoreState {
    entries: Vec<StoredEntry>,
    history: Vec<ImportHistoryEntry>,
    thresholds: Thresholds,
    last_updated: Option<DateTime<Utc>>,
    phase: ImportPhase,
}

/// Deduplicating, retention-bounded record store with a derived serving index
pub struct SowStore {
    db_path: PathBuf,
    history_path: PathBuf,
    retention_months: u32,
    state: Mutex<StoreState>,
    index: RwLock<Arc<VentilIndex>>,
    subscribers: Mutex<Vec<Subscriber>>,
}

/// Application data directory under the platform user data dir
pub fn default_data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir()
        .ok_or_else(|| Error::configuration("could not determine user data directory"))?;
    Ok(base.join(APP_DIR_NAME))
}

impl SowStore {
    /// Open the store under `data_dir` with default thresholds.
    ///
    /// Loads both persisted documents (or starts empty), re-classifies every
    /// record against the current time, runs a retention sweep and builds
    /// the serving index.
    pub fn open(data_dir: &Path) -> Result<Self> {
        Self::open_with(data_dir, Thresholds::default())
    }

    /// Open the store with custom classification thresholds
    pub fn open_with(data_dir: &Path, thresholds: Thresholds) -> Result<Self> {
        Self::open_at(data_dir, thresholds, Utc::now())
    }

    /// Clock-injected open, used by tests
    pub fn open_at(data_dir: &Path, thresholds: Thresholds, now: DateTime<Utc>) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .map_err(|e| Error::io(format!("creating {}", data_dir.display()), e))?;

        let db_path = data_dir.join(DB_FILE_NAME);
        let history_path = data_dir.join(HISTORY_FILE_NAME);

        let (mut entries, last_updated) = match persistence::load_store(&db_path)? {
            Some(document) => (document.entries, Some(document.last_updated)),
            None => (Vec::new(), None),
        };
        let history = persistence::load_history(&history_path)?
            .map(|document| document.imports)
            .unwrap_or_default();

        // "now" has advanced since the last run: recompute day counts and
        // classifications before anything reads them
        reclassify_entries(&mut entries, &thresholds, now);

        let removed = retention::sweep_entries(&mut entries, now, RETENTION_MONTHS);
        if removed > 0 {
            if let Err(e) = persistence::save_store(&db_path, &entries, now) {
                warn!("could not persist post-load sweep: {e}");
            }
        }

        let index = VentilIndex::rebuild_from(&entries);
        info!(
            "store opened with {} entries across {} ventils",
            index.record_count(),
            index.ventil_count()
        );

        Ok(Self {
            db_path,
            history_path,
            retention_months: RETENTION_MONTHS,
            state: Mutex::new(StoreState {
                entries,
                history,
                thresholds,
                last_updated,
                phase: ImportPhase::Idle,
            }),
            index: RwLock::new(Arc::new(index)),
            subscribers: Mutex::new(Vec::new()),
        })
    }

    // =========================================================================
    // Mutations (serialized behind the state mutex)
    // =========================================================================

    /// Import one export file.
    ///
    /// Blocks for the duration of read + parse + merge + persist. The
    /// persisted document is written all-or-nothing: a persistence failure
    /// rolls the in-memory merge back and leaves the store as before the
    /// call. Row-level failures are counted, never fatal.
    pub fn import_file(&self, path: &Path, config: &ColumnConfig) -> Result<ImportResult> {
        self.import_file_at(path, config, Utc::now(), None)
    }

    /// Import with a progress bar ticking once per merged row
    pub fn import_file_with_progress(
        &self,
        path: &Path,
        config: &ColumnConfig,
        progress: &ProgressBar,
    ) -> Result<ImportResult> {
        self.import_file_at(path, config, Utc::now(), Some(progress))
    }

    /// Clock-injected import, used by tests
    pub fn import_file_at(
        &self,
        path: &Path,
        config: &ColumnConfig,
        now: DateTime<Utc>,
        progress: Option<&ProgressBar>,
    ) -> Result<ImportResult> {
        // Configuration errors surface before any row is touched
        config.validate()?;

        let mut state = self.lock_state();

        state.phase = ImportPhase::Parsing;
        let file = match csv_import::read_file(path, config) {
            Ok(file) => file,
            Err(e) => return Err(self.fail(&mut state, e)),
        };
        let columns = match ResolvedColumns::resolve(&file.headers, config) {
            Ok(columns) => columns,
            Err(e) => return Err(self.fail(&mut state, e)),
        };

        state.phase = ImportPhase::Merging;
        let snapshot = state.entries.clone();
        let thresholds = state.thresholds;
        let result = import::merge_rows(
            &mut state.entries,
            &file,
            &columns,
            &thresholds,
            now,
            progress,
        );

        state.phase = ImportPhase::Persisting;
        if let Err(e) = persistence::save_store(&self.db_path, &state.entries, now) {
            // All-or-nothing: the merge never becomes visible
            state.entries = snapshot;
            return Err(self.fail(&mut state, e));
        }
        state.last_updated = Some(now);

        state.history.push(ImportHistoryEntry {
            source_file: file.file_name.clone(),
            imported_at: now,
            record_count: result.merged(),
        });
        if let Err(e) = persistence::save_history(&self.history_path, &state.history) {
            // The store document is already durable; history is advisory
            warn!("could not persist import history: {e}");
        }

        state.phase = ImportPhase::Sweeping;
        let removed = retention::sweep_entries(&mut state.entries, now, self.retention_months);
        if removed > 0 {
            if let Err(e) = persistence::save_store(&self.db_path, &state.entries, now) {
                warn!("could not persist post-import sweep: {e}");
            }
        }

        state.phase = ImportPhase::IndexRebuilding;
        self.rebuild_index(&state);

        state.phase = ImportPhase::Idle;
        drop(state);

        info!(
            "import of {} complete: {} added, {} updated, {} skipped",
            file.file_name, result.added, result.updated, result.skipped
        );
        self.notify(&StoreEvent::Imported {
            source_file: file.file_name,
            result,
        });

        Ok(result)
    }

    /// Run a retention sweep on demand
    pub fn sweep(&self) -> Result<usize> {
        self.sweep_at(Utc::now())
    }

    /// Clock-injected sweep with the default retention window
    pub fn sweep_at(&self, now: DateTime<Utc>) -> Result<usize> {
        self.sweep_with(now, self.retention_months)
    }

    /// Sweep with an explicit retention window in months
    pub fn sweep_with(&self, now: DateTime<Utc>, retention_months: u32) -> Result<usize> {
        let mut state = self.lock_state();

        state.phase = ImportPhase::Sweeping;
        let removed = retention::sweep_entries(&mut state.entries, now, retention_months);
        if removed > 0 {
            if let Err(e) = persistence::save_store(&self.db_path, &state.entries, now) {
                return Err(self.fail(&mut state, e));
            }
            state.last_updated = Some(now);
            state.phase = ImportPhase::IndexRebuilding;
            self.rebuild_index(&state);
        }
        state.phase = ImportPhase::Idle;
        drop(state);

        if removed > 0 {
            self.notify(&StoreEvent::Swept { removed });
        }
        Ok(removed)
    }

    /// Replace the classification thresholds and re-classify every stored
    /// record in the same pass (no lazy recompute)
    pub fn set_thresholds(&self, thresholds: Thresholds) -> Result<()> {
        self.set_thresholds_at(thresholds, Utc::now())
    }

    /// Clock-injected threshold change, used by tests
    pub fn set_thresholds_at(&self, thresholds: Thresholds, now: DateTime<Utc>) -> Result<()> {
        let mut state = self.lock_state();

        state.thresholds = thresholds;
        reclassify_entries(&mut state.entries, &thresholds, now);

        if let Err(e) = persistence::save_store(&self.db_path, &state.entries, now) {
            // Classifications are derivable; the next successful write
            // catches the file up
            warn!("could not persist reclassified store: {e}");
        } else {
            state.last_updated = Some(now);
        }

        self.rebuild_index(&state);
        drop(state);

        self.notify(&StoreEvent::ThresholdsChanged);
        Ok(())
    }

    /// Empty the store and the import history (full reset)
    pub fn clear(&self) -> Result<()> {
        let now = Utc::now();
        let mut state = self.lock_state();

        let entries_snapshot = std::mem::take(&mut state.entries);
        let history_snapshot = std::mem::take(&mut state.history);

        if let Err(e) = persistence::save_store(&self.db_path, &state.entries, now) {
            state.entries = entries_snapshot;
            state.history = history_snapshot;
            return Err(self.fail(&mut state, e));
        }
        if let Err(e) = persistence::save_history(&self.history_path, &state.history) {
            warn!("could not persist cleared history: {e}");
        }
        state.last_updated = Some(now);

        self.rebuild_index(&state);
        drop(state);

        info!("store cleared");
        self.notify(&StoreEvent::Cleared);
        Ok(())
    }

    // =========================================================================
    // Queries (read the last fully rebuilt index)
    // =========================================================================

    /// Records assigned to a ventil, sorted as requested
    pub fn records_for_ventil(&self, ventil_number: i32, sort: SortOrder) -> Vec<SowRecord> {
        self.current_index().records_for_ventil(ventil_number, sort)
    }

    /// Record with the given ear tag
    pub fn record_by_ear_tag(&self, ear_tag: &str) -> Option<SowRecord> {
        self.current_index().record_by_ear_tag(ear_tag).cloned()
    }

    /// All ventil numbers with at least one record, ascending
    pub fn ventil_numbers(&self) -> Vec<i32> {
        self.current_index().ventil_numbers()
    }

    /// Aggregate statistics over the current content
    pub fn stats(&self) -> StoreStats {
        // Computed from the state alone: mutations acquire the state mutex
        // before the index lock, and mixing the order here could deadlock
        let state = self.lock_state();
        let ventils: std::collections::HashSet<i32> = state
            .entries
            .iter()
            .map(|entry| entry.record.ventil_number)
            .collect();
        StoreStats {
            total_records: state.entries.len(),
            total_ventils: ventils.len(),
            last_updated: state.last_updated,
            import_count: state.history.len(),
        }
    }

    /// Import history, oldest first
    pub fn history(&self) -> Vec<ImportHistoryEntry> {
        self.lock_state().history.clone()
    }

    /// Active classification thresholds
    pub fn thresholds(&self) -> Thresholds {
        self.lock_state().thresholds
    }

    /// Current import lifecycle phase.
    ///
    /// `Idle` whenever no mutation is in flight; a caller that observes the
    /// phase mid-import is blocked behind the write mutex anyway, so this is
    /// mainly useful for diagnostics.
    pub fn import_phase(&self) -> ImportPhase {
        self.lock_state().phase
    }

    /// Register a change-notification callback, invoked after every
    /// successful import, sweep, threshold change or clear
    pub fn subscribe(&self, subscriber: impl Fn(&StoreEvent) + Send + Sync + 'static) {
        self.subscribers
            .lock()
            .expect("subscriber lock poisoned")
            .push(Box::new(subscriber));
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn lock_state(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.state.lock().expect("store lock poisoned")
    }

    /// Snapshot the current index Arc; readers keep a consistent view even
    /// while a rebuild swaps the index underneath them
    fn current_index(&self) -> Arc<VentilIndex> {
        self.index.read().expect("index lock poisoned").clone()
    }

    /// Construct a fresh index and swap it in atomically
    fn rebuild_index(&self, state: &StoreState) {
        let index = Arc::new(VentilIndex::rebuild_from(&state.entries));
        *self.index.write().expect("index lock poisoned") = index;
        debug!("serving index swapped in");
    }

    fn fail(&self, state: &mut StoreState, error: Error) -> Error {
        state.phase = ImportPhase::Failed;
        warn!("import failed: {error}");
        state.phase = ImportPhase::Idle;
        error
    }

    fn notify(&self, event: &StoreEvent) {
        for subscriber in self
            .subscribers
            .lock()
            .expect("subscriber lock poisoned")
            .iter()
        {
            subscriber(event);
        }
    }
}

/// Recompute day counts and classifications for every entry.
///
/// Used at store load (the clock has advanced) and on threshold changes, so
/// all entries always reflect one threshold set and one "now".
fn reclassify_entries(entries: &mut [StoredEntry], thresholds: &Thresholds, now: DateTime<Utc>) {
    for entry in entries {
        let record = &mut entry.record;
        record.days_since_event = days_since_event(record.event_date, now);
        record.traffic_light = classify(
            record.health_status.as_deref(),
            record.days_since_event,
            thresholds,
        );
    }
}
