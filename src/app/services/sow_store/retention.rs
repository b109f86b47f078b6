//! Retention sweep over stored entries
//!
//! Entries are purged once their import timestamp falls outside the rolling
//! window, regardless of their business dates. Import history is never
//! swept.

use chrono::{DateTime, Months, Utc};
use tracing::info;

use crate::app::models::StoredEntry;

/// Remove entries imported before `now - retention_months`.
///
/// Returns the number of removed entries. The cutoff is computed in calendar
/// months; when month arithmetic underflows (degenerate `now` values) the
/// sweep removes nothing.
pub fn sweep_entries(
    entries: &mut Vec<StoredEntry>,
    now: DateTime<Utc>,
    retention_months: u32,
) -> usize {
    let Some(cutoff) = now.checked_sub_months(Months::new(retention_months)) else {
        return 0;
    };

    let before = entries.len();
    entries.retain(|entry| entry.imported_at >= cutoff);
    let removed = before - entries.len();

    if removed > 0 {
        info!(
            "retention sweep removed {} entries older than {} months",
            removed, retention_months
        );
    }

    removed
}
