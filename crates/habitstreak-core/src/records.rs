//! Caller-side helpers for completion records.
//!
//! The engine assumes its input is already filtered to one habit. These
//! helpers read records handed over as a JSON array and do that filtering.

use std::path::Path;
use uuid::Uuid;

use crate::error::{RecordsError, Result};
use crate::period::CompletionRecord;

/// Read a JSON array of completion records.
///
/// # Errors
/// Returns [`RecordsError::ReadFailed`] if the file cannot be read and
/// [`RecordsError::Malformed`] if it does not hold a record array.
pub fn load_records(path: &Path) -> Result<Vec<CompletionRecord>, RecordsError> {
    let content = std::fs::read_to_string(path).map_err(|source| RecordsError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| RecordsError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a records file and keep only `habit_id`'s records.
///
/// # Errors
/// Propagates the errors of [`load_records`].
pub fn load_for_habit(path: &Path, habit_id: Uuid) -> Result<Vec<CompletionRecord>> {
    let records = load_records(path)?;
    Ok(for_habit(&records, habit_id))
}

/// Records belonging to `habit_id`, in input order.
pub fn for_habit(records: &[CompletionRecord], habit_id: Uuid) -> Vec<CompletionRecord> {
    records
        .iter()
        .filter(|r| r.habit_id == habit_id)
        .cloned()
        .collect()
}
