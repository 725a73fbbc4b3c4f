//! Item ingestion: JSON in, validated [`TimelineItem`]s out.
//!
//! All precondition checks for lane assignment live here. Malformed input is
//! rejected with a descriptive [`TimelineError`]; nothing is clamped or
//! silently repaired, so the assigner never sees an inverted span or a
//! duplicated identity.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use super::item::{ItemRecord, TimelineItem};
use crate::error::TimelineError;

/// Parse and validate a JSON array of item records.
///
/// # Errors
///
/// Returns [`TimelineError::Json`] for input that is not an array of records,
/// and the per-record and duplicate-id errors from [`validate_records`].
pub fn parse_items(json: &str) -> Result<Vec<TimelineItem>, TimelineError> {
    let records: Vec<ItemRecord> = serde_json::from_str(json)?;
    validate_records(records)
}

/// Read a JSON item file from disk.
///
/// # Errors
///
/// Returns [`TimelineError::Io`] when the file cannot be read, otherwise the
/// errors of [`parse_items`].
pub fn load_items(path: &Path) -> Result<Vec<TimelineItem>, TimelineError> {
    let content = std::fs::read_to_string(path).map_err(|source| TimelineError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let items = parse_items(&content)?;
    debug!(path = %path.display(), count = items.len(), "loaded timeline items");
    Ok(items)
}

/// Convert records to items, preserving input order.
///
/// # Errors
///
/// Fails on the first invalid record, or on the second occurrence of an id.
pub fn validate_records(records: Vec<ItemRecord>) -> Result<Vec<TimelineItem>, TimelineError> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut items = Vec::with_capacity(records.len());

    for record in records {
        let item = record.into_item()?;
        if !seen.insert(item.id()) {
            return Err(TimelineError::DuplicateId(item.id()));
        }
        items.push(item);
    }

    Ok(items)
}

/// Serialize items back to the wire shape as pretty JSON.
///
/// # Errors
///
/// Returns [`TimelineError::Json`] if serialization fails.
pub fn to_json(items: &[TimelineItem]) -> Result<String, TimelineError> {
    let records: Vec<ItemRecord> = items.iter().map(ItemRecord::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}
