//! CSV export of the history log.

use crate::{HistoryEntry, Result};
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    date: String,
    bmi: f64,
    weight: f64,
    category: &'a str,
    age: Option<u32>,
    gender: &'static str,
}

impl<'a> From<&'a HistoryEntry> for CsvRow<'a> {
    fn from(entry: &'a HistoryEntry) -> Self {
        CsvRow {
            date: entry.date.to_rfc3339(),
            bmi: entry.bmi,
            weight: entry.weight,
            category: &entry.category,
            age: entry.age,
            gender: entry.gender.as_str(),
        }
    }
}

/// Write the log to `path` as CSV in commit order
///
/// Overwrites any existing file. The header row is written even for an empty
/// log. Returns the number of data rows written.
pub fn export_history(entries: &[HistoryEntry], path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(["date", "bmi", "weight", "category", "age", "gender"])?;

    for entry in entries {
        writer.serialize(CsvRow::from(entry))?;
    }

    writer.flush()?;
    writer.into_inner().map_err(|e| crate::Error::Io(e.into_error()))?.sync_all()?;

    tracing::info!("Exported {} history entries to {:?}", entries.len(), path);
    Ok(entries.len())
}
