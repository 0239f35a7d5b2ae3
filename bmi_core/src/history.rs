//! Append-only history of committed BMI results.
//!
//! The whole log is stored as one JSON array under a fixed key of a
//! [`KeyValueStore`]. Every append rewrites the full array. A failed write is
//! reported to the caller but the in-memory log keeps the new entry, so
//! memory and storage can diverge until the next successful write.

use crate::{Assessment, HistoryEntry, KeyValueStore, MeasurementInput, Result, TrendPoint};
use chrono::{DateTime, Utc};

/// Storage key the history log lives under
pub const DEFAULT_HISTORY_KEY: &str = "bmi-history";

impl HistoryEntry {
    /// Build an entry from a successful assessment and the input it came from
    pub fn from_assessment(
        assessment: &Assessment,
        input: &MeasurementInput,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            date,
            bmi: assessment.result.bmi,
            weight: assessment.result.weight_kg,
            category: assessment.result.category.name.to_string(),
            age: input.age,
            gender: input.gender,
        }
    }

    /// Short chart label, e.g. `Oct 17`
    pub fn short_date_label(&self) -> String {
        self.date.format("%b %-d").to_string()
    }

    /// Long list label, e.g. `October 17, 2026`
    pub fn long_date_label(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }
}

/// Load the history log stored under `key`
///
/// Never fails: a missing value, a read error and unparseable content all
/// yield an empty log.
pub fn load_history<S: KeyValueStore>(store: &S, key: &str) -> Vec<HistoryEntry> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::info!("No history stored under {:?}, starting empty", key);
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!("Failed to read history {:?}: {}. Starting empty.", key, e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
        Ok(entries) => {
            tracing::debug!("Loaded {} history entries from {:?}", entries.len(), key);
            entries
        }
        Err(e) => {
            tracing::warn!("Failed to parse history {:?}: {}. Starting empty.", key, e);
            Vec::new()
        }
    }
}

/// Project the log onto `(date label, bmi)` points for charting
pub fn trend(entries: &[HistoryEntry]) -> Vec<TrendPoint> {
    entries
        .iter()
        .map(|entry| TrendPoint {
            label: entry.short_date_label(),
            bmi: entry.bmi,
        })
        .collect()
}

/// Owner of the in-memory history log and its persisted copy
pub struct HistoryStore<S: KeyValueStore> {
    store: S,
    key: String,
    entries: Vec<HistoryEntry>,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Open the log under the default key
    pub fn open(store: S) -> Self {
        Self::open_with_key(store, DEFAULT_HISTORY_KEY)
    }

    /// Open the log under a custom key, loading whatever is persisted there
    pub fn open_with_key(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let entries = load_history(&store, &key);
        Self {
            store,
            key,
            entries,
        }
    }

    /// Re-read the persisted log, replacing the in-memory copy
    pub fn load(&mut self) -> &[HistoryEntry] {
        self.entries = load_history(&self.store, &self.key);
        &self.entries
    }

    /// Append an entry and persist the full log
    ///
    /// On a write failure the error is returned and the entry stays in memory.
    pub fn append(&mut self, entry: HistoryEntry) -> Result<()> {
        self.entries.push(entry);
        self.persist().map_err(|e| {
            tracing::warn!(
                "Failed to persist history ({} entries in memory): {}",
                self.entries.len(),
                e
            );
            e
        })
    }

    /// Commit the current assessment as a new entry stamped `now`
    pub fn commit(
        &mut self,
        assessment: &Assessment,
        input: &MeasurementInput,
        now: DateTime<Utc>,
    ) -> Result<HistoryEntry> {
        let entry = HistoryEntry::from_assessment(assessment, input, now);
        self.append(entry.clone())?;
        Ok(entry)
    }

    fn persist(&mut self) -> Result<()> {
        let blob = serde_json::to_string(&self.entries)?;
        self.store.set(&self.key, &blob)?;
        tracing::debug!("Persisted {} history entries to {:?}", self.entries.len(), self.key);
        Ok(())
    }

    /// Entries in commit order (oldest first)
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Entries newest first, as the history list shows them
    pub fn recent_first(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    pub fn trend(&self) -> Vec<TrendPoint> {
        trend(&self.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Access the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }
}
