//! Durable snapshot storage.
//!
//! One JSON file holds the last-known today/forecast buckets plus a
//! save timestamp. Load repairs stale "today" entries left over from a
//! previous day; save replaces the file atomically via a temp file and
//! rename so a reader never observes a half-written snapshot.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tracing::{info, warn};

use crate::core::Snapshot;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot file corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads persisted state, repairing the `today` bucket down to
    /// entries dated exactly `current_date` (undated or unparsable
    /// entries are dropped too). A missing or corrupt file is the same
    /// as no prior state.
    pub fn load(&self, current_date: NaiveDate) -> Snapshot {
        let snapshot = match self.read_file() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                info!(path = %self.path.display(), "No snapshot file, starting from empty state");
                return Snapshot::empty();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to load snapshot, starting from empty state");
                return Snapshot::empty();
            }
        };

        let loaded_today = snapshot.today.len();
        let today: Vec<_> = snapshot
            .today
            .into_iter()
            .filter(|event| event.parsed_date() == Some(current_date))
            .collect();
        if today.len() != loaded_today {
            info!(
                dropped = loaded_today - today.len(),
                "Dropped stale entries from today bucket on load"
            );
        }
        info!(
            today = today.len(),
            forecast = snapshot.forecast.len(),
            last_update = snapshot.last_update.as_deref().unwrap_or("never"),
            "Loaded snapshot"
        );

        Snapshot {
            today,
            forecast: snapshot.forecast,
            last_update: snapshot.last_update,
        }
    }

    fn read_file(&self) -> Result<Option<Snapshot>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Writes both buckets plus a freshly captured save timestamp,
    /// replacing any prior content. The rename only ever installs a
    /// fully written file.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let record = Snapshot {
            today: snapshot.today.clone(),
            forecast: snapshot.forecast.clone(),
            last_update: Some(Utc::now().to_rfc3339()),
        };
        let json = serde_json::to_string_pretty(&record)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        info!(
            path = %self.path.display(),
            today = record.today.len(),
            forecast = record.forecast.len(),
            "Snapshot saved"
        );
        Ok(())
    }
}
