//! File-based record store
//!
//! Reads one JSON array per record kind from a data directory:
//!
//! ```text
//! <dir>/loads.json
//! <dir>/drivers.json
//! <dir>/calendar_events.json   (optional, derived from loads.json when absent)
//! <dir>/logistics.json         (or logistics.csv)
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use haulboard_domain::model::{CalendarEvent, Driver, Load, LogisticsRow, Record};
use haulboard_domain::repository::{ensure_unique_ids, RecordStore};
use haulboard_types::{FetchError, RecordKind, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::logistics_csv;
use crate::sample_data::events_from_loads;

/// Record store reading JSON snapshots from a directory
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the JSON snapshot for one record kind
    pub fn snapshot_path(&self, kind: RecordKind) -> PathBuf {
        self.dir.join(format!("{}.json", kind.file_stem()))
    }

    fn read_json<R: Record + DeserializeOwned>(&self, path: &Path) -> Result<Vec<R>> {
        let file = File::open(path).map_err(|e| FetchError::Unavailable {
            kind: R::KIND,
            reason: format!("{}: {}", path.display(), e),
        })?;
        let reader = BufReader::new(file);
        let records: Vec<R> = serde_json::from_reader(reader)?;
        ensure_unique_ids(&records)?;
        info!(kind = %R::KIND, count = records.len(), path = %path.display(), "loaded snapshot");
        Ok(records)
    }

    fn read_kind<R: Record + DeserializeOwned>(&self) -> Result<Vec<R>> {
        self.read_json(&self.snapshot_path(R::KIND))
    }
}

impl RecordStore<Load> for JsonDirStore {
    fn fetch_records(&self) -> Result<Vec<Load>> {
        self.read_kind()
    }
}

impl RecordStore<Driver> for JsonDirStore {
    fn fetch_records(&self) -> Result<Vec<Driver>> {
        self.read_kind()
    }
}

impl RecordStore<CalendarEvent> for JsonDirStore {
    fn fetch_records(&self) -> Result<Vec<CalendarEvent>> {
        let path = self.snapshot_path(RecordKind::CalendarEvents);
        if path.exists() {
            return self.read_json(&path);
        }

        debug!(path = %path.display(), "no calendar snapshot, deriving events from loads");
        let loads: Vec<Load> = self.read_kind()?;
        let events = events_from_loads(&loads);
        ensure_unique_ids(&events)?;
        Ok(events)
    }
}

impl RecordStore<LogisticsRow> for JsonDirStore {
    fn fetch_records(&self) -> Result<Vec<LogisticsRow>> {
        let path = self.snapshot_path(RecordKind::Logistics);
        let csv_path = path.with_extension("csv");
        if !path.exists() && csv_path.exists() {
            let rows = logistics_csv::load_logistics_csv(&csv_path)?;
            ensure_unique_ids(&rows)?;
            return Ok(rows);
        }
        self.read_json(&path)
    }
}
