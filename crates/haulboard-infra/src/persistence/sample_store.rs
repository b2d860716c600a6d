//! Record store backed by the built-in sample snapshot

use haulboard_domain::model::{CalendarEvent, Driver, Load, LogisticsRow, Record};
use haulboard_domain::repository::RecordStore;
use haulboard_types::Result;
use tracing::debug;

use crate::sample_data;

/// Serves the embedded sample records for every record kind
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleStore;

fn logged<R: Record>(records: Result<Vec<R>>) -> Result<Vec<R>> {
    if let Ok(records) = &records {
        debug!(kind = %R::KIND, count = records.len(), "served sample snapshot");
    }
    records
}

impl RecordStore<Load> for SampleStore {
    fn fetch_records(&self) -> Result<Vec<Load>> {
        logged(sample_data::sample_loads())
    }
}

impl RecordStore<Driver> for SampleStore {
    fn fetch_records(&self) -> Result<Vec<Driver>> {
        logged(sample_data::sample_drivers())
    }
}

impl RecordStore<CalendarEvent> for SampleStore {
    fn fetch_records(&self) -> Result<Vec<CalendarEvent>> {
        logged(sample_data::sample_calendar_events())
    }
}

impl RecordStore<LogisticsRow> for SampleStore {
    fn fetch_records(&self) -> Result<Vec<LogisticsRow>> {
        logged(sample_data::sample_logistics())
    }
}
