//! Record store wiring for the persistence layer

use std::path::PathBuf;
use std::sync::Arc;

use haulboard_domain::model::{CalendarEvent, Driver, Load, LogisticsRow, Record};
use haulboard_domain::repository::RecordStore;
use haulboard_infra::persistence::{JsonDirStore, SampleStore};

use crate::config::Config;

/// One record store per record kind
#[derive(Clone)]
pub struct RecordStores {
    pub loads: Arc<dyn RecordStore<Load>>,
    pub drivers: Arc<dyn RecordStore<Driver>>,
    pub calendar_events: Arc<dyn RecordStore<CalendarEvent>>,
    pub logistics: Arc<dyn RecordStore<LogisticsRow>>,
}

impl RecordStores {
    /// Stores serving the built-in sample snapshot
    pub fn sample() -> Self {
        let store = Arc::new(SampleStore);
        Self {
            loads: store.clone(),
            drivers: store.clone(),
            calendar_events: store.clone(),
            logistics: store,
        }
    }

    /// Stores reading snapshots from a data directory
    pub fn json_dir(dir: PathBuf) -> Self {
        let store = Arc::new(JsonDirStore::new(dir));
        Self {
            loads: store.clone(),
            drivers: store.clone(),
            calendar_events: store.clone(),
            logistics: store,
        }
    }
}

/// Open the record stores selected by the config
pub fn open_record_stores(config: &Config) -> RecordStores {
    match &config.data_dir {
        Some(dir) => RecordStores::json_dir(dir.clone()),
        None => RecordStores::sample(),
    }
}

/// Store lookup by record type, for code generic over record kinds
pub trait StoreFor<R: Record> {
    fn store(&self) -> Arc<dyn RecordStore<R>>;
}

impl StoreFor<Load> for RecordStores {
    fn store(&self) -> Arc<dyn RecordStore<Load>> {
        Arc::clone(&self.loads)
    }
}

impl StoreFor<Driver> for RecordStores {
    fn store(&self) -> Arc<dyn RecordStore<Driver>> {
        Arc::clone(&self.drivers)
    }
}

impl StoreFor<CalendarEvent> for RecordStores {
    fn store(&self) -> Arc<dyn RecordStore<CalendarEvent>> {
        Arc::clone(&self.calendar_events)
    }
}

impl StoreFor<LogisticsRow> for RecordStores {
    fn store(&self) -> Arc<dyn RecordStore<LogisticsRow>> {
        Arc::clone(&self.logistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_sample_data() {
        let stores = open_record_stores(&Config::default());
        let loads = StoreFor::<Load>::store(&stores).fetch_records().unwrap();
        assert_eq!(loads.len(), 5);
    }

    #[test]
    fn test_data_dir_config_reads_files() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("drivers.json"), "[]").unwrap();
        let config = Config {
            data_dir: Some(temp.path().to_path_buf()),
            ..Config::default()
        };
        let stores = open_record_stores(&config);
        assert!(stores.drivers.fetch_records().unwrap().is_empty());
        assert!(stores.loads.fetch_records().is_err());
    }
}
