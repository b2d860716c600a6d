//! Query Service - detail and summary lookups
//!
//! Each query takes a fresh snapshot from the backend's record stores.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use haulboard_domain::model::{CalendarEvent, Driver, Load};
use haulboard_domain::service::{
    find_record, group_by_day, in_month, in_week, on_day, sort, DashboardMetrics, SortSpec,
};
use haulboard_types::{Error, RecordKind};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::backend::Backend;

/// Errors specific to the query service
#[derive(Debug, Error)]
pub enum QueryServiceError {
    #[error("Store not accessible: {0}")]
    StoreError(#[source] Error),

    #[error("No {kind} record with id '{id}'")]
    NotFound { kind: RecordKind, id: String },
}

impl From<Error> for QueryServiceError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound { kind, id } => QueryServiceError::NotFound { kind, id },
            other => QueryServiceError::StoreError(other),
        }
    }
}

impl From<QueryServiceError> for Error {
    fn from(err: QueryServiceError) -> Self {
        match err {
            QueryServiceError::StoreError(inner) => inner,
            QueryServiceError::NotFound { kind, id } => Error::NotFound { kind, id },
        }
    }
}

type QueryResult<T> = std::result::Result<T, QueryServiceError>;

// ============================================================================
// Load Queries
// ============================================================================

/// Get a load by id
pub fn get_load(backend: &Backend, id: &str) -> QueryResult<Load> {
    let loads = backend.stores().loads.fetch_records()?;
    Ok(find_record(&loads, id)?.clone())
}

/// Loads assigned to a driver, by pickup date
pub fn loads_for_driver(loads: &[Load], driver_name: &str) -> Vec<Load> {
    let mut assigned: Vec<Load> = loads
        .iter()
        .filter(|l| l.is_driven_by(driver_name))
        .cloned()
        .collect();
    sort(&mut assigned, &SortSpec::default());
    assigned
}

// ============================================================================
// Driver Queries
// ============================================================================

/// A driver with the loads assigned to them
#[derive(Debug, Clone, Serialize)]
pub struct DriverDetail {
    pub driver: Driver,
    pub loads: Vec<Load>,
}

/// Get a driver and their loads by driver id
pub fn get_driver_detail(backend: &Backend, id: &str) -> QueryResult<DriverDetail> {
    let drivers = backend.stores().drivers.fetch_records()?;
    let driver = find_record(&drivers, id)?.clone();
    let loads = backend.stores().loads.fetch_records()?;
    let loads = loads_for_driver(&loads, &driver.name);
    debug!(driver = %driver.name, loads = loads.len(), "driver detail");
    Ok(DriverDetail { driver, loads })
}

// ============================================================================
// Dashboard Queries
// ============================================================================

/// Headline numbers for `today`
pub fn get_dashboard_metrics(backend: &Backend, today: NaiveDate) -> QueryResult<DashboardMetrics> {
    let loads = backend.stores().loads.fetch_records()?;
    let drivers = backend.stores().drivers.fetch_records()?;
    Ok(DashboardMetrics::compute(&loads, &drivers, today))
}

// ============================================================================
// Calendar Queries
// ============================================================================

/// Calendar view window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarRange {
    /// Every event, grouped by day
    All,
    Day(NaiveDate),
    /// Sunday-started week containing the date
    Week(NaiveDate),
    Month { year: i32, month: u32 },
}

/// Events inside a calendar window, grouped by day
pub fn calendar_window(
    events: &[CalendarEvent],
    range: CalendarRange,
) -> BTreeMap<NaiveDate, Vec<&CalendarEvent>> {
    match range {
        CalendarRange::All => group_by_day(events),
        CalendarRange::Day(date) => {
            let hits = on_day(events, date);
            if hits.is_empty() {
                BTreeMap::new()
            } else {
                BTreeMap::from([(date, hits)])
            }
        }
        CalendarRange::Week(date) => {
            let mut days: BTreeMap<NaiveDate, Vec<&CalendarEvent>> = BTreeMap::new();
            for event in in_week(events, date) {
                days.entry(event.date).or_default().push(event);
            }
            days
        }
        CalendarRange::Month { year, month } => in_month(events, year, month),
    }
}
