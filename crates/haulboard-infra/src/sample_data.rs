//! Built-in sample snapshot
//!
//! The same records the dashboard ships as mock data, embedded as JSON in
//! the format `JsonDirStore` reads.

use haulboard_domain::model::{CalendarEvent, Driver, Load, LogisticsRow, Record};
use haulboard_domain::repository::ensure_unique_ids;
use haulboard_types::Result;
use serde::de::DeserializeOwned;

const LOADS_JSON: &str = include_str!("../data/loads.json");
const DRIVERS_JSON: &str = include_str!("../data/drivers.json");
const LOGISTICS_JSON: &str = include_str!("../data/logistics.json");

fn parse_snapshot<R: Record + DeserializeOwned>(json: &str) -> Result<Vec<R>> {
    let records: Vec<R> = serde_json::from_str(json)?;
    ensure_unique_ids(&records)?;
    Ok(records)
}

pub fn sample_loads() -> Result<Vec<Load>> {
    parse_snapshot(LOADS_JSON)
}

pub fn sample_drivers() -> Result<Vec<Driver>> {
    parse_snapshot(DRIVERS_JSON)
}

pub fn sample_logistics() -> Result<Vec<LogisticsRow>> {
    parse_snapshot(LOGISTICS_JSON)
}

/// Pickup and delivery events of the sample loads
pub fn sample_calendar_events() -> Result<Vec<CalendarEvent>> {
    Ok(events_from_loads(&sample_loads()?))
}

/// Expand loads into calendar events, pickup before delivery for each load
pub fn events_from_loads(loads: &[Load]) -> Vec<CalendarEvent> {
    loads.iter().flat_map(CalendarEvent::from_load).collect()
}
