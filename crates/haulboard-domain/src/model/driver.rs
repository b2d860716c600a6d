//! Driver records

use chrono::{NaiveDate, NaiveTime};
use haulboard_types::RecordKind;
use serde::{Deserialize, Serialize};

use super::{DriverStatus, Record};

/// Summary of the load a driver is currently hauling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentLoad {
    pub id: String,
    pub broker_name: String,
    pub broker_load_number: String,
    pub pickup_city: String,
    pub pickup_state: String,
    pub delivery_city: String,
    pub delivery_state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub license_number: String,
    pub license_state: String,
    pub truck_number: String,
    pub status: DriverStatus,
    pub current_location_city: String,
    pub current_location_state: String,
    /// Next date the driver can take a load
    #[serde(default)]
    pub available_date: Option<NaiveDate>,
    #[serde(default)]
    pub available_time: Option<NaiveTime>,
    #[serde(default)]
    pub current_load: Option<CurrentLoad>,
}

impl Driver {
    pub fn location(&self) -> String {
        format!(
            "{}, {}",
            self.current_location_city, self.current_location_state
        )
    }
}

impl Record for Driver {
    type Status = DriverStatus;

    const KIND: RecordKind = RecordKind::Drivers;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> DriverStatus {
        self.status
    }

    // Drivers are the assignees themselves, so a named assignee matches none.
    fn assignee(&self) -> Option<&str> {
        None
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.truck_number.as_str(),
            self.current_location_city.as_str(),
            self.current_location_state.as_str(),
        ]
    }

    fn primary_date(&self) -> Option<NaiveDate> {
        self.available_date
    }
}
