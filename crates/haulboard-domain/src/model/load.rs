//! Load (shipment) records

use chrono::NaiveDate;
use haulboard_types::RecordKind;
use serde::{Deserialize, Serialize};

use super::{LoadStatus, Record};

/// A brokered load from pickup to delivery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    pub id: String,
    pub broker_name: String,
    pub broker_load_number: String,
    /// Trailer type (Dry Van, Reefer, Flatbed)
    pub load_type: String,
    /// Reefer set point, e.g. "34°F"
    #[serde(default)]
    pub temperature: Option<String>,
    /// Linehaul rate in dollars
    pub rate: f64,
    pub status: LoadStatus,
    #[serde(default)]
    pub driver_name: Option<String>,
    pub pickup_city: String,
    pub pickup_state: String,
    pub pickup_date: NaiveDate,
    pub delivery_city: String,
    pub delivery_state: String,
    pub delivery_date: NaiveDate,
}

impl Load {
    /// "Dallas, TX → Houston, TX"
    pub fn lane(&self) -> String {
        format!(
            "{}, {} → {}, {}",
            self.pickup_city, self.pickup_state, self.delivery_city, self.delivery_state
        )
    }

    /// Whether the load is assigned to the named driver
    pub fn is_driven_by(&self, driver_name: &str) -> bool {
        self.driver_name.as_deref() == Some(driver_name)
    }
}

impl Record for Load {
    type Status = LoadStatus;

    const KIND: RecordKind = RecordKind::Loads;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> LoadStatus {
        self.status
    }

    fn assignee(&self) -> Option<&str> {
        self.driver_name.as_deref()
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.broker_name.as_str(),
            self.broker_load_number.as_str(),
            self.pickup_city.as_str(),
            self.delivery_city.as_str(),
        ];
        if let Some(driver) = self.driver_name.as_deref() {
            fields.push(driver);
        }
        fields
    }

    fn primary_date(&self) -> Option<NaiveDate> {
        Some(self.pickup_date)
    }

    fn numeric_value(&self) -> Option<f64> {
        Some(self.rate)
    }
}
