//! Calendar events (pickups and deliveries)

use chrono::NaiveDate;
use haulboard_types::RecordKind;
use serde::{Deserialize, Serialize};

use super::{Load, LoadStatus, Record};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Pickup,
    Delivery,
}

impl EventType {
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Pickup => "Pickup",
            EventType::Delivery => "Delivery",
        }
    }
}

/// A scheduled pickup or delivery of a load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub load_number: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub location: String,
    pub driver: String,
    pub status: LoadStatus,
    pub rate: f64,
}

impl CalendarEvent {
    /// Expand a load into its pickup and delivery events
    pub fn from_load(load: &Load) -> [CalendarEvent; 2] {
        let driver = load
            .driver_name
            .clone()
            .unwrap_or_else(|| "Unassigned".to_string());
        let pickup_location = format!("{}, {}", load.pickup_city, load.pickup_state);
        let delivery_location = format!("{}, {}", load.delivery_city, load.delivery_state);

        [
            CalendarEvent {
                id: format!("{}-pickup", load.id),
                load_number: load.broker_load_number.clone(),
                title: format!("Pickup at {}", pickup_location),
                date: load.pickup_date,
                event_type: EventType::Pickup,
                location: pickup_location,
                driver: driver.clone(),
                status: load.status,
                rate: load.rate,
            },
            CalendarEvent {
                id: format!("{}-delivery", load.id),
                load_number: load.broker_load_number.clone(),
                title: format!("Delivery to {}", delivery_location),
                date: load.delivery_date,
                event_type: EventType::Delivery,
                location: delivery_location,
                driver,
                status: load.status,
                rate: load.rate,
            },
        ]
    }
}

impl Record for CalendarEvent {
    type Status = LoadStatus;

    const KIND: RecordKind = RecordKind::CalendarEvents;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> LoadStatus {
        self.status
    }

    fn assignee(&self) -> Option<&str> {
        Some(&self.driver)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.load_number.as_str(),
            self.title.as_str(),
            self.location.as_str(),
            self.driver.as_str(),
        ]
    }

    fn primary_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn numeric_value(&self) -> Option<f64> {
        Some(self.rate)
    }
}
