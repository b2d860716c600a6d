//! Dispatcher revenue rows for the logistics dashboard

use chrono::NaiveDate;
use haulboard_types::RecordKind;
use serde::{Deserialize, Serialize};

use super::{DriverType, Record};

/// One dispatched load with mileage and revenue figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogisticsRow {
    pub id: String,
    pub dispatcher: String,
    pub empty_miles: f64,
    pub revenue_miles: f64,
    pub total_miles: f64,
    pub basic_freight_rate: f64,
    pub o_rate: f64,
    pub rate: f64,
    pub diff: f64,
    /// Per-row figures as entered; footer averages are recomputed from sums
    pub rev_per_mile: f64,
    pub b_rev_per_mile: f64,
    pub load_date: NaiveDate,
    pub driver_type: DriverType,
}

impl Record for LogisticsRow {
    type Status = DriverType;

    const KIND: RecordKind = RecordKind::Logistics;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> DriverType {
        self.driver_type
    }

    fn assignee(&self) -> Option<&str> {
        Some(&self.dispatcher)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.dispatcher.as_str()]
    }

    fn primary_date(&self) -> Option<NaiveDate> {
        Some(self.load_date)
    }

    fn numeric_value(&self) -> Option<f64> {
        Some(self.rate)
    }
}
