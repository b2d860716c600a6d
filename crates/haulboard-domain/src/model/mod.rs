//! Domain model types

pub mod calendar_event;
pub mod driver;
pub mod load;
pub mod logistics;
pub mod status;

pub use calendar_event::{CalendarEvent, EventType};
pub use driver::{CurrentLoad, Driver};
pub use load::Load;
pub use logistics::LogisticsRow;
pub use status::{DriverStatus, DriverType, LoadStatus, StatusKind};

use chrono::NaiveDate;
use haulboard_types::RecordKind;

/// A flat record that can flow through the derived-view pipeline.
///
/// Each record kind decides which of its fields play the generic roles:
/// the closed status enum, the assignee used by the person filter, the
/// fields searched by free text, the primary date used for range filtering
/// and default sort, and the numeric value used by the value sort.
pub trait Record: Clone + Send + Sync + 'static {
    type Status: StatusKind;

    const KIND: RecordKind;

    /// Identifier, unique within one snapshot
    fn id(&self) -> &str;

    fn status(&self) -> Self::Status;

    /// Person the record is assigned to, if any
    fn assignee(&self) -> Option<&str>;

    /// Fields matched by the free-text query
    fn search_fields(&self) -> Vec<&str>;

    fn primary_date(&self) -> Option<NaiveDate>;

    fn numeric_value(&self) -> Option<f64> {
        None
    }
}
