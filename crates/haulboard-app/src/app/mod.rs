//! Application Layer
//!
//! Read-only use cases that sit between the CLI and the domain/infra layers:
//! detail lookups, the dashboard cards and calendar windows. List views go
//! through `crate::view` instead.

pub mod query_service;

pub use query_service::{
    calendar_window, get_dashboard_metrics, get_driver_detail, get_load, loads_for_driver,
    CalendarRange, DriverDetail, QueryServiceError,
};
