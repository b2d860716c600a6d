//! Domain services: the derived-view pipeline and calendar/dashboard helpers

pub mod aggregate;
pub mod calendar;
pub mod dashboard;
pub mod filter;
pub mod paginate;
pub mod pipeline;
pub mod sort;

#[cfg(test)]
pub(crate) mod fixtures;

pub use aggregate::{
    round_currency, weighted_ratio, Aggregator, CalendarAggregator, CalendarTotals,
    DriverAggregator, DriverTotals, LoadAggregator, LoadTotals, LogisticsAggregator,
    LogisticsTotals, StatusCount,
};
pub use calendar::{group_by_day, in_month, in_week, month_bounds, on_day, week_bounds};
pub use dashboard::DashboardMetrics;
pub use filter::{
    assignee_options, filter, matches, status_options, DatePolicy, DateRange, FilterCriteria,
    FilterInput, Selection,
};
pub use paginate::{clamp_page, paginate, total_pages, Page, PageState, DEFAULT_PAGE_SIZE};
pub use pipeline::{derive_view, find_record, DerivedView};
pub use sort::{compare, sort, SortDirection, SortKey, SortSpec};
