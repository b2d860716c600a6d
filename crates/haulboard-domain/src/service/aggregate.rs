//! Footer and summary totals for list views
//!
//! Totals are recomputed from scratch on every pipeline run. Sums keep full
//! precision; rounding happens only when values are displayed.

use serde::Serialize;

use crate::model::{
    CalendarEvent, Driver, EventType, Load, LogisticsRow, Record, StatusKind,
};

/// Reduces a filtered record set to summary totals
pub trait Aggregator<R: Record>: Send + Sync {
    type Totals: Clone + std::fmt::Debug + Default + Serialize + Send + Sync + 'static;

    fn aggregate(&self, records: &[R]) -> Self::Totals;
}

/// `numerator / denominator`, or 0 when the denominator is 0
pub fn weighted_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Round to cents for display
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Count of records with one status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: &'static str,
    pub count: usize,
}

/// Per-status counts in rank order, including zero counts
pub fn status_counts<R: Record>(records: &[R]) -> Vec<StatusCount> {
    <R::Status as StatusKind>::ALL
        .iter()
        .map(|status| StatusCount {
            status: status.as_str(),
            count: records.iter().filter(|r| r.status() == *status).count(),
        })
        .collect()
}

// ============================================================================
// Logistics
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LogisticsTotals {
    pub rows: usize,
    pub empty_miles: f64,
    pub revenue_miles: f64,
    pub total_miles: f64,
    pub basic_freight_rate: f64,
    pub o_rate: f64,
    pub rate: f64,
    pub diff: f64,
    /// Total rate over total miles
    pub rev_per_mile: f64,
    /// Total basic freight rate over total miles
    pub b_rev_per_mile: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogisticsAggregator;

impl Aggregator<LogisticsRow> for LogisticsAggregator {
    type Totals = LogisticsTotals;

    fn aggregate(&self, records: &[LogisticsRow]) -> LogisticsTotals {
        let mut totals = records
            .iter()
            .fold(LogisticsTotals::default(), |mut acc, row| {
                acc.rows += 1;
                acc.empty_miles += row.empty_miles;
                acc.revenue_miles += row.revenue_miles;
                acc.total_miles += row.total_miles;
                acc.basic_freight_rate += row.basic_freight_rate;
                acc.o_rate += row.o_rate;
                acc.rate += row.rate;
                acc.diff += row.diff;
                acc
            });
        totals.rev_per_mile = weighted_ratio(totals.rate, totals.total_miles);
        totals.b_rev_per_mile = weighted_ratio(totals.basic_freight_rate, totals.total_miles);
        totals
    }
}

// ============================================================================
// Loads
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadTotals {
    pub count: usize,
    pub total_rate: f64,
    pub average_rate: f64,
    pub by_status: Vec<StatusCount>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoadAggregator;

impl Aggregator<Load> for LoadAggregator {
    type Totals = LoadTotals;

    fn aggregate(&self, records: &[Load]) -> LoadTotals {
        let total_rate: f64 = records.iter().map(|l| l.rate).sum();
        LoadTotals {
            count: records.len(),
            total_rate,
            average_rate: weighted_ratio(total_rate, records.len() as f64),
            by_status: status_counts(records),
        }
    }
}

// ============================================================================
// Drivers
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DriverTotals {
    pub count: usize,
    pub by_status: Vec<StatusCount>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DriverAggregator;

impl Aggregator<Driver> for DriverAggregator {
    type Totals = DriverTotals;

    fn aggregate(&self, records: &[Driver]) -> DriverTotals {
        DriverTotals {
            count: records.len(),
            by_status: status_counts(records),
        }
    }
}

// ============================================================================
// Calendar
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CalendarTotals {
    pub count: usize,
    pub pickups: usize,
    pub deliveries: usize,
    pub total_rate: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarAggregator;

impl Aggregator<CalendarEvent> for CalendarAggregator {
    type Totals = CalendarTotals;

    fn aggregate(&self, records: &[CalendarEvent]) -> CalendarTotals {
        records
            .iter()
            .fold(CalendarTotals::default(), |mut acc, event| {
                acc.count += 1;
                match event.event_type {
                    EventType::Pickup => acc.pickups += 1,
                    EventType::Delivery => acc.deliveries += 1,
                }
                acc.total_rate += event.rate;
                acc
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DriverStatus, DriverType, LoadStatus};
    use crate::service::fixtures::{date, driver, logistics_row, sample_loads, sample_logistics};

    #[test]
    fn test_logistics_totals_sum_every_column() {
        let totals = LogisticsAggregator.aggregate(&sample_logistics());
        assert_eq!(totals.rows, 12);
        assert!((totals.empty_miles - 2800.0).abs() < 1e-9);
        assert!((totals.revenue_miles - 17250.0).abs() < 1e-9);
        assert!((totals.total_miles - 20050.0).abs() < 1e-9);
        assert!((totals.rate - 20073.0).abs() < 1e-9);
        assert!((totals.diff - 75.0).abs() < 1e-9);
        assert!((totals.rev_per_mile - 20073.0 / 20050.0).abs() < 1e-12);
    }

    #[test]
    fn test_rev_per_mile_is_weighted_not_naive_mean() {
        // 100 / 100 = 1.0 and 2000 / 1000 = 2.0
        let rows = vec![
            logistics_row("a", "X", (0.0, 100.0, 100.0), 100.0, 0.0, 100.0, 0.0, date(2025, 5, 1), DriverType::Company),
            logistics_row("b", "Y", (0.0, 1000.0, 1000.0), 2000.0, 0.0, 2000.0, 0.0, date(2025, 5, 2), DriverType::Owner),
        ];
        let naive_mean = (rows[0].rev_per_mile + rows[1].rev_per_mile) / 2.0;
        assert!((naive_mean - 1.5).abs() < 1e-12);

        let totals = LogisticsAggregator.aggregate(&rows);
        assert!((totals.rev_per_mile - 2100.0 / 1100.0).abs() < 1e-12);
        assert!((totals.rev_per_mile - naive_mean).abs() > 0.1);
    }

    #[test]
    fn test_zero_miles_yield_zero_ratio() {
        let totals = LogisticsAggregator.aggregate(&[]);
        assert_eq!(totals.rev_per_mile, 0.0);
        assert_eq!(totals.b_rev_per_mile, 0.0);
        assert!(!totals.rev_per_mile.is_nan());
    }

    #[test]
    fn test_load_totals() {
        let totals = LoadAggregator.aggregate(&sample_loads());
        assert_eq!(totals.count, 5);
        assert!((totals.total_rate - 14400.0).abs() < 1e-9);
        assert!((totals.average_rate - 2880.0).abs() < 1e-9);
        let delivered = totals
            .by_status
            .iter()
            .find(|c| c.status == LoadStatus::Delivered.as_str())
            .unwrap();
        assert_eq!(delivered.count, 1);
        assert_eq!(totals.by_status.len(), LoadStatus::ALL.len());
    }

    #[test]
    fn test_driver_totals_include_zero_counts() {
        let drivers = vec![
            driver("1", "Ann", DriverStatus::Available, None),
            driver("2", "Bob", DriverStatus::Available, None),
        ];
        let totals = DriverAggregator.aggregate(&drivers);
        assert_eq!(totals.count, 2);
        assert_eq!(
            totals.by_status,
            vec![
                StatusCount { status: "available", count: 2 },
                StatusCount { status: "on-load", count: 0 },
                StatusCount { status: "off-duty", count: 0 },
            ]
        );
    }

    #[test]
    fn test_calendar_totals_split_event_types() {
        let events: Vec<CalendarEvent> = sample_loads()
            .iter()
            .flat_map(CalendarEvent::from_load)
            .collect();
        let totals = CalendarAggregator.aggregate(&events);
        assert_eq!(totals.count, 10);
        assert_eq!(totals.pickups, 5);
        assert_eq!(totals.deliveries, 5);
        assert!((totals.total_rate - 28800.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_currency() {
        assert_eq!(round_currency(1.005_1), 1.01);
        assert_eq!(round_currency(20073.0 / 20050.0), 1.0);
    }
}
