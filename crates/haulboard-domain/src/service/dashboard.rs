//! Headline metrics for the dashboard cards

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{Driver, DriverStatus, Load};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardMetrics {
    /// Assigned or in transit
    pub active_loads: usize,
    pub available_drivers: usize,
    pub today_pickups: usize,
    pub today_deliveries: usize,
}

impl DashboardMetrics {
    pub fn compute(loads: &[Load], drivers: &[Driver], today: NaiveDate) -> Self {
        Self {
            active_loads: loads.iter().filter(|l| l.status.is_active()).count(),
            available_drivers: drivers
                .iter()
                .filter(|d| d.status == DriverStatus::Available)
                .count(),
            today_pickups: loads.iter().filter(|l| l.pickup_date == today).count(),
            today_deliveries: loads.iter().filter(|l| l.delivery_date == today).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::fixtures::{date, driver, sample_loads};

    #[test]
    fn test_metrics_for_sample_day() {
        let drivers = vec![
            driver("1", "John Doe", DriverStatus::Available, None),
            driver("2", "Mike Johnson", DriverStatus::OnLoad, None),
            driver("4", "David Brown", DriverStatus::Available, None),
        ];
        let metrics = DashboardMetrics::compute(&sample_loads(), &drivers, date(2025, 5, 15));
        assert_eq!(
            metrics,
            DashboardMetrics {
                active_loads: 2,
                available_drivers: 2,
                today_pickups: 1,
                today_deliveries: 1,
            }
        );
    }
}
