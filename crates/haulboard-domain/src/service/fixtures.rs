//! Shared test records (the dashboard's sample data)

use chrono::NaiveDate;

use crate::model::{Driver, DriverStatus, DriverType, Load, LoadStatus, LogisticsRow};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[allow(clippy::too_many_arguments)]
pub fn load(
    id: &str,
    broker: &str,
    number: &str,
    rate: f64,
    status: LoadStatus,
    driver: Option<&str>,
    pickup: (&str, &str, NaiveDate),
    delivery: (&str, &str, NaiveDate),
) -> Load {
    Load {
        id: id.to_string(),
        broker_name: broker.to_string(),
        broker_load_number: number.to_string(),
        load_type: "Dry Van".to_string(),
        temperature: None,
        rate,
        status,
        driver_name: driver.map(str::to_string),
        pickup_city: pickup.0.to_string(),
        pickup_state: pickup.1.to_string(),
        pickup_date: pickup.2,
        delivery_city: delivery.0.to_string(),
        delivery_state: delivery.1.to_string(),
        delivery_date: delivery.2,
    }
}

pub fn sample_loads() -> Vec<Load> {
    vec![
        load(
            "1",
            "ABC Logistics",
            "BL1234",
            2500.0,
            LoadStatus::Booked,
            None,
            ("Dallas", "TX", date(2025, 5, 14)),
            ("Houston", "TX", date(2025, 5, 15)),
        ),
        load(
            "2",
            "XYZ Transport",
            "XYZ5678",
            3200.0,
            LoadStatus::Assigned,
            Some("John Doe"),
            ("Chicago", "IL", date(2025, 5, 15)),
            ("Detroit", "MI", date(2025, 5, 16)),
        ),
        load(
            "3",
            "FastFreight",
            "FF9012",
            2800.0,
            LoadStatus::InTransit,
            Some("Mike Johnson"),
            ("Atlanta", "GA", date(2025, 5, 13)),
            ("Miami", "FL", date(2025, 5, 17)),
        ),
        load(
            "4",
            "GHI Shipping",
            "GH3456",
            3800.0,
            LoadStatus::Delivered,
            Some("Sarah Williams"),
            ("Los Angeles", "CA", date(2025, 5, 10)),
            ("Phoenix", "AZ", date(2025, 5, 12)),
        ),
        load(
            "5",
            "JKL Freight",
            "JK7890",
            2100.0,
            LoadStatus::Cancelled,
            None,
            ("Seattle", "WA", date(2025, 5, 18)),
            ("Portland", "OR", date(2025, 5, 19)),
        ),
    ]
}

pub fn driver(id: &str, name: &str, status: DriverStatus, available: Option<NaiveDate>) -> Driver {
    Driver {
        id: id.to_string(),
        name: name.to_string(),
        phone: "555-000-0000".to_string(),
        email: format!("{}@example.com", id),
        license_number: format!("DL{}", id),
        license_state: "TX".to_string(),
        truck_number: format!("T-{}0{}", id, id),
        status,
        current_location_city: "Dallas".to_string(),
        current_location_state: "TX".to_string(),
        available_date: available,
        available_time: None,
        current_load: None,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn logistics_row(
    id: &str,
    dispatcher: &str,
    miles: (f64, f64, f64),
    basic_freight_rate: f64,
    o_rate: f64,
    rate: f64,
    diff: f64,
    load_date: NaiveDate,
    driver_type: DriverType,
) -> LogisticsRow {
    LogisticsRow {
        id: id.to_string(),
        dispatcher: dispatcher.to_string(),
        empty_miles: miles.0,
        revenue_miles: miles.1,
        total_miles: miles.2,
        basic_freight_rate,
        o_rate,
        rate,
        diff,
        rev_per_mile: if miles.2 > 0.0 { rate / miles.2 } else { 0.0 },
        b_rev_per_mile: if miles.2 > 0.0 { basic_freight_rate / miles.2 } else { 0.0 },
        load_date,
        driver_type,
    }
}

pub fn sample_logistics() -> Vec<LogisticsRow> {
    use DriverType::{Company, Owner};
    vec![
        logistics_row("1", "John Smith", (250.0, 1250.0, 1500.0), 1200.0, 120.0, 1320.0, 0.0, date(2025, 5, 14), Company),
        logistics_row("2", "Maria Garcia", (150.0, 950.0, 1100.0), 980.0, 90.0, 1070.0, 20.0, date(2025, 5, 15), Owner),
        logistics_row("3", "Robert Johnson", (180.0, 1450.0, 1630.0), 1550.0, 150.0, 1700.0, -30.0, date(2025, 5, 16), Company),
        logistics_row("4", "Sarah Williams", (200.0, 1900.0, 2100.0), 2100.0, 210.0, 2310.0, 50.0, date(2025, 5, 18), Owner),
        logistics_row("5", "Michael Brown", (300.0, 1600.0, 1900.0), 1750.0, 175.0, 1925.0, -40.0, date(2025, 5, 19), Company),
        logistics_row("6", "John Smith", (220.0, 1300.0, 1520.0), 1350.0, 135.0, 1485.0, 10.0, date(2025, 5, 20), Owner),
        logistics_row("7", "Maria Garcia", (190.0, 1400.0, 1590.0), 1480.0, 148.0, 1628.0, 0.0, date(2025, 5, 21), Company),
        logistics_row("8", "Sarah Williams", (280.0, 1550.0, 1830.0), 1650.0, 165.0, 1815.0, 25.0, date(2025, 5, 22), Owner),
        logistics_row("9", "Robert Johnson", (230.0, 1350.0, 1580.0), 1420.0, 142.0, 1562.0, -15.0, date(2025, 5, 23), Company),
        logistics_row("10", "Michael Brown", (210.0, 1250.0, 1460.0), 1300.0, 130.0, 1430.0, 35.0, date(2025, 5, 24), Owner),
        logistics_row("11", "John Smith", (320.0, 1750.0, 2070.0), 1900.0, 190.0, 2090.0, -20.0, date(2025, 5, 25), Company),
        logistics_row("12", "Maria Garcia", (270.0, 1500.0, 1770.0), 1580.0, 158.0, 1738.0, 40.0, date(2025, 5, 26), Owner),
    ]
}
