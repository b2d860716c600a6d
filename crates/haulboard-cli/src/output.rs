//! Output formatting module

use std::collections::BTreeMap;

use chrono::NaiveDate;
use haulboard_app::app::DriverDetail;
use haulboard_domain::model::{
    CalendarEvent, Driver, DriverType, Load, LogisticsRow, StatusKind,
};
use haulboard_domain::service::{
    round_currency, CalendarTotals, DashboardMetrics, DriverTotals, LoadTotals, LogisticsTotals,
    StatusCount,
};
use haulboard_types::{OutputFormat, Result};
use serde::Serialize;

/// Position of a page within the filtered set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageFooter {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Rows to print plus the totals of the whole filtered set
#[derive(Debug, Serialize)]
pub struct Listing<'a, R, T> {
    pub items: &'a [R],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<PageFooter>,
    pub totals: &'a T,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    println!("{}", content);
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

fn money(value: f64) -> String {
    format!("${:.2}", round_currency(value))
}

fn print_footer(footer: Option<PageFooter>, shown: usize) {
    match footer {
        Some(f) => println!(
            "Page {} of {} ({} items)",
            f.current_page, f.total_pages, f.total_items
        ),
        None => println!("{} items", shown),
    }
}

fn print_status_counts(counts: &[StatusCount]) {
    let parts: Vec<String> = counts
        .iter()
        .map(|c| format!("{} {}", c.status, c.count))
        .collect();
    println!("By status: {}", parts.join(", "));
}

// ============================================================================
// Loads
// ============================================================================

pub fn print_loads(format: OutputFormat, listing: &Listing<'_, Load, LoadTotals>) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(listing);
    }

    if listing.items.is_empty() {
        println!("No loads found.");
    } else {
        println!(
            "{:<6} {:<18} {:<10} {:<28} {:<10} {:<16} {:>10} {:<10}",
            "ID", "Broker", "Load #", "Lane", "Pickup", "Driver", "Rate", "Status"
        );
        println!("{}", "-".repeat(116));
        for load in listing.items {
            println!(
                "{:<6} {:<18} {:<10} {:<28} {:<10} {:<16} {:>10} {:<10}",
                truncate(&load.id, 6),
                truncate(&load.broker_name, 18),
                truncate(&load.broker_load_number, 10),
                truncate(&load.lane(), 28),
                load.pickup_date.format("%Y-%m-%d"),
                truncate(load.driver_name.as_deref().unwrap_or("-"), 16),
                money(load.rate),
                load.status.label()
            );
        }
    }

    println!();
    print_footer(listing.footer, listing.items.len());
    let totals = listing.totals;
    println!(
        "Total: {} loads, {} (avg {})",
        totals.count,
        money(totals.total_rate),
        money(totals.average_rate)
    );
    print_status_counts(&totals.by_status);
    Ok(())
}

pub fn print_load(format: OutputFormat, load: &Load) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(load);
    }

    println!("\nLoad {}", load.id);
    println!("==========");
    println!("Broker:      {} ({})", load.broker_name, load.broker_load_number);
    println!("Type:        {}", load.load_type);
    if let Some(ref temperature) = load.temperature {
        println!("Temperature: {}", temperature);
    }
    println!("Status:      {}", load.status.label());
    println!("Rate:        {}", money(load.rate));
    println!(
        "Driver:      {}",
        load.driver_name.as_deref().unwrap_or("(unassigned)")
    );
    println!(
        "Pickup:      {}, {} on {}",
        load.pickup_city, load.pickup_state, load.pickup_date
    );
    println!(
        "Delivery:    {}, {} on {}",
        load.delivery_city, load.delivery_state, load.delivery_date
    );
    Ok(())
}

// ============================================================================
// Drivers
// ============================================================================

fn availability(driver: &Driver) -> String {
    match (driver.available_date, driver.available_time) {
        (Some(date), Some(time)) => format!("{} {}", date, time.format("%H:%M")),
        (Some(date), None) => date.to_string(),
        _ => "-".to_string(),
    }
}

pub fn print_drivers(
    format: OutputFormat,
    listing: &Listing<'_, Driver, DriverTotals>,
) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(listing);
    }

    if listing.items.is_empty() {
        println!("No drivers found.");
    } else {
        println!(
            "{:<4} {:<18} {:<16} {:<8} {:<20} {:<16} {:<10}",
            "ID", "Name", "Phone", "Truck", "Location", "Available", "Status"
        );
        println!("{}", "-".repeat(98));
        for driver in listing.items {
            println!(
                "{:<4} {:<18} {:<16} {:<8} {:<20} {:<16} {:<10}",
                truncate(&driver.id, 4),
                truncate(&driver.name, 18),
                truncate(&driver.phone, 16),
                truncate(&driver.truck_number, 8),
                truncate(&driver.location(), 20),
                availability(driver),
                driver.status.as_str()
            );
        }
    }

    println!();
    print_footer(listing.footer, listing.items.len());
    println!("Total: {} drivers", listing.totals.count);
    print_status_counts(&listing.totals.by_status);
    Ok(())
}

pub fn print_driver_detail(format: OutputFormat, detail: &DriverDetail) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(detail);
    }

    let driver = &detail.driver;
    println!("\nDriver {}", driver.name);
    println!("==============");
    println!("ID:        {}", driver.id);
    println!("Status:    {}", driver.status);
    println!("Phone:     {}", driver.phone);
    println!("Email:     {}", driver.email);
    println!("License:   {} ({})", driver.license_number, driver.license_state);
    println!("Truck:     {}", driver.truck_number);
    println!("Location:  {}", driver.location());
    println!("Available: {}", availability(driver));
    if let Some(ref current) = driver.current_load {
        println!(
            "Current:   {} {} ({}, {} -> {}, {})",
            current.broker_name,
            current.broker_load_number,
            current.pickup_city,
            current.pickup_state,
            current.delivery_city,
            current.delivery_state
        );
    }

    println!("\nLoads ({})", detail.loads.len());
    println!("{}", "-".repeat(60));
    for load in &detail.loads {
        println!(
            "{:<6} {:<10} {:<28} {:>10} {:<10}",
            truncate(&load.id, 6),
            load.pickup_date.format("%Y-%m-%d"),
            truncate(&load.lane(), 28),
            money(load.rate),
            load.status.label()
        );
    }
    Ok(())
}

// ============================================================================
// Calendar
// ============================================================================

fn print_event_line(event: &CalendarEvent) {
    println!(
        "  {:<8} {:<10} {:<22} {:<16} {:>10} {:<10}",
        event.event_type.label(),
        truncate(&event.load_number, 10),
        truncate(&event.location, 22),
        truncate(&event.driver, 16),
        money(event.rate),
        event.status.label()
    );
}

fn print_calendar_totals(totals: &CalendarTotals) {
    println!(
        "Total: {} events ({} pickups, {} deliveries), {}",
        totals.count,
        totals.pickups,
        totals.deliveries,
        money(totals.total_rate)
    );
}

pub fn print_calendar_list(
    format: OutputFormat,
    listing: &Listing<'_, CalendarEvent, CalendarTotals>,
) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(listing);
    }

    if listing.items.is_empty() {
        println!("No events found.");
    } else {
        let mut current_day: Option<NaiveDate> = None;
        for event in listing.items {
            if current_day != Some(event.date) {
                println!("{}", event.date.format("%a %Y-%m-%d"));
                current_day = Some(event.date);
            }
            print_event_line(event);
        }
    }

    println!();
    print_footer(listing.footer, listing.items.len());
    print_calendar_totals(listing.totals);
    Ok(())
}

#[derive(Serialize)]
struct CalendarDays<'a> {
    days: &'a BTreeMap<NaiveDate, Vec<&'a CalendarEvent>>,
    totals: &'a CalendarTotals,
}

pub fn print_calendar_days(
    format: OutputFormat,
    days: &BTreeMap<NaiveDate, Vec<&CalendarEvent>>,
    totals: &CalendarTotals,
) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&CalendarDays { days, totals });
    }

    if days.is_empty() {
        println!("No events in this window.");
    }
    for (day, events) in days {
        println!("{} ({} events)", day.format("%a %Y-%m-%d"), events.len());
        for event in events {
            print_event_line(event);
        }
    }

    println!();
    print_calendar_totals(totals);
    Ok(())
}

// ============================================================================
// Logistics
// ============================================================================

pub fn print_logistics(
    format: OutputFormat,
    listing: &Listing<'_, LogisticsRow, LogisticsTotals>,
) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(listing);
    }

    if listing.items.is_empty() {
        println!("No logistics entries found.");
    } else {
        println!(
            "{:<16} {:<10} {:<8} {:>7} {:>8} {:>8} {:>10} {:>8} {:>10} {:>7} {:>6} {:>6}",
            "Dispatcher", "Date", "Type", "Empty", "Revenue", "Total", "BFR", "ORate", "Rate",
            "Diff", "RPM", "BRPM"
        );
        println!("{}", "-".repeat(116));
        for row in listing.items {
            println!(
                "{:<16} {:<10} {:<8} {:>7.0} {:>8.0} {:>8.0} {:>10.2} {:>8.2} {:>10.2} {:>7.2} {:>6.2} {:>6.2}",
                truncate(&row.dispatcher, 16),
                row.load_date.format("%Y-%m-%d"),
                row.driver_type.to_string(),
                row.empty_miles,
                row.revenue_miles,
                row.total_miles,
                round_currency(row.basic_freight_rate),
                round_currency(row.o_rate),
                round_currency(row.rate),
                round_currency(row.diff),
                round_currency(row.rev_per_mile),
                round_currency(row.b_rev_per_mile)
            );
        }
    }

    let t = listing.totals;
    println!("{}", "-".repeat(116));
    println!(
        "{:<16} {:<10} {:<8} {:>7.0} {:>8.0} {:>8.0} {:>10.2} {:>8.2} {:>10.2} {:>7.2} {:>6.2} {:>6.2}",
        "Total",
        "",
        "",
        t.empty_miles,
        t.revenue_miles,
        t.total_miles,
        round_currency(t.basic_freight_rate),
        round_currency(t.o_rate),
        round_currency(t.rate),
        round_currency(t.diff),
        round_currency(t.rev_per_mile),
        round_currency(t.b_rev_per_mile)
    );
    println!();
    print_footer(listing.footer, listing.items.len());
    Ok(())
}

#[derive(Serialize)]
struct FilterOptions<'a> {
    dispatchers: &'a [String],
    driver_types: Vec<&'static str>,
}

pub fn print_filter_options(
    format: OutputFormat,
    dispatchers: &[String],
    driver_types: &[DriverType],
) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&FilterOptions {
            dispatchers,
            driver_types: driver_types.iter().map(|t| t.as_str()).collect(),
        });
    }

    println!("Dispatchers:");
    for name in dispatchers {
        println!("  {}", name);
    }
    println!("Driver types:");
    for driver_type in driver_types {
        println!("  {} ({})", driver_type, driver_type.as_str());
    }
    Ok(())
}

// ============================================================================
// Dashboard
// ============================================================================

#[derive(Serialize)]
struct DashboardOutput<'a> {
    date: NaiveDate,
    #[serde(flatten)]
    metrics: &'a DashboardMetrics,
}

pub fn print_dashboard(
    format: OutputFormat,
    today: NaiveDate,
    metrics: &DashboardMetrics,
) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&DashboardOutput {
            date: today,
            metrics,
        });
    }

    println!("\nDashboard for {}", today.format("%a %Y-%m-%d"));
    println!("==========================");
    println!("Active loads:       {}", metrics.active_loads);
    println!("Available drivers:  {}", metrics.available_drivers);
    println!("Today's pickups:    {}", metrics.today_pickups);
    println!("Today's deliveries: {}", metrics.today_deliveries);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Sarah Williams", 20), "Sarah Williams");
        assert_eq!(truncate("Swift Logistics International", 12), "Swift Log...");
        assert_eq!(truncate("Dallas, TX → Houston, TX", 10), "Dallas,...");
    }

    #[test]
    fn test_money_rounds_to_cents() {
        assert_eq!(money(2500.0), "$2500.00");
        assert_eq!(money(20073.0 / 20050.0), "$1.00");
    }

    #[test]
    fn test_listing_json_omits_footer_for_all_rows() {
        let totals = DriverTotals::default();
        let items: Vec<Driver> = Vec::new();
        let listing = Listing {
            items: &items,
            footer: None,
            totals: &totals,
        };
        let json = serde_json::to_value(&listing).unwrap();
        assert!(json.get("footer").is_none());
        assert_eq!(json["totals"]["count"], 0);

        let paged = Listing {
            footer: Some(PageFooter {
                current_page: 1,
                total_pages: 1,
                total_items: 0,
            }),
            ..listing
        };
        let json = serde_json::to_value(&paged).unwrap();
        assert_eq!(json["footer"]["total_pages"], 1);
    }
}
