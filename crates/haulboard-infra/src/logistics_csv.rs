//! CSV loader for logistics rows
//!
//! Expected header (snake_case, any column order):
//! `id, dispatcher, empty_miles, revenue_miles, total_miles,
//! basic_freight_rate, o_rate, rate, diff, load_date, driver_type`
//! with optional `rev_per_mile` and `b_rev_per_mile`. When the per-mile
//! columns are missing they are computed from the row's totals.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use haulboard_domain::model::{DriverType, LogisticsRow};
use haulboard_domain::service::weighted_ratio;
use haulboard_types::Result;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    dispatcher: String,
    empty_miles: f64,
    revenue_miles: f64,
    total_miles: f64,
    basic_freight_rate: f64,
    o_rate: f64,
    rate: f64,
    #[serde(default)]
    diff: f64,
    #[serde(default)]
    rev_per_mile: Option<f64>,
    #[serde(default)]
    b_rev_per_mile: Option<f64>,
    load_date: NaiveDate,
    driver_type: DriverType,
}

impl From<CsvRow> for LogisticsRow {
    fn from(row: CsvRow) -> Self {
        let rev_per_mile = row
            .rev_per_mile
            .unwrap_or_else(|| weighted_ratio(row.rate, row.total_miles));
        let b_rev_per_mile = row
            .b_rev_per_mile
            .unwrap_or_else(|| weighted_ratio(row.basic_freight_rate, row.total_miles));
        LogisticsRow {
            id: row.id,
            dispatcher: row.dispatcher,
            empty_miles: row.empty_miles,
            revenue_miles: row.revenue_miles,
            total_miles: row.total_miles,
            basic_freight_rate: row.basic_freight_rate,
            o_rate: row.o_rate,
            rate: row.rate,
            diff: row.diff,
            rev_per_mile,
            b_rev_per_mile,
            load_date: row.load_date,
            driver_type: row.driver_type,
        }
    }
}

/// Parse logistics rows from any CSV reader
pub fn read_logistics_csv<R: Read>(reader: R) -> Result<Vec<LogisticsRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.deserialize::<CsvRow>() {
        rows.push(LogisticsRow::from(record?));
    }
    Ok(rows)
}

/// Load logistics rows from a CSV file
pub fn load_logistics_csv(path: &Path) -> Result<Vec<LogisticsRow>> {
    let file = std::fs::File::open(path)?;
    let rows = read_logistics_csv(std::io::BufReader::new(file))?;
    info!(count = rows.len(), path = %path.display(), "loaded logistics CSV");
    Ok(rows)
}
