//! Excel export of the logistics view

use std::path::Path;

use haulboard_domain::model::LogisticsRow;
use haulboard_domain::service::LogisticsTotals;
use haulboard_types::{Error, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::info;

const HEADERS: [&str; 12] = [
    "Dispatcher",
    "Load Date",
    "Driver Type",
    "Empty Miles",
    "Revenue Miles",
    "Total Miles",
    "Basic Freight Rate",
    "ORate",
    "Rate",
    "Diff",
    "Rev Per Mile",
    "BRevPerMile",
];

fn excel_err(e: XlsxError) -> Error {
    Error::Excel(e.to_string())
}

/// Write the filtered logistics rows and their totals to an .xlsx file
pub fn export_logistics_report(
    rows: &[LogisticsRow],
    totals: &LogisticsTotals,
    output_path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();

    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, totals)?;

    let rows_sheet = workbook.add_worksheet();
    write_rows_sheet(rows_sheet, rows, totals)?;

    workbook.save(output_path).map_err(excel_err)?;
    info!(rows = rows.len(), path = %output_path.display(), "logistics report written");

    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, totals: &LogisticsTotals) -> Result<()> {
    sheet.set_name("Summary").map_err(excel_err)?;

    let header_format = Format::new().set_bold();
    let money = Format::new().set_num_format("$#,##0.00");

    sheet
        .write_string_with_format(0, 0, "Logistics Report", &header_format)
        .map_err(excel_err)?;

    let counts = [
        ("Entries:", totals.rows as f64),
        ("Total Miles:", totals.total_miles),
        ("Revenue Miles:", totals.revenue_miles),
    ];
    let amounts = [
        ("Rate:", totals.rate),
        ("Rev Per Mile:", totals.rev_per_mile),
        ("BRevPerMile:", totals.b_rev_per_mile),
    ];

    let mut row = 2;
    for (label, value) in counts {
        sheet.write_string(row, 0, label).map_err(excel_err)?;
        sheet.write_number(row, 1, value).map_err(excel_err)?;
        row += 1;
    }
    for (label, value) in amounts {
        sheet.write_string(row, 0, label).map_err(excel_err)?;
        sheet
            .write_number_with_format(row, 1, value, &money)
            .map_err(excel_err)?;
        row += 1;
    }

    Ok(())
}

fn write_rows_sheet(
    sheet: &mut Worksheet,
    rows: &[LogisticsRow],
    totals: &LogisticsTotals,
) -> Result<()> {
    sheet.set_name("Entries").map_err(excel_err)?;

    let header_format = Format::new().set_bold();
    let money = Format::new().set_num_format("$#,##0.00");
    let bold_money = Format::new().set_bold().set_num_format("$#,##0.00");

    for (col, header) in HEADERS.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(excel_err)?;
    }

    for (index, entry) in rows.iter().enumerate() {
        let row = (index + 1) as u32;
        sheet.write_string(row, 0, &entry.dispatcher).map_err(excel_err)?;
        sheet
            .write_string(row, 1, entry.load_date.format("%Y-%m-%d").to_string())
            .map_err(excel_err)?;
        sheet
            .write_string(row, 2, entry.driver_type.to_string())
            .map_err(excel_err)?;

        let miles = [entry.empty_miles, entry.revenue_miles, entry.total_miles];
        for (offset, value) in miles.into_iter().enumerate() {
            sheet
                .write_number(row, 3 + offset as u16, value)
                .map_err(excel_err)?;
        }

        let amounts = [
            entry.basic_freight_rate,
            entry.o_rate,
            entry.rate,
            entry.diff,
            entry.rev_per_mile,
            entry.b_rev_per_mile,
        ];
        for (offset, value) in amounts.into_iter().enumerate() {
            sheet
                .write_number_with_format(row, 6 + offset as u16, value, &money)
                .map_err(excel_err)?;
        }
    }

    // footer: column sums, then the weighted per-mile figures
    let footer = (rows.len() + 1) as u32;
    sheet
        .write_string_with_format(footer, 0, "Total", &header_format)
        .map_err(excel_err)?;
    let footer_miles = [totals.empty_miles, totals.revenue_miles, totals.total_miles];
    for (offset, value) in footer_miles.into_iter().enumerate() {
        sheet
            .write_number_with_format(footer, 3 + offset as u16, value, &header_format)
            .map_err(excel_err)?;
    }
    let footer_amounts = [
        totals.basic_freight_rate,
        totals.o_rate,
        totals.rate,
        totals.diff,
        totals.rev_per_mile,
        totals.b_rev_per_mile,
    ];
    for (offset, value) in footer_amounts.into_iter().enumerate() {
        sheet
            .write_number_with_format(footer, 6 + offset as u16, value, &bold_money)
            .map_err(excel_err)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use haulboard_domain::service::{Aggregator, LogisticsAggregator};
    use haulboard_infra::sample_data::sample_logistics;
    use tempfile::TempDir;

    #[test]
    fn test_report_is_written() {
        let rows = sample_logistics().unwrap();
        let totals = LogisticsAggregator.aggregate(&rows);
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("logistics.xlsx");

        export_logistics_report(&rows, &totals, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // xlsx files are zip archives
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_empty_report_is_written() {
        let totals = LogisticsAggregator.aggregate(&[]);
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.xlsx");
        export_logistics_report(&[], &totals, &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_path_is_excel_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("report.xlsx");
        let err = export_logistics_report(&[], &LogisticsTotals::default(), &path).unwrap_err();
        assert!(matches!(err, Error::Excel(_)));
    }
}
