//! Report export

pub mod excel;

pub use excel::export_logistics_report;
