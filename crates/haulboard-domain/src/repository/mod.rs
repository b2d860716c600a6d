//! Record store trait definitions

use std::collections::HashSet;

use haulboard_types::{Error, Result};

use crate::model::Record;

/// Source of immutable record snapshots for one record kind
pub trait RecordStore<R: Record>: Send + Sync {
    /// Fetch the current snapshot
    fn fetch_records(&self) -> Result<Vec<R>>;
}

/// Reject snapshots that reuse an identifier
pub fn ensure_unique_ids<R: Record>(records: &[R]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id()) {
            return Err(Error::Snapshot(format!(
                "duplicate {} id '{}'",
                R::KIND,
                record.id()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DriverType, LogisticsRow};
    use chrono::NaiveDate;

    fn row(id: &str) -> LogisticsRow {
        LogisticsRow {
            id: id.to_string(),
            dispatcher: "John Smith".to_string(),
            empty_miles: 0.0,
            revenue_miles: 0.0,
            total_miles: 0.0,
            basic_freight_rate: 0.0,
            o_rate: 0.0,
            rate: 0.0,
            diff: 0.0,
            rev_per_mile: 0.0,
            b_rev_per_mile: 0.0,
            load_date: NaiveDate::from_ymd_opt(2025, 5, 14).unwrap(),
            driver_type: DriverType::Company,
        }
    }

    #[test]
    fn test_unique_ids_pass() {
        assert!(ensure_unique_ids(&[row("1"), row("2")]).is_ok());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = ensure_unique_ids(&[row("1"), row("1")]).unwrap_err();
        assert!(err.to_string().contains("duplicate logistics id '1'"));
    }
}
