//! Day, week and month grouping for the scheduling calendar

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::model::Record;

/// Sunday-to-Saturday week containing `date`
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = date - Duration::days(i64::from(date.weekday().num_days_from_sunday()));
    (start, start + Duration::days(6))
}

/// First and last day of a month, or `None` for an invalid month
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next - Duration::days(1)))
}

/// Records whose primary date is `date`, in input order
pub fn on_day<R: Record>(records: &[R], date: NaiveDate) -> Vec<&R> {
    records
        .iter()
        .filter(|r| r.primary_date() == Some(date))
        .collect()
}

/// Records within the week containing `date`, ordered by date
pub fn in_week<R: Record>(records: &[R], date: NaiveDate) -> Vec<&R> {
    let (start, end) = week_bounds(date);
    let mut hits: Vec<&R> = records
        .iter()
        .filter(|r| r.primary_date().is_some_and(|d| start <= d && d <= end))
        .collect();
    hits.sort_by_key(|r| r.primary_date());
    hits
}

/// Records grouped by primary date; undated records are skipped
pub fn group_by_day<R: Record>(records: &[R]) -> BTreeMap<NaiveDate, Vec<&R>> {
    let mut days: BTreeMap<NaiveDate, Vec<&R>> = BTreeMap::new();
    for record in records {
        if let Some(date) = record.primary_date() {
            days.entry(date).or_default().push(record);
        }
    }
    days
}

/// Records of one month grouped by day
pub fn in_month<R: Record>(records: &[R], year: i32, month: u32) -> BTreeMap<NaiveDate, Vec<&R>> {
    let Some((first, last)) = month_bounds(year, month) else {
        return BTreeMap::new();
    };
    let mut days = group_by_day(records);
    days.retain(|day, _| first <= *day && *day <= last);
    days
}
