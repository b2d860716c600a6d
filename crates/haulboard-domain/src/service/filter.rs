//! Filter predicates for list views
//!
//! All rules are combined with logical AND. The default criteria match
//! every record.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use haulboard_types::ValidationError;
use serde::{Deserialize, Serialize};

use crate::model::{Record, StatusKind};

/// "all" or one specific value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

impl<T> Selection<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Selection::All => None,
            Selection::Only(value) => Some(value),
        }
    }
}

/// Inclusive calendar-date range; `start <= end` always holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvertedDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Active filter criteria for one view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "S: Serialize",
    deserialize = "S: Deserialize<'de>"
))]
pub struct FilterCriteria<S> {
    pub status: Selection<S>,
    pub assignee: Selection<String>,
    /// Free-text query; empty means no text filter
    pub query: String,
    /// Only set when both ends were given
    pub date_range: Option<DateRange>,
}

impl<S> Default for FilterCriteria<S> {
    fn default() -> Self {
        Self {
            status: Selection::All,
            assignee: Selection::All,
            query: String::new(),
            date_range: None,
        }
    }
}

impl<S> FilterCriteria<S> {
    pub fn with_status(mut self, status: S) -> Self {
        self.status = Selection::Only(status);
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Selection::Only(assignee.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Number of active dropdown/range filters (the search box is not counted)
    pub fn active_count(&self) -> usize {
        usize::from(!self.status.is_all())
            + usize::from(!self.assignee.is_all())
            + usize::from(self.date_range.is_some())
    }

    pub fn is_default(&self) -> bool {
        self.active_count() == 0 && self.query.is_empty()
    }
}

/// How unparsable date input is treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePolicy {
    /// Ignore the bad bound, which disables the range
    #[default]
    Lenient,
    /// Reject the input with a validation error
    Strict,
}

/// Raw filter input as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterInput {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub date_from: Option<String>,
    #[serde(default)]
    pub date_to: Option<String>,
}

impl FilterInput {
    /// Validate and convert into criteria
    pub fn into_criteria<S: StatusKind>(
        self,
        policy: DatePolicy,
    ) -> Result<FilterCriteria<S>, ValidationError> {
        let status = match non_sentinel(self.status.as_deref()) {
            None => Selection::All,
            Some(raw) => Selection::Only(
                S::parse(raw).ok_or_else(|| ValidationError::UnknownStatus(raw.to_string()))?,
            ),
        };

        let assignee = match non_sentinel(self.assignee.as_deref()) {
            None => Selection::All,
            Some(name) => Selection::Only(name.to_string()),
        };

        let start = parse_bound("start", self.date_from.as_deref(), policy)?;
        let end = parse_bound("end", self.date_to.as_deref(), policy)?;
        let date_range = match (start, end) {
            (Some(start), Some(end)) => Some(DateRange::new(start, end)?),
            _ => None,
        };

        Ok(FilterCriteria {
            status,
            assignee,
            query: self.query.trim().to_string(),
            date_range,
        })
    }
}

/// Empty strings and "all" both mean no selection
fn non_sentinel(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

fn parse_bound(
    field: &'static str,
    raw: Option<&str>,
    policy: DatePolicy,
) -> Result<Option<NaiveDate>, ValidationError> {
    let raw = match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => raw,
        None => return Ok(None),
    };
    match (parse_date_input(raw), policy) {
        (Some(date), _) => Ok(Some(date)),
        (None, DatePolicy::Lenient) => Ok(None),
        (None, DatePolicy::Strict) => Err(ValidationError::InvalidDate {
            field,
            input: raw.to_string(),
        }),
    }
}

/// Parse a date or timestamp and strip the time of day
pub fn parse_date_input(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Whether a record satisfies every active predicate
pub fn matches<R: Record>(record: &R, criteria: &FilterCriteria<R::Status>) -> bool {
    matches_with_needle(record, criteria, &criteria.query.to_lowercase())
}

fn matches_with_needle<R: Record>(
    record: &R,
    criteria: &FilterCriteria<R::Status>,
    needle: &str,
) -> bool {
    if !criteria.status.admits(&record.status()) {
        return false;
    }

    if let Selection::Only(ref name) = criteria.assignee {
        if record.assignee() != Some(name.as_str()) {
            return false;
        }
    }

    if !needle.is_empty()
        && !record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    {
        return false;
    }

    match criteria.date_range {
        Some(range) => record
            .primary_date()
            .map(|date| range.contains(date))
            .unwrap_or(false),
        None => true,
    }
}

/// Keep matching records in input order
pub fn filter<R: Record>(records: &[R], criteria: &FilterCriteria<R::Status>) -> Vec<R> {
    let needle = criteria.query.to_lowercase();
    records
        .iter()
        .filter(|r| matches_with_needle(*r, criteria, &needle))
        .cloned()
        .collect()
}

/// Distinct assignees in first-seen order, for filter dropdowns
pub fn assignee_options<R: Record>(records: &[R]) -> Vec<String> {
    let mut options: Vec<String> = Vec::new();
    for name in records.iter().filter_map(|r| r.assignee()) {
        if !options.iter().any(|o| o == name) {
            options.push(name.to_string());
        }
    }
    options
}

/// Distinct statuses present in the snapshot, in first-seen order
pub fn status_options<R: Record>(records: &[R]) -> Vec<R::Status> {
    let mut options: Vec<R::Status> = Vec::new();
    for status in records.iter().map(|r| r.status()) {
        if !options.contains(&status) {
            options.push(status);
        }
    }
    options
}
