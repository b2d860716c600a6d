//! Sort comparator for list views

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::{Record, StatusKind};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Primary date (pickup date, load date, ...)
    #[default]
    Date,
    /// Numeric value (rate)
    Value,
    /// Status rank in pipeline order
    Status,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn toggle_direction(&mut self) {
        self.direction = self.direction.toggled();
    }
}

/// Total order over records for one sort spec.
///
/// Missing dates and values sort before present ones when ascending.
pub fn compare<R: Record>(a: &R, b: &R, spec: &SortSpec) -> Ordering {
    let ordering = match spec.key {
        SortKey::Date => a.primary_date().cmp(&b.primary_date()),
        SortKey::Value => match (a.numeric_value(), b.numeric_value()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortKey::Status => a.status().rank().cmp(&b.status().rank()),
    };
    spec.direction.apply(ordering)
}

/// Stable in-place sort; equal keys keep their input order
pub fn sort<R: Record>(records: &mut [R], spec: &SortSpec) {
    records.sort_by(|a, b| compare(a, b, spec));
}
