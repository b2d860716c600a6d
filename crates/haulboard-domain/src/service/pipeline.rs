//! The fixed derived-view pipeline: filter → sort → aggregate → paginate

use std::num::NonZeroUsize;

use haulboard_types::{Error, Result};

use super::aggregate::Aggregator;
use super::filter::{filter, FilterCriteria};
use super::paginate::{paginate, total_pages, Page};
use super::sort::{sort, SortSpec};
use crate::model::Record;

/// Filtered and sorted records plus their totals
#[derive(Debug, Clone)]
pub struct DerivedView<R, T> {
    pub records: Vec<R>,
    pub totals: T,
}

impl<R, T> DerivedView<R, T> {
    pub fn page(&self, page_size: NonZeroUsize, current_page: usize) -> Page<'_, R> {
        paginate(&self.records, page_size, current_page)
    }

    pub fn total_pages(&self, page_size: NonZeroUsize) -> usize {
        total_pages(self.records.len(), page_size)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Run filter, sort and aggregate over one snapshot
pub fn derive_view<R, A>(
    snapshot: &[R],
    criteria: &FilterCriteria<R::Status>,
    sort_spec: &SortSpec,
    aggregator: &A,
) -> DerivedView<R, A::Totals>
where
    R: Record,
    A: Aggregator<R>,
{
    let mut records = filter(snapshot, criteria);
    sort(&mut records, sort_spec);
    let totals = aggregator.aggregate(&records);
    DerivedView { records, totals }
}

/// Look up a record by id, for detail views
pub fn find_record<'a, R: Record>(records: &'a [R], id: &str) -> Result<&'a R> {
    records
        .iter()
        .find(|r| r.id() == id)
        .ok_or_else(|| Error::not_found(R::KIND, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LoadStatus;
    use crate::service::aggregate::LoadAggregator;
    use crate::service::fixtures::{date, load, sample_loads};
    use crate::service::paginate::DEFAULT_PAGE_SIZE;
    use crate::service::sort::{SortDirection, SortKey};

    #[test]
    fn test_status_filter_scenario() {
        let records = vec![
            load(
                "a",
                "ABC",
                "A1",
                2400.0,
                LoadStatus::Booked,
                None,
                ("Dallas", "TX", date(2025, 5, 14)),
                ("Houston", "TX", date(2025, 5, 15)),
            ),
            load(
                "b",
                "DEF",
                "B1",
                1850.0,
                LoadStatus::Delivered,
                Some("John Doe"),
                ("Austin", "TX", date(2025, 5, 19)),
                ("Waco", "TX", date(2025, 5, 19)),
            ),
        ];
        let criteria = FilterCriteria::default().with_status(LoadStatus::Delivered);
        let view = derive_view(&records, &criteria, &SortSpec::default(), &LoadAggregator);
        assert_eq!(view.records, vec![records[1].clone()]);
        assert!((view.totals.total_rate - 1850.0).abs() < 1e-9);
    }

    #[test]
    fn test_pipeline_sorts_filtered_records() {
        let loads = sample_loads();
        let spec = SortSpec::new(SortKey::Value, SortDirection::Ascending);
        let view = derive_view(&loads, &FilterCriteria::default(), &spec, &LoadAggregator);
        let rates: Vec<f64> = view.records.iter().map(|l| l.rate).collect();
        assert_eq!(rates, vec![2100.0, 2500.0, 2800.0, 3200.0, 3800.0]);
        assert_eq!(view.total_pages(DEFAULT_PAGE_SIZE), 1);
        assert_eq!(view.page(DEFAULT_PAGE_SIZE, 1).items.len(), 5);
    }

    #[test]
    fn test_find_record() {
        let loads = sample_loads();
        assert_eq!(find_record(&loads, "3").unwrap().broker_load_number, "FF9012");
        let err = find_record(&loads, "99").unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }
}
