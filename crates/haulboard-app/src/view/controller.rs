//! View state and reducer
//!
//! `ViewController::dispatch` is the only way view state changes. It performs
//! no I/O: fetching and notification delivery are returned as `Effect`s.
//!
//! Fetch results carry the `FetchTicket` issued by the refresh that started
//! them. Only the most recent ticket is accepted; anything older, or anything
//! arriving after `Teardown`, is dropped.

use haulboard_domain::model::{Record, StatusKind};
use haulboard_domain::repository::ensure_unique_ids;
use haulboard_domain::service::{
    assignee_options, clamp_page, derive_view, find_record, status_options, Aggregator,
    DatePolicy, DerivedView, FilterCriteria, FilterInput, Page, PageState, SortKey, SortSpec,
};
use haulboard_types::{Result, ValidationError};
use tracing::{debug, warn};

use crate::notify::Notification;

/// Lifecycle of one view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    Idle,
    Loading,
    Ready,
    Error(String),
}

/// Generation number of one fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

pub enum ViewAction<R: Record> {
    /// Start (or restart) loading the snapshot
    Refresh,
    Loaded {
        ticket: FetchTicket,
        records: Vec<R>,
    },
    Failed {
        ticket: FetchTicket,
        message: String,
    },
    /// Validate raw input and make it the active criteria
    ApplyFilters(FilterInput),
    SetCriteria(FilterCriteria<R::Status>),
    ResetFilters,
    SetSort(SortKey),
    ToggleSortDirection,
    SetPageSize(usize),
    SetPage(usize),
    Teardown,
}

impl<R: Record> std::fmt::Debug for ViewAction<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewAction::Refresh => write!(f, "Refresh"),
            ViewAction::Loaded { ticket, records } => f
                .debug_struct("Loaded")
                .field("ticket", ticket)
                .field("records", &records.len())
                .finish(),
            ViewAction::Failed { ticket, message } => f
                .debug_struct("Failed")
                .field("ticket", ticket)
                .field("message", message)
                .finish(),
            ViewAction::ApplyFilters(input) => f.debug_tuple("ApplyFilters").field(input).finish(),
            ViewAction::SetCriteria(_) => write!(f, "SetCriteria"),
            ViewAction::ResetFilters => write!(f, "ResetFilters"),
            ViewAction::SetSort(key) => f.debug_tuple("SetSort").field(key).finish(),
            ViewAction::ToggleSortDirection => write!(f, "ToggleSortDirection"),
            ViewAction::SetPageSize(size) => f.debug_tuple("SetPageSize").field(size).finish(),
            ViewAction::SetPage(page) => f.debug_tuple("SetPage").field(page).finish(),
            ViewAction::Teardown => write!(f, "Teardown"),
        }
    }
}

/// Work the caller performs on behalf of the reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch(FetchTicket),
    Notify(Notification),
}

/// State of one list view over record kind `R`
pub struct ViewController<R: Record, A: Aggregator<R>> {
    aggregator: A,
    date_policy: DatePolicy,
    status: ViewStatus,
    snapshot: Vec<R>,
    view: DerivedView<R, A::Totals>,
    criteria: FilterCriteria<R::Status>,
    sort_spec: SortSpec,
    page: PageState,
    issued: u64,
    pending: Option<FetchTicket>,
    torn_down: bool,
}

impl<R: Record, A: Aggregator<R>> ViewController<R, A> {
    pub fn new(aggregator: A) -> Self {
        Self {
            aggregator,
            date_policy: DatePolicy::default(),
            status: ViewStatus::Idle,
            snapshot: Vec::new(),
            view: empty_view(),
            criteria: FilterCriteria::default(),
            sort_spec: SortSpec::default(),
            page: PageState::default(),
            issued: 0,
            pending: None,
            torn_down: false,
        }
    }

    pub fn with_date_policy(mut self, policy: DatePolicy) -> Self {
        self.date_policy = policy;
        self
    }

    pub fn with_page_state(mut self, page: PageState) -> Self {
        self.page = page;
        self
    }

    pub fn with_sort(mut self, sort_spec: SortSpec) -> Self {
        self.sort_spec = sort_spec;
        self
    }

    /// Apply one action and return the effects it requests
    pub fn dispatch(&mut self, action: ViewAction<R>) -> Result<Vec<Effect>> {
        debug!(kind = %R::KIND, action = ?action, "dispatch");
        match action {
            ViewAction::Refresh => Ok(self.refresh()),
            ViewAction::Loaded { ticket, records } => Ok(self.loaded(ticket, records)),
            ViewAction::Failed { ticket, message } => Ok(self.failed(ticket, message)),
            ViewAction::ApplyFilters(input) => {
                let criteria = input.into_criteria::<R::Status>(self.date_policy)?;
                self.replace_criteria(criteria);
                Ok(vec![Effect::Notify(Notification::success(
                    "Filters applied",
                    format!("Showing {} of {} {}", self.view.len(), self.snapshot.len(), R::KIND),
                ))])
            }
            ViewAction::SetCriteria(criteria) => {
                self.replace_criteria(criteria);
                Ok(Vec::new())
            }
            ViewAction::ResetFilters => {
                self.replace_criteria(FilterCriteria::default());
                Ok(vec![Effect::Notify(Notification::info(
                    "Filters reset",
                    "All filters have been cleared",
                ))])
            }
            ViewAction::SetSort(key) => {
                self.sort_spec.key = key;
                self.rederive();
                Ok(Vec::new())
            }
            ViewAction::ToggleSortDirection => {
                self.sort_spec.toggle_direction();
                self.rederive();
                Ok(Vec::new())
            }
            ViewAction::SetPageSize(size) => {
                self.page = PageState {
                    current_page: self.page.current_page,
                    ..PageState::with_page_size(size)?
                };
                self.clamp();
                Ok(Vec::new())
            }
            ViewAction::SetPage(page) => {
                self.page.current_page = page;
                self.clamp();
                Ok(Vec::new())
            }
            ViewAction::Teardown => {
                self.torn_down = true;
                self.pending = None;
                Ok(Vec::new())
            }
        }
    }

    fn refresh(&mut self) -> Vec<Effect> {
        if self.torn_down {
            return Vec::new();
        }
        self.issued += 1;
        let ticket = FetchTicket(self.issued);
        self.pending = Some(ticket);
        self.status = ViewStatus::Loading;
        vec![Effect::Fetch(ticket)]
    }

    /// Take the pending ticket if `ticket` is it
    fn accept(&mut self, ticket: FetchTicket) -> bool {
        if self.pending == Some(ticket) && !self.torn_down {
            self.pending = None;
            true
        } else {
            warn!(
                kind = %R::KIND,
                ticket = ticket.generation(),
                torn_down = self.torn_down,
                "discarding stale fetch result"
            );
            false
        }
    }

    fn loaded(&mut self, ticket: FetchTicket, records: Vec<R>) -> Vec<Effect> {
        if !self.accept(ticket) {
            return Vec::new();
        }
        if let Err(e) = ensure_unique_ids(&records) {
            return self.enter_error(e.to_string());
        }
        self.snapshot = records;
        self.status = ViewStatus::Ready;
        self.rederive();
        Vec::new()
    }

    fn failed(&mut self, ticket: FetchTicket, message: String) -> Vec<Effect> {
        if !self.accept(ticket) {
            return Vec::new();
        }
        self.enter_error(message)
    }

    fn enter_error(&mut self, message: String) -> Vec<Effect> {
        warn!(kind = %R::KIND, error = %message, "fetch failed");
        self.snapshot = Vec::new();
        self.view = empty_view();
        self.page.current_page = 1;
        self.status = ViewStatus::Error(message.clone());
        vec![Effect::Notify(Notification::destructive(
            format!("Failed to load {}", R::KIND),
            message,
        ))]
    }

    fn replace_criteria(&mut self, criteria: FilterCriteria<R::Status>) {
        self.criteria = criteria;
        self.page.current_page = 1;
        self.rederive();
    }

    fn rederive(&mut self) {
        self.view = derive_view(
            &self.snapshot,
            &self.criteria,
            &self.sort_spec,
            &self.aggregator,
        );
        self.clamp();
        debug!(
            kind = %R::KIND,
            matched = self.view.len(),
            total = self.snapshot.len(),
            page = self.page.current_page,
            "view derived"
        );
    }

    fn clamp(&mut self) {
        let total_pages = self.view.total_pages(self.page.page_size);
        self.page.current_page = clamp_page(self.page.current_page, total_pages);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn pending_ticket(&self) -> Option<FetchTicket> {
        self.pending
    }

    pub fn criteria(&self) -> &FilterCriteria<R::Status> {
        &self.criteria
    }

    pub fn sort_spec(&self) -> &SortSpec {
        &self.sort_spec
    }

    pub fn page_state(&self) -> &PageState {
        &self.page
    }

    pub fn date_policy(&self) -> DatePolicy {
        self.date_policy
    }

    /// The visible page of the filtered, sorted records
    pub fn current_page(&self) -> Page<'_, R> {
        self.view.page(self.page.page_size, self.page.current_page)
    }

    pub fn total_pages(&self) -> usize {
        self.view.total_pages(self.page.page_size)
    }

    pub fn totals(&self) -> &A::Totals {
        &self.view.totals
    }

    /// Every record passing the filters, in sort order
    pub fn filtered(&self) -> &[R] {
        &self.view.records
    }

    /// The full snapshot, unfiltered
    pub fn snapshot(&self) -> &[R] {
        &self.snapshot
    }

    /// Look up a record of the snapshot by id
    pub fn find(&self, id: &str) -> Result<&R> {
        find_record(&self.snapshot, id)
    }

    pub fn active_filter_count(&self) -> usize {
        self.criteria.active_count()
    }

    /// Assignee dropdown choices from the snapshot
    pub fn assignee_options(&self) -> Vec<String> {
        assignee_options(&self.snapshot)
    }

    /// Status dropdown choices present in the snapshot
    pub fn status_options(&self) -> Vec<R::Status> {
        status_options(&self.snapshot)
    }

    /// Every status of the record kind, present or not
    pub fn all_statuses(&self) -> &'static [R::Status] {
        <R::Status as StatusKind>::ALL
    }
}

fn empty_view<R, T: Default>() -> DerivedView<R, T> {
    DerivedView {
        records: Vec::new(),
        totals: T::default(),
    }
}

/// Title for a rejected filter change
pub fn validation_title(error: &ValidationError) -> &'static str {
    match error {
        ValidationError::InvertedDateRange { .. } | ValidationError::InvalidDate { .. } => {
            "Invalid date range"
        }
        ValidationError::ZeroPageSize => "Invalid page size",
        ValidationError::UnknownStatus(_) => "Invalid filters",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haulboard_domain::model::{Load, LoadStatus};
    use haulboard_domain::service::{LoadAggregator, SortDirection};
    use haulboard_infra::sample_data::sample_loads;
    use haulboard_types::{Error, Severity};

    type LoadView = ViewController<Load, LoadAggregator>;

    fn ready(records: Vec<Load>) -> LoadView {
        let mut view = LoadView::new(LoadAggregator);
        let ticket = fetch_ticket(view.dispatch(ViewAction::Refresh).unwrap());
        view.dispatch(ViewAction::Loaded { ticket, records }).unwrap();
        view
    }

    fn fetch_ticket(effects: Vec<Effect>) -> FetchTicket {
        match effects.as_slice() {
            [Effect::Fetch(ticket)] => *ticket,
            other => panic!("expected a single fetch effect, got {:?}", other),
        }
    }

    /// `count` loads, the first `booked` of them booked and the rest delivered
    fn numbered_loads(count: usize, booked: usize) -> Vec<Load> {
        let template = sample_loads().unwrap().remove(0);
        (0..count)
            .map(|i| Load {
                id: format!("n{}", i),
                status: if i < booked {
                    LoadStatus::Booked
                } else {
                    LoadStatus::Delivered
                },
                ..template.clone()
            })
            .collect()
    }

    fn page_ids(view: &LoadView) -> Vec<String> {
        view.current_page().items.iter().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn test_refresh_loads_and_derives() {
        let mut view = LoadView::new(LoadAggregator);
        assert_eq!(view.status(), &ViewStatus::Idle);

        let ticket = fetch_ticket(view.dispatch(ViewAction::Refresh).unwrap());
        assert_eq!(view.status(), &ViewStatus::Loading);

        let effects = view
            .dispatch(ViewAction::Loaded {
                ticket,
                records: sample_loads().unwrap(),
            })
            .unwrap();
        assert!(effects.is_empty());
        assert_eq!(view.status(), &ViewStatus::Ready);
        assert_eq!(view.filtered().len(), 5);
        assert_eq!(view.totals().count, 5);
        assert_eq!(page_ids(&view), vec!["4", "3", "1", "2", "5"]);
    }

    #[test]
    fn test_status_filter_scenario() {
        let mut view = ready(sample_loads().unwrap());
        let effects = view
            .dispatch(ViewAction::ApplyFilters(FilterInput {
                status: Some("booked".to_string()),
                ..FilterInput::default()
            }))
            .unwrap();

        let ids: Vec<&str> = view.filtered().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);
        assert_eq!(view.active_filter_count(), 1);
        match effects.as_slice() {
            [Effect::Notify(n)] => {
                assert_eq!(n.title, "Filters applied");
                assert_eq!(n.severity, Severity::Success);
            }
            other => panic!("unexpected effects {:?}", other),
        }
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut view = LoadView::new(LoadAggregator);
        let first = fetch_ticket(view.dispatch(ViewAction::Refresh).unwrap());
        let second = fetch_ticket(view.dispatch(ViewAction::Refresh).unwrap());
        assert!(second > first);

        view.dispatch(ViewAction::Loaded {
            ticket: first,
            records: sample_loads().unwrap(),
        })
        .unwrap();
        assert_eq!(view.status(), &ViewStatus::Loading);
        assert!(view.snapshot().is_empty());

        view.dispatch(ViewAction::Loaded {
            ticket: second,
            records: numbered_loads(2, 2),
        })
        .unwrap();
        assert_eq!(view.snapshot().len(), 2);

        // a repeat of an accepted ticket is also stale
        view.dispatch(ViewAction::Failed {
            ticket: second,
            message: "late".to_string(),
        })
        .unwrap();
        assert_eq!(view.status(), &ViewStatus::Ready);
    }

    #[test]
    fn test_results_after_teardown_are_discarded() {
        let mut view = LoadView::new(LoadAggregator);
        let ticket = fetch_ticket(view.dispatch(ViewAction::Refresh).unwrap());
        view.dispatch(ViewAction::Teardown).unwrap();

        view.dispatch(ViewAction::Loaded {
            ticket,
            records: sample_loads().unwrap(),
        })
        .unwrap();
        assert!(view.snapshot().is_empty());
        assert!(view.is_torn_down());
        assert!(view.dispatch(ViewAction::Refresh).unwrap().is_empty());
    }

    #[test]
    fn test_failure_clears_view_and_notifies() {
        let mut view = ready(sample_loads().unwrap());
        let ticket = fetch_ticket(view.dispatch(ViewAction::Refresh).unwrap());
        let effects = view
            .dispatch(ViewAction::Failed {
                ticket,
                message: "store offline".to_string(),
            })
            .unwrap();

        assert_eq!(view.status(), &ViewStatus::Error("store offline".to_string()));
        assert!(view.filtered().is_empty());
        assert_eq!(view.totals().count, 0);
        match effects.as_slice() {
            [Effect::Notify(n)] => {
                assert_eq!(n.title, "Failed to load loads");
                assert_eq!(n.severity, Severity::Destructive);
            }
            other => panic!("unexpected effects {:?}", other),
        }

        // retry re-enters loading
        fetch_ticket(view.dispatch(ViewAction::Refresh).unwrap());
        assert_eq!(view.status(), &ViewStatus::Loading);
    }

    #[test]
    fn test_duplicate_ids_enter_error() {
        let mut view = LoadView::new(LoadAggregator);
        let ticket = fetch_ticket(view.dispatch(ViewAction::Refresh).unwrap());
        let mut records = sample_loads().unwrap();
        records.push(records[0].clone());
        view.dispatch(ViewAction::Loaded { ticket, records }).unwrap();
        assert!(matches!(view.status(), ViewStatus::Error(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn test_inverted_range_keeps_previous_criteria() {
        let mut view = ready(sample_loads().unwrap());
        view.dispatch(ViewAction::ApplyFilters(FilterInput {
            status: Some("assigned".to_string()),
            ..FilterInput::default()
        }))
        .unwrap();
        let before = view.criteria().clone();

        let err = view
            .dispatch(ViewAction::ApplyFilters(FilterInput {
                date_from: Some("2025-05-17".to_string()),
                date_to: Some("2025-05-15".to_string()),
                ..FilterInput::default()
            }))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvertedDateRange { .. })
        ));
        assert_eq!(view.criteria(), &before);
        assert_eq!(view.filtered().len(), 1);
    }

    #[test]
    fn test_strict_policy_rejects_bad_dates() {
        let mut view = ready(sample_loads().unwrap());
        let lenient = FilterInput {
            date_from: Some("not a date".to_string()),
            date_to: Some("2025-05-15".to_string()),
            ..FilterInput::default()
        };
        view.dispatch(ViewAction::ApplyFilters(lenient.clone())).unwrap();
        assert!(view.criteria().date_range.is_none());
        assert_eq!(view.filtered().len(), 5);

        let mut strict = LoadView::new(LoadAggregator).with_date_policy(DatePolicy::Strict);
        let err = strict.dispatch(ViewAction::ApplyFilters(lenient)).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidDate { field: "start", .. })
        ));
    }

    #[test]
    fn test_filter_change_clamps_page() {
        let mut view = ready(numbered_loads(25, 8));
        view.dispatch(ViewAction::SetPage(3)).unwrap();
        assert_eq!(view.current_page().current_page, 3);
        assert_eq!(view.total_pages(), 3);
        assert_eq!(view.current_page().items.len(), 5);

        view.dispatch(ViewAction::SetCriteria(
            FilterCriteria::default().with_status(LoadStatus::Booked),
        ))
        .unwrap();
        let page = view.current_page();
        assert_eq!((page.current_page, page.total_pages), (1, 1));
        assert_eq!(page.items.len(), 8);
    }

    #[test]
    fn test_set_page_is_clamped() {
        let mut view = ready(numbered_loads(12, 0));
        view.dispatch(ViewAction::SetPage(9)).unwrap();
        assert_eq!(view.page_state().current_page, 2);
        assert_eq!(page_ids(&view), vec!["n10", "n11"]);
        view.dispatch(ViewAction::SetPage(0)).unwrap();
        assert_eq!(view.page_state().current_page, 1);
    }

    #[test]
    fn test_page_size_change_keeps_page_when_valid() {
        let mut view = ready(numbered_loads(25, 0));
        view.dispatch(ViewAction::SetPage(3)).unwrap();
        view.dispatch(ViewAction::SetPageSize(5)).unwrap();
        assert_eq!(view.page_state().current_page, 3);
        view.dispatch(ViewAction::SetPageSize(20)).unwrap();
        assert_eq!(view.page_state().current_page, 2);

        assert!(matches!(
            view.dispatch(ViewAction::SetPageSize(0)).unwrap_err(),
            Error::Validation(ValidationError::ZeroPageSize)
        ));
        assert_eq!(view.page_state().page_size.get(), 20);
    }

    #[test]
    fn test_sort_changes_keep_page_and_criteria() {
        let mut view = ready(sample_loads().unwrap());
        view.dispatch(ViewAction::SetSort(SortKey::Value)).unwrap();
        view.dispatch(ViewAction::ToggleSortDirection).unwrap();
        assert_eq!(view.sort_spec().direction, SortDirection::Descending);
        assert_eq!(page_ids(&view), vec!["4", "2", "3", "1", "5"]);
    }

    #[test]
    fn test_reset_filters() {
        let mut view = ready(sample_loads().unwrap());
        view.dispatch(ViewAction::SetCriteria(
            FilterCriteria::default().with_assignee("John Doe"),
        ))
        .unwrap();
        assert_eq!(view.filtered().len(), 1);

        let effects = view.dispatch(ViewAction::ResetFilters).unwrap();
        assert_eq!(view.filtered().len(), 5);
        assert!(view.criteria().is_default());
        assert!(matches!(effects.as_slice(), [Effect::Notify(n)] if n.title == "Filters reset"));
    }

    #[test]
    fn test_find_and_options() {
        let view = ready(sample_loads().unwrap());
        assert_eq!(view.find("3").unwrap().broker_name, "FastFreight");
        assert!(matches!(view.find("99"), Err(Error::NotFound { .. })));
        assert_eq!(
            view.assignee_options(),
            vec!["John Doe", "Mike Johnson", "Sarah Williams"]
        );
        assert_eq!(view.status_options().len(), 5);
        assert_eq!(view.all_statuses().len(), 5);
    }

    #[test]
    fn test_empty_snapshot_is_page_one_of_one() {
        let view = ready(Vec::new());
        let page = view.current_page();
        assert_eq!((page.current_page, page.total_pages), (1, 1));
        assert!(page.items.is_empty());
        assert_eq!(view.totals().average_rate, 0.0);
    }
}
