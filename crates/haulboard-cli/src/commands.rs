//! Command handlers

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};
use haulboard_app::app::{
    calendar_window, get_dashboard_metrics, get_driver_detail, get_load, CalendarRange,
};
use haulboard_app::backend::{self, Backend};
use haulboard_app::config::Config;
use haulboard_app::export::export_logistics_report;
use haulboard_app::notify::{ConsoleNotifier, Notifier, TracingNotifier};
use haulboard_app::repository::{RecordStores, StoreFor};
use haulboard_app::view::{ViewAction, ViewController, ViewRunner, ViewStatus};
use haulboard_domain::model::{CalendarEvent, Driver, Load, LogisticsRow, Record};
use haulboard_domain::service::filter::parse_date_input;
use haulboard_domain::service::{
    Aggregator, CalendarAggregator, DatePolicy, DriverAggregator, FilterInput, LoadAggregator,
    LogisticsAggregator, PageState,
};
use haulboard_types::{FetchError, OutputFormat, Result, ValidationError};
use tracing::debug;

use crate::cli::{CalendarView, Cli, Commands, ViewArgs};
use crate::output::{self, Listing, PageFooter};

const DEFAULT_REPORT_PATH: &str = "logistics_report.xlsx";

/// A running backend plus the output settings for one command.
/// The backend is torn down when the session is dropped.
struct Session {
    backend: Arc<Backend>,
    notifier: Arc<dyn Notifier>,
    format: OutputFormat,
}

impl Session {
    fn start(format: Option<OutputFormat>, data_dir: Option<PathBuf>, verbose: bool) -> Result<Self> {
        let mut config = Config::load()?;

        // Override from CLI args
        if data_dir.is_some() {
            config.data_dir = data_dir;
        }
        let format = format.unwrap_or(config.output_format);

        let notifier: Arc<dyn Notifier> = if verbose {
            Arc::new(ConsoleNotifier)
        } else {
            Arc::new(TracingNotifier)
        };

        Ok(Self {
            backend: backend::init(config),
            notifier,
            format,
        })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        backend::teardown();
    }
}

pub async fn execute(cli: Cli) -> Result<()> {
    let Cli {
        command,
        format,
        data_dir,
        verbose,
    } = cli;
    let session = || Session::start(format, data_dir.clone(), verbose);

    match command {
        Commands::Loads { view } => cmd_loads(&session()?, &view).await,
        Commands::Drivers { view } => cmd_drivers(&session()?, &view).await,
        Commands::Calendar { window, date, view } => {
            cmd_calendar(&session()?, window, date.as_deref(), &view).await
        }
        Commands::Logistics { options, view } => cmd_logistics(&session()?, options, &view).await,
        Commands::Load { id } => cmd_load(&session()?, &id),
        Commands::Driver { id } => cmd_driver(&session()?, &id),
        Commands::Dashboard { today } => cmd_dashboard(&session()?, today.as_deref()),
        Commands::Report { output, view } => cmd_report(&session()?, output, &view).await,
        Commands::Config {
            show,
            set_data_dir,
            clear_data_dir,
            set_page_size,
            set_timeout_ms,
            set_output,
            set_strict_dates,
            reset,
        } => cmd_config(
            show,
            set_data_dir,
            clear_data_dir,
            set_page_size,
            set_timeout_ms,
            set_output,
            set_strict_dates,
            reset,
        ),
    }
}

/// Load a snapshot and run the view flags through the controller
async fn open_view<R, A>(
    session: &Session,
    aggregator: A,
    args: &ViewArgs,
) -> Result<ViewController<R, A>>
where
    R: Record,
    A: Aggregator<R>,
    RecordStores: StoreFor<R>,
{
    let config = session.backend.config();
    let page_state = match args.page_size {
        Some(size) => PageState::with_page_size(size)?,
        None => config.page_state()?,
    };

    let controller = ViewController::new(aggregator)
        .with_date_policy(args.date_policy(config.date_policy))
        .with_page_state(page_state)
        .with_sort(args.sort_spec());
    let mut runner = ViewRunner::new(
        controller,
        session.backend.store::<R>(),
        Arc::clone(&session.notifier),
    )
    .with_fetch_timeout(config.fetch_timeout());

    runner.refresh().await?;
    if let ViewStatus::Error(reason) = runner.controller().status() {
        return Err(FetchError::Unavailable {
            kind: R::KIND,
            reason: reason.clone(),
        }
        .into());
    }

    let input = args.filter_input();
    if input != FilterInput::default() {
        runner.dispatch(ViewAction::ApplyFilters(input)).await?;
    }
    runner.dispatch(ViewAction::SetPage(args.page)).await?;

    let controller = runner.into_controller();
    debug!(
        kind = %R::KIND,
        total = controller.snapshot().len(),
        shown = controller.filtered().len(),
        filters = controller.active_filter_count(),
        "view ready"
    );
    Ok(controller)
}

/// One page of the view, or every filtered row with `--all`
fn listing<R: Record, A: Aggregator<R>>(
    controller: &ViewController<R, A>,
    all: bool,
) -> Listing<'_, R, A::Totals> {
    if all {
        return Listing {
            items: controller.filtered(),
            footer: None,
            totals: controller.totals(),
        };
    }
    let page = controller.current_page();
    Listing {
        items: page.items,
        footer: Some(PageFooter {
            current_page: page.current_page,
            total_pages: page.total_pages,
            total_items: page.total_items,
        }),
        totals: controller.totals(),
    }
}

fn parse_day(field: &'static str, input: Option<&str>) -> Result<NaiveDate> {
    match input {
        None => Ok(Local::now().date_naive()),
        Some(raw) => parse_date_input(raw).ok_or_else(|| {
            ValidationError::InvalidDate {
                field,
                input: raw.to_string(),
            }
            .into()
        }),
    }
}

async fn cmd_loads(session: &Session, args: &ViewArgs) -> Result<()> {
    let controller = open_view::<Load, _>(session, LoadAggregator, args).await?;
    output::print_loads(session.format, &listing(&controller, args.all))
}

async fn cmd_drivers(session: &Session, args: &ViewArgs) -> Result<()> {
    let controller = open_view::<Driver, _>(session, DriverAggregator, args).await?;
    output::print_drivers(session.format, &listing(&controller, args.all))
}

async fn cmd_calendar(
    session: &Session,
    window: CalendarView,
    date: Option<&str>,
    args: &ViewArgs,
) -> Result<()> {
    let controller = open_view::<CalendarEvent, _>(session, CalendarAggregator, args).await?;

    let anchor = parse_day("calendar", date)?;
    let range = match window {
        CalendarView::List => {
            return output::print_calendar_list(session.format, &listing(&controller, args.all));
        }
        CalendarView::Day => CalendarRange::Day(anchor),
        CalendarView::Week => CalendarRange::Week(anchor),
        CalendarView::Month => CalendarRange::Month {
            year: anchor.year(),
            month: anchor.month(),
        },
    };

    let days = calendar_window(controller.filtered(), range);
    let in_window: Vec<CalendarEvent> = days.values().flatten().map(|e| (*e).clone()).collect();
    let totals = CalendarAggregator.aggregate(&in_window);
    output::print_calendar_days(session.format, &days, &totals)
}

async fn cmd_logistics(session: &Session, options: bool, args: &ViewArgs) -> Result<()> {
    let controller = open_view::<LogisticsRow, _>(session, LogisticsAggregator, args).await?;

    if options {
        return output::print_filter_options(
            session.format,
            &controller.assignee_options(),
            &controller.status_options(),
        );
    }
    output::print_logistics(session.format, &listing(&controller, args.all))
}

fn cmd_load(session: &Session, id: &str) -> Result<()> {
    let load = get_load(&session.backend, id)?;
    output::print_load(session.format, &load)
}

fn cmd_driver(session: &Session, id: &str) -> Result<()> {
    let detail = get_driver_detail(&session.backend, id)?;
    output::print_driver_detail(session.format, &detail)
}

fn cmd_dashboard(session: &Session, today: Option<&str>) -> Result<()> {
    let today = parse_day("today", today)?;
    let metrics = get_dashboard_metrics(&session.backend, today)?;
    output::print_dashboard(session.format, today, &metrics)
}

async fn cmd_report(session: &Session, output: Option<PathBuf>, args: &ViewArgs) -> Result<()> {
    let controller = open_view::<LogisticsRow, _>(session, LogisticsAggregator, args).await?;
    let path = output.unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_PATH));

    export_logistics_report(controller.filtered(), controller.totals(), &path)?;
    println!(
        "Report generated with {} entries: {}",
        controller.filtered().len(),
        path.display()
    );
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_config(
    show: bool,
    set_data_dir: Option<PathBuf>,
    clear_data_dir: bool,
    set_page_size: Option<usize>,
    set_timeout_ms: Option<u64>,
    set_output: Option<OutputFormat>,
    set_strict_dates: Option<bool>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(dir) = set_data_dir {
        config.data_dir = Some(dir);
        modified = true;
    }

    if clear_data_dir {
        config.data_dir = None;
        modified = true;
    }

    if let Some(size) = set_page_size {
        PageState::with_page_size(size)?;
        config.page_size = size;
        modified = true;
    }

    if let Some(timeout_ms) = set_timeout_ms {
        config.fetch_timeout_ms = timeout_ms;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(strict) = set_strict_dates {
        config.date_policy = if strict {
            DatePolicy::Strict
        } else {
            DatePolicy::Lenient
        };
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("\n{}", config);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day_accepts_dates_and_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2025, 5, 15).unwrap();
        assert_eq!(parse_day("today", Some("2025-05-15")).unwrap(), expected);
        assert_eq!(
            parse_day("today", Some("2025-05-15T08:30:00")).unwrap(),
            expected
        );
    }

    #[test]
    fn test_parse_day_rejects_garbage() {
        let err = parse_day("today", Some("yesterday")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid today date: 'yesterday'");
    }
}
