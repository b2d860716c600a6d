//! CLI definition using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use haulboard_domain::service::{DatePolicy, FilterInput, SortDirection, SortKey, SortSpec};
use haulboard_types::OutputFormat;

#[derive(Parser)]
#[command(name = "haulboard")]
#[command(version)]
#[command(about = "Trucking back office: loads, drivers, calendar and logistics views")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Read snapshots from this directory instead of the configured source
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Sort column
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Date,
    Value,
    Status,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Date => SortKey::Date,
            SortArg::Value => SortKey::Value,
            SortArg::Status => SortKey::Status,
        }
    }
}

/// Filter, sort and paging flags shared by the list commands
#[derive(Args, Clone, Debug, Default)]
pub struct ViewArgs {
    /// Status to keep ("all" keeps every status)
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// Assignee to keep (driver for loads and events, dispatcher for logistics)
    #[arg(long, short = 'a')]
    pub assignee: Option<String>,

    /// Case-insensitive text search
    #[arg(long, short = 'q', default_value = "")]
    pub search: String,

    /// Start of the date range (YYYY-MM-DD), used together with --to
    #[arg(long)]
    pub from: Option<String>,

    /// End of the date range (YYYY-MM-DD), used together with --from
    #[arg(long)]
    pub to: Option<String>,

    /// Sort column
    #[arg(long)]
    pub sort: Option<SortArg>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Page to show (1-based)
    #[arg(long, short = 'p', default_value_t = 1)]
    pub page: usize,

    /// Rows per page. Uses config value if not specified.
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Print every matching row instead of one page
    #[arg(long)]
    pub all: bool,

    /// Treat unparsable dates as errors instead of ignoring them
    #[arg(long)]
    pub strict_dates: bool,
}

impl ViewArgs {
    pub fn filter_input(&self) -> FilterInput {
        FilterInput {
            status: self.status.clone(),
            assignee: self.assignee.clone(),
            query: self.search.clone(),
            date_from: self.from.clone(),
            date_to: self.to.clone(),
        }
    }

    pub fn sort_spec(&self) -> SortSpec {
        let direction = if self.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        SortSpec::new(self.sort.map(SortKey::from).unwrap_or_default(), direction)
    }

    pub fn date_policy(&self, configured: DatePolicy) -> DatePolicy {
        if self.strict_dates {
            DatePolicy::Strict
        } else {
            configured
        }
    }
}

/// Calendar window
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum CalendarView {
    #[default]
    List,
    Day,
    Week,
    Month,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List loads
    Loads {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// List drivers
    Drivers {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Show pickups and deliveries on the scheduling calendar
    Calendar {
        /// Window to show
        #[arg(long, value_enum, default_value_t = CalendarView::List)]
        window: CalendarView,

        /// Date the day/week/month window is built around (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Dispatcher revenue table with totals
    Logistics {
        /// Print the dispatcher and driver type filter choices
        #[arg(long)]
        options: bool,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Show one load
    Load {
        /// Load id
        id: String,
    },

    /// Show one driver and their loads
    Driver {
        /// Driver id
        id: String,
    },

    /// Dashboard cards
    Dashboard {
        /// Day to report on (YYYY-MM-DD, default today)
        #[arg(long)]
        today: Option<String>,
    },

    /// Export the filtered logistics view to Excel
    Report {
        /// Output Excel file path
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set the snapshot directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Use the built-in sample data again
        #[arg(long)]
        clear_data_dir: bool,

        /// Set rows per page
        #[arg(long)]
        set_page_size: Option<usize>,

        /// Set fetch timeout in milliseconds
        #[arg(long)]
        set_timeout_ms: Option<u64>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reject unparsable filter dates (true) or ignore them (false)
        #[arg(long)]
        set_strict_dates: Option<bool>,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}
