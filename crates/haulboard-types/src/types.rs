//! Shared enums used across layers

use serde::{Deserialize, Serialize};

/// Kind of record flowing through a list view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordKind {
    Loads,
    Drivers,
    CalendarEvents,
    Logistics,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Loads,
        RecordKind::Drivers,
        RecordKind::CalendarEvents,
        RecordKind::Logistics,
    ];

    /// File stem used by file-backed stores (`loads.json`, `logistics.csv`, ...)
    pub fn file_stem(&self) -> &'static str {
        match self {
            RecordKind::Loads => "loads",
            RecordKind::Drivers => "drivers",
            RecordKind::CalendarEvents => "calendar_events",
            RecordKind::Logistics => "logistics",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Loads => write!(f, "loads"),
            RecordKind::Drivers => write!(f, "drivers"),
            RecordKind::CalendarEvents => write!(f, "calendar events"),
            RecordKind::Logistics => write!(f, "logistics"),
        }
    }
}

/// Severity of a user-facing notification
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Destructive,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Destructive => "error",
        }
    }
}
