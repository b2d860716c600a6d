//! Closed status enumerations, one per record kind

use serde::{Deserialize, Serialize};

/// A closed enumeration with a fixed pipeline rank.
pub trait StatusKind: Copy + Eq + std::fmt::Debug + Send + Sync + 'static {
    /// Every value, in rank order
    const ALL: &'static [Self];

    /// 1-based position in pipeline order
    fn rank(&self) -> u8;

    fn as_str(&self) -> &'static str;

    /// Case-insensitive lookup by `as_str` value
    fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.as_str().eq_ignore_ascii_case(input))
    }
}

/// Load lifecycle status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadStatus {
    Booked,
    Assigned,
    InTransit,
    Delivered,
    Cancelled,
}

impl StatusKind for LoadStatus {
    const ALL: &'static [Self] = &[
        LoadStatus::Booked,
        LoadStatus::Assigned,
        LoadStatus::InTransit,
        LoadStatus::Delivered,
        LoadStatus::Cancelled,
    ];

    fn rank(&self) -> u8 {
        match self {
            LoadStatus::Booked => 1,
            LoadStatus::Assigned => 2,
            LoadStatus::InTransit => 3,
            LoadStatus::Delivered => 4,
            LoadStatus::Cancelled => 5,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::Booked => "booked",
            LoadStatus::Assigned => "assigned",
            LoadStatus::InTransit => "in-transit",
            LoadStatus::Delivered => "delivered",
            LoadStatus::Cancelled => "cancelled",
        }
    }
}

impl LoadStatus {
    /// Loads currently being worked (assigned or on the road)
    pub fn is_active(&self) -> bool {
        matches!(self, LoadStatus::Assigned | LoadStatus::InTransit)
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoadStatus::Booked => "Booked",
            LoadStatus::Assigned => "Assigned",
            LoadStatus::InTransit => "In Transit",
            LoadStatus::Delivered => "Delivered",
            LoadStatus::Cancelled => "Cancelled",
        }
    }
}

/// Driver availability
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DriverStatus {
    Available,
    OnLoad,
    OffDuty,
}

impl StatusKind for DriverStatus {
    const ALL: &'static [Self] = &[
        DriverStatus::Available,
        DriverStatus::OnLoad,
        DriverStatus::OffDuty,
    ];

    fn rank(&self) -> u8 {
        match self {
            DriverStatus::Available => 1,
            DriverStatus::OnLoad => 2,
            DriverStatus::OffDuty => 3,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Available => "available",
            DriverStatus::OnLoad => "on-load",
            DriverStatus::OffDuty => "off-duty",
        }
    }
}

/// Driver employment type on logistics rows
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriverType {
    #[serde(alias = "company")]
    Company,
    #[serde(alias = "owner")]
    Owner,
}

impl StatusKind for DriverType {
    const ALL: &'static [Self] = &[DriverType::Company, DriverType::Owner];

    fn rank(&self) -> u8 {
        match self {
            DriverType::Company => 1,
            DriverType::Owner => 2,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            DriverType::Company => "company",
            DriverType::Owner => "owner",
        }
    }
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for DriverType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverType::Company => write!(f, "Company"),
            DriverType::Owner => write!(f, "Owner"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_status_ranks_follow_pipeline_order() {
        let ranks: Vec<u8> = LoadStatus::ALL.iter().map(|s| s.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(LoadStatus::parse("In-Transit"), Some(LoadStatus::InTransit));
        assert_eq!(DriverStatus::parse(" off-duty "), Some(DriverStatus::OffDuty));
        assert_eq!(DriverType::parse("OWNER"), Some(DriverType::Owner));
        assert_eq!(LoadStatus::parse("lost"), None);
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&LoadStatus::InTransit).unwrap();
        assert_eq!(json, "\"in-transit\"");
        let status: DriverStatus = serde_json::from_str("\"on-load\"").unwrap();
        assert_eq!(status, DriverStatus::OnLoad);
    }

    #[test]
    fn test_driver_type_accepts_both_spellings() {
        let a: DriverType = serde_json::from_str("\"Company\"").unwrap();
        let b: DriverType = serde_json::from_str("\"owner\"").unwrap();
        assert_eq!(a, DriverType::Company);
        assert_eq!(b, DriverType::Owner);
    }
}
