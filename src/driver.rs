//! Cost-driver dimensions for analogy matching.
//!
//! A cost driver is one of a fixed set of ordinal attributes describing a
//! project's characteristics (reliability requirements, complexity, team
//! experience, ...). The set is closed and known at design time; analogy
//! matching compares projects driver by driver, never on arbitrary
//! feature vectors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest rating a cost driver can take.
pub const RATING_SCALE_MIN: f64 = 0.0;

/// Highest rating a cost driver can take.
///
/// Every driver is rated on the same fixed-width ordinal scale. The
/// distance function takes the bounds as parameters so a per-driver scale
/// could be threaded through later, but all current call sites use these
/// two constants.
pub const RATING_SCALE_MAX: f64 = 5.0;

/// The fixed, enumerated set of cost drivers.
///
/// Names follow the historical dataset's column headers (the classic
/// COCOMO driver mnemonics), which is also how they serialize.
///
/// # Examples
///
/// ```
/// use kindred::CostDriver;
///
/// assert_eq!(CostDriver::Cplx.to_string(), "CPLX");
/// assert_eq!("cplx".parse::<CostDriver>().unwrap(), CostDriver::Cplx);
/// assert_eq!(CostDriver::ALL.len(), 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CostDriver {
    /// Required software reliability
    Rely,
    /// Database size
    Data,
    /// Product complexity
    Cplx,
    /// Execution time constraint
    Time,
    /// Main storage constraint
    Stor,
    /// Virtual machine volatility
    Virt,
    /// Computer turnaround time
    Turn,
    /// Analyst capability
    Acap,
    /// Applications experience
    Aexp,
    /// Programmer capability
    Pcap,
    /// Virtual machine experience
    Vexp,
    /// Programming language experience
    Lexp,
    /// Use of modern programming practices
    Modp,
    /// Use of software tools
    Tool,
    /// Required development schedule
    Sced,
}

impl CostDriver {
    /// Every driver, in dataset column order.
    pub const ALL: [Self; 15] = [
        Self::Rely,
        Self::Data,
        Self::Cplx,
        Self::Time,
        Self::Stor,
        Self::Virt,
        Self::Turn,
        Self::Acap,
        Self::Aexp,
        Self::Pcap,
        Self::Vexp,
        Self::Lexp,
        Self::Modp,
        Self::Tool,
        Self::Sced,
    ];

    /// The dataset column name for this driver.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Rely => "RELY",
            Self::Data => "DATA",
            Self::Cplx => "CPLX",
            Self::Time => "TIME",
            Self::Stor => "STOR",
            Self::Virt => "VIRT",
            Self::Turn => "TURN",
            Self::Acap => "ACAP",
            Self::Aexp => "AEXP",
            Self::Pcap => "PCAP",
            Self::Vexp => "VEXP",
            Self::Lexp => "LEXP",
            Self::Modp => "MODP",
            Self::Tool => "TOOL",
            Self::Sced => "SCED",
        }
    }

    /// Looks a driver up by its column name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for CostDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when a string names no known cost driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown cost driver: {0}")]
pub struct UnknownCostDriver(pub String);

impl FromStr for CostDriver {
    type Err = UnknownCostDriver;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownCostDriver(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_drivers_distinct() {
        for (i, a) in CostDriver::ALL.iter().enumerate() {
            for b in &CostDriver::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_driver_name_round_trip() {
        for driver in CostDriver::ALL {
            assert_eq!(CostDriver::from_name(driver.name()), Some(driver));
        }
    }

    #[test]
    fn test_driver_from_name_case_insensitive() {
        assert_eq!(CostDriver::from_name("rely"), Some(CostDriver::Rely));
        assert_eq!(CostDriver::from_name("Sced"), Some(CostDriver::Sced));
        assert_eq!(CostDriver::from_name("nope"), None);
    }

    #[test]
    fn test_driver_from_str() {
        let driver: CostDriver = "TOOL".parse().unwrap();
        assert_eq!(driver, CostDriver::Tool);

        let err = "TYPO".parse::<CostDriver>().unwrap_err();
        assert!(err.to_string().contains("TYPO"));
    }

    #[test]
    fn test_driver_serialization_matches_column_names() {
        let json = serde_json::to_string(&CostDriver::Rely).unwrap();
        assert_eq!(json, "\"RELY\"");

        let driver: CostDriver = serde_json::from_str("\"CPLX\"").unwrap();
        assert_eq!(driver, CostDriver::Cplx);
    }

    #[test]
    fn test_rating_scale_bounds() {
        assert!(RATING_SCALE_MIN < RATING_SCALE_MAX);
        assert_eq!(RATING_SCALE_MAX - RATING_SCALE_MIN, 5.0);
    }
}
