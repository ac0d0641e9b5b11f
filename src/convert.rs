//! Person-time unit conversion.
//!
//! All conversions pivot through hours with fixed factors: 24 hours per
//! day, 720 hours per month, 262,800 hours per year (365 days of 24
//! hours, a deliberate domain simplification rather than a
//! calendar-accurate figure). Pure arithmetic over well-typed input: no
//! error states, and no range validation; vetting the value is the
//! caller's job.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hours in one person-day.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Hours in one person-month.
pub const HOURS_PER_MONTH: f64 = 720.0;

/// Hours in one person-year (365 days x 24 hours).
pub const HOURS_PER_YEAR: f64 = 262_800.0;

/// Resolution an effort value is expressed in.
///
/// # Examples
///
/// ```
/// use kindred::convert::{self, EffortUnit};
///
/// assert_eq!(convert::to_hours(EffortUnit::Months, 150.0), 108_000.0);
/// assert_eq!(convert::to_months(EffortUnit::Hours, 720.0), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffortUnit {
    /// Person-hours.
    Hours,
    /// Person-days.
    Days,
    /// Person-months.
    Months,
    /// Person-years.
    Years,
}

impl EffortUnit {
    /// Hours in one unit of this resolution.
    #[must_use]
    pub const fn hours_factor(self) -> f64 {
        match self {
            Self::Hours => 1.0,
            Self::Days => HOURS_PER_DAY,
            Self::Months => HOURS_PER_MONTH,
            Self::Years => HOURS_PER_YEAR,
        }
    }
}

impl fmt::Display for EffortUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hours => write!(f, "person-hours"),
            Self::Days => write!(f, "person-days"),
            Self::Months => write!(f, "person-months"),
            Self::Years => write!(f, "person-years"),
        }
    }
}

/// Normalizes a value into hours.
#[must_use]
pub fn to_hours(unit: EffortUnit, value: f64) -> f64 {
    value * unit.hours_factor()
}

/// Converts a value into person-days.
#[must_use]
pub fn to_days(unit: EffortUnit, value: f64) -> f64 {
    to_hours(unit, value) / HOURS_PER_DAY
}

/// Converts a value into person-months.
#[must_use]
pub fn to_months(unit: EffortUnit, value: f64) -> f64 {
    to_hours(unit, value) / HOURS_PER_MONTH
}

/// Converts a value into person-years.
#[must_use]
pub fn to_years(unit: EffortUnit, value: f64) -> f64 {
    to_hours(unit, value) / HOURS_PER_YEAR
}

/// Converts a value between any two units, pivoting through hours.
#[must_use]
pub fn convert(value: f64, from: EffortUnit, to: EffortUnit) -> f64 {
    to_hours(from, value) / to.hours_factor()
}
