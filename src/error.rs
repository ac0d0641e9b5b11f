//! Error types for kindred.
//!
//! All errors are strongly typed using thiserror. Per-record data
//! problems during a similarity sweep are diagnostics, not propagated
//! errors: one bad historical record never aborts the sweep, and the
//! unaffected records are still scored. Only an empty similarity set is
//! an estimate-level failure.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::driver::CostDriver;
use crate::record::ProjectId;

/// Errors raised while assembling a historical project database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("duplicate project id: {id}")]
    DuplicateProjectId {
        id: ProjectId,
    },

    #[error("project {id} is missing {} cost driver(s): {missing:?}", missing.len())]
    IncompleteRecord {
        id: ProjectId,
        missing: Vec<CostDriver>,
    },
}

/// Why a single historical record could not be scored.
///
/// Issues are local to one record: they are collected alongside the
/// similarity result for explainability and never abort the sweep.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ScoringIssue {
    /// A compared driver's value had no numeric interpretation.
    #[error("driver {driver} has malformed value {raw:?}")]
    MalformedAttributeValue {
        /// The driver whose value failed to parse.
        driver: CostDriver,
        /// The offending raw value, as text.
        raw: String,
    },

    /// No driver in the profile could be compared against this record.
    #[error("no comparable cost drivers")]
    NoComparableAttributes,
}

/// Errors raised while aggregating retained efforts into an estimate.
#[derive(Debug, Error)]
pub enum EstimationError {
    /// No historical project scored above the similarity threshold.
    ///
    /// This is the "no estimate available" outcome: the aggregate of an
    /// empty set is undefined, and reporting it explicitly beats letting
    /// the arithmetic produce NaN a caller might round into a number.
    #[error("no project exceeded similarity threshold {threshold} ({evaluated} evaluated)")]
    NoSimilarProjects {
        threshold: f64,
        evaluated: usize,
    },

    /// The retained similarity weights sum to zero or less, so the
    /// weighted mean is undefined. Only reachable under
    /// total-weight normalization with a non-positive threshold.
    #[error("retained similarity weights sum to zero ({retained} project(s) retained)")]
    ZeroSimilarityWeight {
        retained: usize,
    },
}

/// Top-level error type for kindred.
#[derive(Debug, Error)]
pub enum KindredError {
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("estimation error: {0}")]
    Estimation(#[from] EstimationError),
}

impl KindredError {
    /// Returns true if this is a database construction error.
    #[must_use]
    pub const fn is_database(&self) -> bool {
        matches!(self, Self::Database(_))
    }

    /// Returns true if this is an estimation error.
    #[must_use]
    pub const fn is_estimation(&self) -> bool {
        matches!(self, Self::Estimation(_))
    }

    /// Returns true if this error means "no estimate available" rather
    /// than a malformed input.
    #[must_use]
    pub const fn is_no_estimate(&self) -> bool {
        matches!(
            self,
            Self::Estimation(EstimationError::NoSimilarProjects { .. })
        )
    }
}

/// Result type alias for kindred operations.
pub type KindredResult<T> = Result<T, KindredError>;
