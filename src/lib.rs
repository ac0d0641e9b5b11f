//! # Kindred - Effort Estimation by Analogy
//!
//! Kindred estimates the effort of a new software project by case-based
//! reasoning: it compares the new project's cost-driver profile against a
//! database of completed projects, keeps the ones that are similar
//! enough, and derives the estimate as a similarity-weighted aggregate of
//! their recorded efforts.
//!
//! ## Core Concepts
//!
//! - **CostDriver**: one of the fixed ordinal attributes (reliability,
//!   complexity, experience, ...) used for analogy matching
//! - **ProjectRecord / ProjectDatabase**: the completed projects the
//!   estimator learns from
//! - **ProjectProfile**: the new project's ratings, i.e. the query
//! - **Similarity**: how alike two profiles are; retained records must
//!   strictly exceed a configurable threshold
//! - **EffortUnit**: person-hours/days/months/years, interconvertible via
//!   fixed factors
//!
//! ## Usage
//!
//! ```rust
//! use kindred::{
//!     AnalogyEstimator, CostDriver, EffortUnit, ProjectDatabase, ProjectProfile, ProjectRecord,
//! };
//!
//! let database = ProjectDatabase::from_records([
//!     ProjectRecord::new("mis-4", 46.2, 100.0).with_all(2),
//!     ProjectRecord::new("sci-1", 21.0, 200.0).with_all(2),
//! ])?;
//!
//! let profile = ProjectProfile::new().with_all(2).with(CostDriver::Rely, 2);
//!
//! let estimator = AnalogyEstimator::new().with_threshold(0.6);
//! let estimate = estimator.estimate_effort(&database, &profile, EffortUnit::Hours)?;
//!
//! assert_eq!(estimate.rounded(), 108_000);
//! # Ok::<(), kindred::KindredError>(())
//! ```
//!
//! Loading the historical dataset into a [`ProjectDatabase`] and
//! presenting the result are the caller's side of the boundary; the
//! library is pure in-memory computation and is safe to share across
//! threads: one read-only database can serve concurrent estimations.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod convert;
pub mod driver;
pub mod error;
pub mod estimator;
pub mod profile;
pub mod record;
pub mod similarity;
pub mod value;

// Re-export primary types at crate root for convenience
pub use convert::EffortUnit;
pub use driver::{CostDriver, UnknownCostDriver, RATING_SCALE_MAX, RATING_SCALE_MIN};
pub use error::{DatabaseError, EstimationError, KindredError, KindredResult, ScoringIssue};
pub use estimator::{
    AnalogyEstimator, EffortEstimate, Estimate, MalformedValuePolicy, NormalizationPolicy,
};
pub use profile::ProjectProfile;
pub use record::{ProjectDatabase, ProjectId, ProjectRecord};
pub use similarity::{distance, SimilarProject, Similarity, SimilarityResult};
pub use value::{AttributeValue, UnsupportedJsonValue};
