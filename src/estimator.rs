//! The analogy estimation pipeline.
//!
//! Three phases: score every historical record against the new
//! project's profile, keep the ones above the similarity threshold,
//! then aggregate their recorded efforts into a single estimate. The
//! phases are public individually, so callers that want to show *why* an
//! estimate came out the way it did can inspect the retained set;
//! `estimate_effort` runs the whole chain including unit conversion.
//!
//! Scoring is stateless per call and record-independent, so the sweep
//! runs in parallel; the database is only ever read.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::convert::{self, EffortUnit};
use crate::driver::{CostDriver, RATING_SCALE_MAX, RATING_SCALE_MIN};
use crate::error::{EstimationError, ScoringIssue};
use crate::profile::ProjectProfile;
use crate::record::{ProjectDatabase, ProjectRecord};
use crate::similarity::{distance, SimilarProject, Similarity, SimilarityResult};

/// How the similarity-weighted effort sum is normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationPolicy {
    /// Divide by the number of retained projects.
    ///
    /// This is the historical rule this estimator reproduces. It is not
    /// a standard weighted average: with similarities below 1 the
    /// estimate lands below the plain mean of the retained efforts.
    #[default]
    SimilarProjectCount,

    /// Divide by the sum of the retained similarity scores, which is
    /// the classical weighted mean.
    TotalSimilarityWeight,
}

/// What to do when a compared value has no numeric interpretation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedValuePolicy {
    /// Drop that driver from both the distance sum and the attribute
    /// count for the affected record; keep scoring the rest.
    #[default]
    SkipAttribute,

    /// Exclude the affected record from scoring entirely.
    SkipRecord,
}

/// An effort value together with the unit it is expressed in.
///
/// The unrounded value is kept so a chained unit conversion does not
/// compound rounding error; `rounded` is presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffortEstimate {
    /// The unrounded effort value.
    pub value: f64,

    /// The unit `value` is expressed in.
    pub unit: EffortUnit,
}

impl EffortEstimate {
    /// The estimate re-expressed in another unit, unrounded.
    #[must_use]
    pub fn convert_to(&self, unit: EffortUnit) -> Self {
        Self {
            value: convert::convert(self.value, self.unit, unit),
            unit,
        }
    }

    /// The estimate rounded to the nearest whole unit.
    #[must_use]
    pub fn rounded(&self) -> i64 {
        self.value.round() as i64
    }
}

impl std::fmt::Display for EffortEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.rounded(), self.unit)
    }
}

/// The end-to-end output of an estimation call.
///
/// Carries the converted effort figure plus the retained similarity set
/// so a front-end can show which historical projects backed the number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Estimate {
    /// The estimated effort in the caller's requested unit.
    pub effort: EffortEstimate,

    /// The historical projects the estimate was derived from.
    pub similar: SimilarityResult,
}

impl Estimate {
    /// The rounded effort figure in the requested unit.
    #[must_use]
    pub fn rounded(&self) -> i64 {
        self.effort.rounded()
    }
}

/// Case-based effort estimator.
///
/// Holds configuration only: the threshold and the two named policies.
/// The database is passed per call and never mutated, so one estimator
/// and one database can serve any number of concurrent callers.
///
/// # Examples
///
/// ```
/// use kindred::{AnalogyEstimator, EffortUnit, ProjectDatabase, ProjectProfile, ProjectRecord};
///
/// let db = ProjectDatabase::from_records([
///     ProjectRecord::new("a", 46.0, 100.0).with_all(2),
///     ProjectRecord::new("b", 21.0, 200.0).with_all(2),
/// ])?;
/// let profile = ProjectProfile::new().with_all(2);
///
/// let estimator = AnalogyEstimator::new();
/// let estimate = estimator.estimate_effort(&db, &profile, EffortUnit::Months)?;
/// assert_eq!(estimate.rounded(), 150);
/// # Ok::<(), kindred::KindredError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalogyEstimator {
    threshold: f64,
    normalization: NormalizationPolicy,
    malformed: MalformedValuePolicy,
}

impl Default for AnalogyEstimator {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
            normalization: NormalizationPolicy::default(),
            malformed: MalformedValuePolicy::default(),
        }
    }
}

impl AnalogyEstimator {
    /// Similarity threshold used when the caller does not pick one.
    pub const DEFAULT_THRESHOLD: f64 = 0.5;

    /// Creates an estimator with the default threshold and policies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the similarity threshold. Retention is strict: a record
    /// scoring exactly the threshold is excluded.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the aggregation normalization policy.
    #[must_use]
    pub fn with_normalization(mut self, policy: NormalizationPolicy) -> Self {
        self.normalization = policy;
        self
    }

    /// Sets the malformed-value policy.
    #[must_use]
    pub fn with_malformed_policy(mut self, policy: MalformedValuePolicy) -> Self {
        self.malformed = policy;
        self
    }

    /// The configured similarity threshold.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Scores every record in the database against the profile and
    /// retains the ones strictly above the threshold.
    ///
    /// Records are scored independently and in parallel; per-record data
    /// problems are collected as diagnostics and never abort the sweep.
    #[must_use]
    pub fn compute_similarities(
        &self,
        database: &ProjectDatabase,
        profile: &ProjectProfile,
    ) -> SimilarityResult {
        let scored: Vec<_> = database
            .records()
            .par_iter()
            .map(|(id, record)| (id, record, self.score_record(record, profile)))
            .collect();

        let mut result = SimilarityResult {
            evaluated: database.len(),
            ..SimilarityResult::default()
        };
        for (id, record, outcome) in scored {
            match outcome {
                Ok(similarity) if similarity.exceeds(self.threshold) => {
                    result.matches.insert(
                        id.clone(),
                        SimilarProject {
                            record: record.clone(),
                            similarity,
                        },
                    );
                }
                Ok(_) => {}
                Err(issue) => {
                    warn!(project = %id, %issue, "record could not be scored");
                    result.skipped.push((id.clone(), issue));
                }
            }
        }

        debug!(
            evaluated = result.evaluated,
            retained = result.len(),
            skipped = result.skipped.len(),
            threshold = self.threshold,
            "similarity sweep complete"
        );
        result
    }

    /// Scores one record: mean squared driver distance, then
    /// `1 - sqrt(mean)`.
    ///
    /// Only drivers present in the profile are compared; a driver the
    /// record lacks drops out of both the sum and the count. Malformed
    /// values follow the configured policy.
    fn score_record(
        &self,
        record: &ProjectRecord,
        profile: &ProjectProfile,
    ) -> Result<Similarity, ScoringIssue> {
        let mut distance_sum = 0.0;
        let mut compared = 0usize;

        for (driver, profile_value) in profile.iter() {
            let Some(record_value) = record.attributes.get(&driver) else {
                continue;
            };

            let pair = match (profile_value.as_ordinal(), record_value.as_ordinal()) {
                (Some(new), Some(old)) => Some((new, old)),
                (None, _) => {
                    self.handle_malformed(record, driver, &profile_value.to_string())?;
                    None
                }
                (_, None) => {
                    self.handle_malformed(record, driver, &record_value.to_string())?;
                    None
                }
            };

            if let Some((new, old)) = pair {
                distance_sum += distance(new, old, RATING_SCALE_MAX, RATING_SCALE_MIN);
                compared += 1;
            }
        }

        if compared == 0 {
            return Err(ScoringIssue::NoComparableAttributes);
        }
        let mean = distance_sum / compared as f64;
        Ok(Similarity::new(1.0 - mean.sqrt()))
    }

    /// Applies the malformed-value policy to one bad comparison.
    ///
    /// Under `SkipAttribute` this returns `Ok(())` and the caller drops
    /// the driver; under `SkipRecord` it returns the issue, aborting the
    /// record's scoring.
    fn handle_malformed(
        &self,
        record: &ProjectRecord,
        driver: CostDriver,
        raw: &str,
    ) -> Result<(), ScoringIssue> {
        let issue = ScoringIssue::MalformedAttributeValue {
            driver,
            raw: raw.to_string(),
        };
        match self.malformed {
            MalformedValuePolicy::SkipAttribute => {
                debug!(project = %record.id, %issue, "dropping driver from comparison");
                Ok(())
            }
            MalformedValuePolicy::SkipRecord => Err(issue),
        }
    }

    /// Aggregates the retained efforts into one estimate, in the
    /// database's native unit (person-months).
    ///
    /// Each retained effort is weighted by its similarity; the weighted
    /// sum is then normalized per the configured policy.
    ///
    /// # Errors
    ///
    /// Returns `EstimationError::NoSimilarProjects` when the retained
    /// set is empty. That is the no-estimate outcome, never a NaN or a
    /// zero.
    pub fn aggregate_effort(
        &self,
        result: &SimilarityResult,
    ) -> Result<EffortEstimate, EstimationError> {
        if result.is_empty() {
            return Err(EstimationError::NoSimilarProjects {
                threshold: self.threshold,
                evaluated: result.evaluated,
            });
        }

        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        for similar in result.iter() {
            weighted_sum += similar.similarity.value() * similar.record.effort;
            weight_total += similar.similarity.value();
        }

        let denominator = match self.normalization {
            NormalizationPolicy::SimilarProjectCount => result.len() as f64,
            NormalizationPolicy::TotalSimilarityWeight => weight_total,
        };
        if denominator <= 0.0 {
            return Err(EstimationError::ZeroSimilarityWeight {
                retained: result.len(),
            });
        }

        Ok(EffortEstimate {
            value: weighted_sum / denominator,
            unit: EffortUnit::Months,
        })
    }

    /// The full pipeline: score, aggregate, convert to the requested
    /// unit. Rounding happens after conversion, on presentation.
    ///
    /// # Errors
    ///
    /// Returns `EstimationError::NoSimilarProjects` when no historical
    /// project is similar enough.
    pub fn estimate_effort(
        &self,
        database: &ProjectDatabase,
        profile: &ProjectProfile,
        unit: EffortUnit,
    ) -> Result<Estimate, EstimationError> {
        let similar = self.compute_similarities(database, profile);
        let effort = self.aggregate_effort(&similar)?.convert_to(unit);
        debug!(%effort, retained = similar.len(), "estimate ready");
        Ok(Estimate { effort, similar })
    }
}
