//! Similarity scores and the comparison-phase output.
//!
//! Similarity between two projects is derived from the mean of their
//! per-driver squared distances: identical profiles score exactly 1,
//! and very dissimilar ones drift toward (and past) 0. Negative scores
//! are valid; they simply never pass a positive threshold.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ScoringIssue;
use crate::record::{ProjectId, ProjectRecord};

/// Per-attribute normalized squared distance.
///
/// `((|v1 - v2|) / (max - min))²`: the absolute difference scaled by
/// the attribute's range, then squared, so on-scale inputs contribute a
/// value in `[0, 1]`.
#[must_use]
pub fn distance(v1: f64, v2: f64, max: f64, min: f64) -> f64 {
    let scaled = (v1 - v2).abs() / (max - min);
    scaled * scaled
}

/// How alike two project profiles are.
///
/// 1 means identical on every compared driver. The score has no hard
/// lower bound: off-scale ratings can push it below 0.
///
/// # Examples
///
/// ```
/// use kindred::Similarity;
///
/// let s = Similarity::new(0.82);
/// assert!(s.exceeds(0.5));
/// assert!(!s.exceeds(0.82)); // strictly greater, never equal
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Similarity(f64);

impl Similarity {
    /// Score of two identical profiles.
    pub const EXACT: Self = Self(1.0);

    /// Wraps a raw score.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// The raw score.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Strict threshold gate: true only if the score is strictly above
    /// `threshold`. A score exactly at the threshold is excluded.
    #[must_use]
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.0 > threshold
    }
}

impl fmt::Display for Similarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<Similarity> for f64 {
    fn from(s: Similarity) -> Self {
        s.0
    }
}

/// One retained historical project with its score.
///
/// Owns a copy of the record: the canonical database record is never
/// annotated in place, which keeps the database shareable across
/// concurrent estimation calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarProject {
    /// The historical record that passed the threshold.
    pub record: ProjectRecord,

    /// Its similarity to the queried profile.
    pub similarity: Similarity,
}

/// Output of the comparison phase.
///
/// The retained projects in id order, plus sweep diagnostics: how many
/// records were evaluated and which ones could not be scored. An empty
/// result is a valid state; it means no historical project was similar
/// enough, which the aggregation phase reports as its own outcome.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// Projects whose similarity exceeded the threshold, keyed by id.
    pub matches: BTreeMap<ProjectId, SimilarProject>,

    /// Number of records the sweep looked at.
    pub evaluated: usize,

    /// Records that could not be scored, with the reason each.
    pub skipped: Vec<(ProjectId, ScoringIssue)>,
}

impl SimilarityResult {
    /// Number of retained projects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Returns true if no project passed the threshold.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// The retained entry for one project, if it passed.
    #[must_use]
    pub fn get(&self, id: &ProjectId) -> Option<&SimilarProject> {
        self.matches.get(id)
    }

    /// Iterates retained projects in id order.
    pub fn iter(&self) -> impl Iterator<Item = &SimilarProject> {
        self.matches.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::driver::{RATING_SCALE_MAX, RATING_SCALE_MIN};

    #[test]
    fn test_distance_identical_values() {
        assert_eq!(distance(3.0, 3.0, RATING_SCALE_MAX, RATING_SCALE_MIN), 0.0);
    }

    #[test]
    fn test_distance_full_range() {
        assert_eq!(distance(0.0, 5.0, RATING_SCALE_MAX, RATING_SCALE_MIN), 1.0);
        assert_eq!(distance(5.0, 0.0, RATING_SCALE_MAX, RATING_SCALE_MIN), 1.0);
    }

    #[test]
    fn test_distance_intermediate() {
        // |2 - 4| / 5 = 0.4, squared = 0.16
        let d = distance(2.0, 4.0, RATING_SCALE_MAX, RATING_SCALE_MIN);
        assert!((d - 0.16).abs() < 1e-12);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = distance(1.0, 4.0, RATING_SCALE_MAX, RATING_SCALE_MIN);
        let b = distance(4.0, 1.0, RATING_SCALE_MAX, RATING_SCALE_MIN);
        assert_eq!(a, b);
    }

    #[test]
    fn test_distance_bounded_on_scale() {
        for v1 in 0..=5 {
            for v2 in 0..=5 {
                let d = distance(
                    f64::from(v1),
                    f64::from(v2),
                    RATING_SCALE_MAX,
                    RATING_SCALE_MIN,
                );
                assert!((0.0..=1.0).contains(&d), "distance({v1}, {v2}) = {d}");
            }
        }
    }

    #[test]
    fn test_similarity_exceeds_is_strict() {
        let s = Similarity::new(0.5);
        assert!(!s.exceeds(0.5));
        assert!(Similarity::new(0.5 + 1e-9).exceeds(0.5));
        assert!(s.exceeds(0.49));
    }

    #[test]
    fn test_similarity_negative_is_representable() {
        let s = Similarity::new(-0.3);
        assert!(s.value() < 0.0);
        assert!(!s.exceeds(0.0));
    }

    #[test]
    fn test_similarity_exact() {
        assert_eq!(Similarity::EXACT.value(), 1.0);
        assert!(Similarity::EXACT.exceeds(0.999));
    }

    #[test]
    fn test_similarity_display() {
        assert_eq!(Similarity::new(0.75).to_string(), "0.750");
    }

    #[test]
    fn test_empty_result() {
        let result = SimilarityResult::default();
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
        assert!(result.get(&ProjectId::from("p1")).is_none());
    }

    #[test]
    fn test_result_serialization() {
        let mut result = SimilarityResult {
            evaluated: 1,
            ..Default::default()
        };
        result.matches.insert(
            ProjectId::from("p1"),
            SimilarProject {
                record: ProjectRecord::new("p1", 10.0, 100.0),
                similarity: Similarity::EXACT,
            },
        );

        let json = serde_json::to_string(&result).unwrap();
        let back: SimilarityResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back.evaluated, 1);
    }
}
