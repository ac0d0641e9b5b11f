//! The profile of the project being estimated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::driver::CostDriver;
use crate::value::AttributeValue;

/// Cost-driver ratings for a new, not-yet-built project.
///
/// This is the query side of an estimation call: just the ratings, with
/// no size or effort, since those are the unknowns being computed. Only
/// the drivers present here take part in the comparison.
///
/// # Examples
///
/// ```
/// use kindred::{CostDriver, ProjectProfile};
///
/// let profile = ProjectProfile::new()
///     .with(CostDriver::Rely, 3)
///     .with(CostDriver::Cplx, "high");
/// assert_eq!(profile.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectProfile {
    ratings: BTreeMap<CostDriver, AttributeValue>,
}

impl ProjectProfile {
    /// Creates an empty profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one driver rating, builder style.
    #[must_use]
    pub fn with(mut self, driver: CostDriver, value: impl Into<AttributeValue>) -> Self {
        self.ratings.insert(driver, value.into());
        self
    }

    /// Sets every driver to the same rating.
    #[must_use]
    pub fn with_all(mut self, value: impl Into<AttributeValue>) -> Self {
        let value = value.into();
        for driver in CostDriver::ALL {
            self.ratings.insert(driver, value.clone());
        }
        self
    }

    /// The rating for one driver, if present.
    #[must_use]
    pub fn get(&self, driver: CostDriver) -> Option<&AttributeValue> {
        self.ratings.get(&driver)
    }

    /// Number of rated drivers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    /// Returns true if no driver is rated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Returns true if every known driver is rated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        CostDriver::ALL.iter().all(|d| self.ratings.contains_key(d))
    }

    /// Iterates `(driver, rating)` pairs in driver order.
    pub fn iter(&self) -> impl Iterator<Item = (CostDriver, &AttributeValue)> {
        self.ratings.iter().map(|(d, v)| (*d, v))
    }
}

impl From<BTreeMap<CostDriver, AttributeValue>> for ProjectProfile {
    fn from(ratings: BTreeMap<CostDriver, AttributeValue>) -> Self {
        Self { ratings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_builder() {
        let profile = ProjectProfile::new()
            .with(CostDriver::Rely, 3)
            .with(CostDriver::Cplx, 4);

        assert_eq!(profile.len(), 2);
        assert_eq!(
            profile.get(CostDriver::Rely),
            Some(&AttributeValue::Int(3))
        );
        assert!(profile.get(CostDriver::Sced).is_none());
    }

    #[test]
    fn test_profile_with_all() {
        let profile = ProjectProfile::new().with_all(2);
        assert!(profile.is_complete());
        assert_eq!(profile.len(), CostDriver::ALL.len());
    }

    #[test]
    fn test_profile_empty() {
        let profile = ProjectProfile::new();
        assert!(profile.is_empty());
        assert!(!profile.is_complete());
    }

    #[test]
    fn test_profile_overwrites_rating() {
        let profile = ProjectProfile::new()
            .with(CostDriver::Rely, 1)
            .with(CostDriver::Rely, 5);
        assert_eq!(profile.len(), 1);
        assert_eq!(
            profile.get(CostDriver::Rely),
            Some(&AttributeValue::Int(5))
        );
    }

    #[test]
    fn test_profile_deserializes_from_column_map() {
        let json = r#"{ "RELY": 3, "CPLX": "very_high" }"#;
        let profile: ProjectProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.len(), 2);
        assert_eq!(
            profile.get(CostDriver::Cplx).unwrap().as_ordinal(),
            Some(4.0)
        );
    }
}
