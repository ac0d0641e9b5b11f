//! Historical project records and the database that holds them.
//!
//! A record is a completed project: its cost-driver ratings, its size,
//! and its recorded actual effort, the ground truth the estimator
//! learns from. Records are immutable once the database is built, and
//! the database is read-only from the estimator's perspective, so one
//! instance is safely shared across concurrent estimation calls.
//! Similarity scores are never written back onto a record; the
//! comparison phase returns them in a side structure instead.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::driver::CostDriver;
use crate::error::DatabaseError;
use crate::value::AttributeValue;

/// Stable identifier of a historical project, assigned at ingestion.
///
/// Ids come from the external loader (typically the dataset's row keys),
/// which is why this wraps the loader's string rather than generating
/// anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ProjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A completed, historical project.
///
/// `size` and `effort` are data fields, not comparison dimensions: the
/// similarity metric only ever looks at `attributes`. Keeping them as
/// typed fields (instead of two more entries in the attribute map, as
/// the flat dataset stores them) makes that exclusion structural.
///
/// # Examples
///
/// ```
/// use kindred::{CostDriver, ProjectRecord};
///
/// let record = ProjectRecord::new("p1", 46.2, 278.0)
///     .with(CostDriver::Rely, 2)
///     .with(CostDriver::Cplx, 4);
/// assert_eq!(record.effort, 278.0);
/// assert!(!record.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Unique, stable identifier.
    pub id: ProjectId,

    /// Cost-driver ratings, keyed by driver.
    pub attributes: BTreeMap<CostDriver, AttributeValue>,

    /// Project size in thousand lines of code. Stored, never compared.
    pub size: f64,

    /// Recorded actual effort, in person-months.
    pub effort: f64,
}

impl ProjectRecord {
    /// Creates a record with an empty attribute map.
    #[must_use]
    pub fn new(id: impl Into<ProjectId>, size: f64, effort: f64) -> Self {
        Self {
            id: id.into(),
            attributes: BTreeMap::new(),
            size,
            effort,
        }
    }

    /// Sets one driver rating, builder style.
    #[must_use]
    pub fn with(mut self, driver: CostDriver, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(driver, value.into());
        self
    }

    /// Sets every driver to the same rating. Mostly useful in tests and
    /// synthetic fixtures.
    #[must_use]
    pub fn with_all(mut self, value: impl Into<AttributeValue>) -> Self {
        let value = value.into();
        for driver in CostDriver::ALL {
            self.attributes.insert(driver, value.clone());
        }
        self
    }

    /// Returns true if every known cost driver has a rating.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_drivers().is_empty()
    }

    /// The drivers this record has no rating for.
    #[must_use]
    pub fn missing_drivers(&self) -> Vec<CostDriver> {
        CostDriver::ALL
            .iter()
            .copied()
            .filter(|d| !self.attributes.contains_key(d))
            .collect()
    }
}

/// An ordered, read-only collection of historical projects.
///
/// Invariant: no duplicate ids. Iteration order is the id order, which
/// keeps sweeps and reports deterministic (the scoring itself is
/// order-independent).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectDatabase {
    records: BTreeMap<ProjectId, ProjectRecord>,
}

impl ProjectDatabase {
    /// Creates an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a database from an iterator of records.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DuplicateProjectId` if two records share
    /// an id.
    pub fn from_records(
        records: impl IntoIterator<Item = ProjectRecord>,
    ) -> Result<Self, DatabaseError> {
        let mut db = Self::new();
        for record in records {
            db.insert(record)?;
        }
        Ok(db)
    }

    /// Inserts one record.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DuplicateProjectId` if a record with the
    /// same id is already present.
    pub fn insert(&mut self, record: ProjectRecord) -> Result<(), DatabaseError> {
        if self.records.contains_key(&record.id) {
            return Err(DatabaseError::DuplicateProjectId {
                id: record.id.clone(),
            });
        }
        self.records.insert(record.id.clone(), record);
        Ok(())
    }

    /// Checks that every record carries the full driver set.
    ///
    /// The similarity sweep tolerates missing drivers (they drop out of
    /// the comparison denominator), so this check is opt-in for loaders
    /// that want to enforce the stricter data contract up front.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::IncompleteRecord` for the first record
    /// with missing drivers.
    pub fn validate_complete(&self) -> Result<(), DatabaseError> {
        for record in self.records.values() {
            let missing = record.missing_drivers();
            if !missing.is_empty() {
                return Err(DatabaseError::IncompleteRecord {
                    id: record.id.clone(),
                    missing,
                });
            }
        }
        Ok(())
    }

    /// Looks a record up by id.
    #[must_use]
    pub fn get(&self, id: &ProjectId) -> Option<&ProjectRecord> {
        self.records.get(id)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the database holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates records in id order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectRecord> {
        self.records.values()
    }

    /// The underlying id-ordered map.
    #[must_use]
    pub fn records(&self) -> &BTreeMap<ProjectId, ProjectRecord> {
        &self.records
    }
}
