//! Attribute values as they arrive from a historical dataset.
//!
//! Driver ratings reach the estimator in whatever shape the external
//! loader produced: integers, floats, numeric strings, or qualitative
//! level names ("nominal", "very_high", ...). The numeric interpretation
//! happens on demand at comparison time; a value that has no numeric
//! interpretation is a data error handled by the estimator's configured
//! policy, never a silent zero.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A cost-driver rating as supplied by the loader.
///
/// # Examples
///
/// ```
/// use kindred::AttributeValue;
///
/// assert_eq!(AttributeValue::from(3).as_ordinal(), Some(3.0));
/// assert_eq!(AttributeValue::from("4").as_ordinal(), Some(4.0));
/// assert_eq!(AttributeValue::from("nominal").as_ordinal(), Some(2.0));
/// assert_eq!(AttributeValue::from("n/a").as_ordinal(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// An integral rating.
    Int(i64),
    /// A fractional rating.
    Float(f64),
    /// A textual rating: a numeric string or a qualitative level name.
    Text(String),
}

impl AttributeValue {
    pub const fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// The numeric rating this value represents, if it has one.
    ///
    /// Text values are tried first as a qualitative level name, then as a
    /// plain number. `None` marks the value malformed for comparison
    /// purposes; the estimator decides what that means per its policy.
    #[must_use]
    pub fn as_ordinal(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Text(s) => {
                let trimmed = s.trim();
                rating_level(trimmed).or_else(|| trimmed.parse::<f64>().ok())
            }
        }
    }
}

/// Maps a qualitative level name onto the ordinal rating scale.
///
/// The six classic levels span the scale end to end: `very_low` is the
/// scale minimum, `extra_high` the maximum. Space and hyphen spellings
/// are accepted alongside the underscore form.
fn rating_level(name: &str) -> Option<f64> {
    let normalized = name.to_ascii_lowercase().replace([' ', '-'], "_");
    match normalized.as_str() {
        "very_low" => Some(0.0),
        "low" => Some(1.0),
        "nominal" => Some(2.0),
        "high" => Some(3.0),
        "very_high" => Some(4.0),
        "extra_high" => Some(5.0),
        _ => None,
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for AttributeValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Error returned when a JSON value has no rating representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("JSON value {0} cannot be used as a driver rating")]
pub struct UnsupportedJsonValue(pub String);

impl TryFrom<&serde_json::Value> for AttributeValue {
    type Error = UnsupportedJsonValue;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Self::Float(f))
                } else {
                    Err(UnsupportedJsonValue(value.to_string()))
                }
            }
            serde_json::Value::String(s) => Ok(Self::Text(s.clone())),
            other => Err(UnsupportedJsonValue(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_from_int() {
        assert_eq!(AttributeValue::Int(4).as_ordinal(), Some(4.0));
    }

    #[test]
    fn test_ordinal_from_float() {
        assert_eq!(AttributeValue::Float(2.5).as_ordinal(), Some(2.5));
    }

    #[test]
    fn test_ordinal_from_numeric_text() {
        assert_eq!(AttributeValue::from("3").as_ordinal(), Some(3.0));
        assert_eq!(AttributeValue::from(" 2 ").as_ordinal(), Some(2.0));
    }

    #[test]
    fn test_ordinal_from_level_names() {
        assert_eq!(AttributeValue::from("very_low").as_ordinal(), Some(0.0));
        assert_eq!(AttributeValue::from("low").as_ordinal(), Some(1.0));
        assert_eq!(AttributeValue::from("nominal").as_ordinal(), Some(2.0));
        assert_eq!(AttributeValue::from("high").as_ordinal(), Some(3.0));
        assert_eq!(AttributeValue::from("very_high").as_ordinal(), Some(4.0));
        assert_eq!(AttributeValue::from("extra_high").as_ordinal(), Some(5.0));
    }

    #[test]
    fn test_ordinal_level_name_spellings() {
        assert_eq!(AttributeValue::from("Very High").as_ordinal(), Some(4.0));
        assert_eq!(AttributeValue::from("extra-high").as_ordinal(), Some(5.0));
    }

    #[test]
    fn test_ordinal_malformed() {
        assert_eq!(AttributeValue::from("n/a").as_ordinal(), None);
        assert_eq!(AttributeValue::from("").as_ordinal(), None);
    }

    #[test]
    fn test_type_predicates() {
        assert!(AttributeValue::Int(1).is_int());
        assert!(AttributeValue::Float(1.0).is_float());
        assert!(AttributeValue::from("x").is_text());
    }

    #[test]
    fn test_from_json_number() {
        let v = serde_json::json!(3);
        assert_eq!(AttributeValue::try_from(&v).unwrap(), AttributeValue::Int(3));

        let v = serde_json::json!(2.5);
        assert_eq!(
            AttributeValue::try_from(&v).unwrap(),
            AttributeValue::Float(2.5)
        );
    }

    #[test]
    fn test_from_json_string() {
        let v = serde_json::json!("nominal");
        assert_eq!(
            AttributeValue::try_from(&v).unwrap().as_ordinal(),
            Some(2.0)
        );
    }

    #[test]
    fn test_from_json_unsupported() {
        let v = serde_json::json!({ "nested": true });
        assert!(AttributeValue::try_from(&v).is_err());
        let v = serde_json::json!(null);
        assert!(AttributeValue::try_from(&v).is_err());
    }

    #[test]
    fn test_untagged_deserialization() {
        let v: AttributeValue = serde_json::from_str("3").unwrap();
        assert_eq!(v, AttributeValue::Int(3));

        let v: AttributeValue = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(v.as_ordinal(), Some(3.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(AttributeValue::Int(2).to_string(), "2");
        assert_eq!(AttributeValue::from("nominal").to_string(), "nominal");
    }
}
