// SPDX-License-Identifier: MIT OR Apache-2.0
//! Runtime values stored in node data maps and carried over data edges.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name-keyed value map, insertion-ordered.
///
/// Used for a node's `data` bag and for resolved evaluator inputs/outputs.
pub type ValueMap = IndexMap<String, Value>;

/// A 3-component vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Vec3 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Vec3 {
    /// The zero vector, used as the default for absent vector inputs.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    /// Create a vector from components.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Dot product with another vector.
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Euclidean norm.
    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }
}

/// A dynamically-typed value.
///
/// This is the uniform currency of the graph: user-edited defaults,
/// evaluator inputs, and computed outputs are all `Value`s keyed by port
/// name. Serialized untagged so snapshots stay plain structural JSON.
///
/// Variant order matters for untagged deserialization: an object with
/// exactly `x`/`y`/`z` fields parses as [`Value::Vector3`], anything else
/// falls through to [`Value::Object`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean
    Bool(bool),
    /// Number (all numerics are f64)
    Number(f64),
    /// Text
    Text(String),
    /// 3-component vector
    Vector3(Vec3),
    /// Structural value (name-keyed)
    Object(IndexMap<String, Value>),
}

impl Value {
    /// Numeric cast.
    ///
    /// Booleans cast to 0/1, text is parsed, everything else is NaN.
    pub fn as_number(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
            Self::Vector3(_) | Self::Object(_) => f64::NAN,
        }
    }

    /// Vector cast: the zero vector unless this is a `Vector3`.
    pub fn as_vec3(&self) -> Vec3 {
        match self {
            Self::Vector3(v) => *v,
            _ => Vec3::ZERO,
        }
    }

    /// Whether this is a structural value (vector or object).
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Vector3(_) | Self::Object(_))
    }
}

impl fmt::Display for Value {
    /// Human-readable rendering: numbers without a trailing `.0`,
    /// structural values as their JSON serialization.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Vector3(_) | Self::Object(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Vec3> for Value {
    fn from(v: Vec3) -> Self {
        Self::Vector3(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_cast() {
        assert_eq!(Value::Number(2.5).as_number(), 2.5);
        assert_eq!(Value::Bool(true).as_number(), 1.0);
        assert_eq!(Value::Bool(false).as_number(), 0.0);
        assert_eq!(Value::Text("3.5".into()).as_number(), 3.5);
        assert!(Value::Text("not a number".into()).as_number().is_nan());
        assert!(Value::Vector3(Vec3::ZERO).as_number().is_nan());
    }

    #[test]
    fn test_vector_cast_defaults_to_zero() {
        let v = Value::Vector3(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(v.as_vec3(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(Value::Number(7.0).as_vec3(), Vec3::ZERO);
        assert_eq!(Value::Text("x".into()).as_vec3(), Vec3::ZERO);
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(Value::Number(5.0).to_string(), "5");
        assert_eq!(Value::Number(3.25).to_string(), "3.25");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Text("hi".into()).to_string(), "hi");
        assert_eq!(
            Value::Vector3(Vec3::new(1.0, 2.0, 3.0)).to_string(),
            r#"{"x":1.0,"y":2.0,"z":3.0}"#
        );
    }

    #[test]
    fn test_untagged_round_trip() {
        let json = r#"{"x":1.0,"y":2.0,"z":3.0}"#;
        let v: Value = serde_json::from_str(json).unwrap();
        assert_eq!(v, Value::Vector3(Vec3::new(1.0, 2.0, 3.0)));

        // An object that is not exactly x/y/z stays structural.
        let v: Value = serde_json::from_str(r#"{"x":1.0,"w":2.0}"#).unwrap();
        assert!(matches!(v, Value::Object(_)));

        let v: Value = serde_json::from_str("true").unwrap();
        assert_eq!(v, Value::Bool(true));
        let v: Value = serde_json::from_str("4.5").unwrap();
        assert_eq!(v, Value::Number(4.5));
    }

    #[test]
    fn test_dot_and_length() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(a.dot(&a), 14.0);
        assert_eq!(Vec3::new(3.0, 4.0, 0.0).length(), 5.0);
    }
}
