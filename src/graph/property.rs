//! Attribute value types for graphs, nodes and edges

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered attribute mapping, used both for nested values and for
/// snapshots of a whole attribute bag
pub type AttributeMap = IndexMap<String, AttributeValue>;

/// Attribute value
///
/// Supports:
/// - String
/// - Boolean
/// - Integer (i64)
/// - Float (f64)
/// - Array (Vec<AttributeValue>)
/// - Map (nested, insertion ordered)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    String(String),
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Array(Vec<AttributeValue>),
    Map(AttributeMap),
}

impl AttributeValue {
    /// Get string value if this is a string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get boolean value if this is a boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            AttributeValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get integer value if this is an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get float value if this is a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get array value if this is an array
    pub fn as_array(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Get nested mapping if this is a map
    pub fn as_map(&self) -> Option<&AttributeMap> {
        match self {
            AttributeValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Get type name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::String(_) => "String",
            AttributeValue::Boolean(_) => "Boolean",
            AttributeValue::Integer(_) => "Integer",
            AttributeValue::Float(_) => "Float",
            AttributeValue::Array(_) => "Array",
            AttributeValue::Map(_) => "Map",
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) => write!(f, "\"{}\"", s),
            AttributeValue::Boolean(b) => write!(f, "{}", b),
            AttributeValue::Integer(i) => write!(f, "{}", i),
            AttributeValue::Float(fl) => write!(f, "{}", fl),
            AttributeValue::Array(arr) => {
                write!(f, "[")?;
                for (i, val) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", val)?;
                }
                write!(f, "]")
            }
            AttributeValue::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, val)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, val)?;
                }
                write!(f, "}}")
            }
        }
    }
}

// Convenience conversions
impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Boolean(b)
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        AttributeValue::Integer(i)
    }
}

impl From<i32> for AttributeValue {
    fn from(i: i32) -> Self {
        AttributeValue::Integer(i as i64)
    }
}

impl From<f64> for AttributeValue {
    fn from(f: f64) -> Self {
        AttributeValue::Float(f)
    }
}

impl From<Vec<AttributeValue>> for AttributeValue {
    fn from(arr: Vec<AttributeValue>) -> Self {
        AttributeValue::Array(arr)
    }
}

impl From<AttributeMap> for AttributeValue {
    fn from(map: AttributeMap) -> Self {
        AttributeValue::Map(map)
    }
}
