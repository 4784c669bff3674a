//! Custom property bags attached to scene objects
//!
//! Host scenes store building attributes as loosely-typed custom
//! properties. Values imported from the city database frequently arrive as
//! text (`"42.5"`, `"1920-05-01"`, even `"None"`), so the accessors here
//! coerce leniently and report absence instead of failing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A property value stored on a scene object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Null/missing value
    Null,

    /// Boolean value
    Boolean(bool),

    /// 64-bit signed integer
    Integer(i64),

    /// 64-bit floating point
    Float(f64),

    /// UTF-8 string
    String(String),
}

impl PropertyValue {
    /// Returns true if the value is null or a textual null marker
    pub fn is_null(&self) -> bool {
        match self {
            PropertyValue::Null => true,
            PropertyValue::String(s) => is_null_marker(s),
            _ => false,
        }
    }

    /// Try to get as integer, parsing numeric text
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            PropertyValue::String(s) if !is_null_marker(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Try to get as float, parsing numeric text
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            PropertyValue::Integer(i) => Some(*i as f64),
            PropertyValue::String(s) if !is_null_marker(s) => {
                s.trim().parse::<f64>().ok().filter(|f| f.is_finite())
            }
            _ => None,
        }
    }

    /// Try to get as string reference; null markers are not strings
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) if !is_null_marker(s) => Some(s),
            _ => None,
        }
    }
}

/// Textual spellings of "no value" produced by exporters
fn is_null_marker(s: &str) -> bool {
    matches!(s.trim(), "" | "None" | "null" | "NULL")
}

macro_rules! property_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for PropertyValue {
                fn from(v: $ty) -> Self {
                    PropertyValue::$variant(v.into())
                }
            }
        )*
    };
}

property_value_from! {
    i64 => Integer,
    f64 => Float,
    String => String,
    &str => String,
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(PropertyValue::Null)
    }
}

/// A collection of custom properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Property {
    inner: HashMap<String, PropertyValue>,
}

impl Property {
    /// Create an empty property collection
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    /// Create with a single property
    pub fn with<K: Into<String>, V: Into<PropertyValue>>(key: K, value: V) -> Self {
        let mut props = Self::new();
        props.set(key, value);
        props
    }

    /// Set a property value
    pub fn set<K: Into<String>, V: Into<PropertyValue>>(&mut self, key: K, value: V) {
        self.inner.insert(key.into(), value.into());
    }

    /// Get a property value
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.inner.get(key)
    }

    /// Get a property value, treating null markers as absent
    pub fn get_present(&self, key: &str) -> Option<&PropertyValue> {
        self.inner.get(key).filter(|v| !v.is_null())
    }

}
