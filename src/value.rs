//! Dynamic value representation.
//!
//! [`Value`] covers exactly what the writers can express: null, booleans,
//! numbers, strings, sequences and string-keyed mappings. It implements
//! [`Serialize`], so a tree streams out through [`to_writer`](crate::to_writer),
//! and [`Value::as_scalar`] hands leaves to a writer directly.
//!
//! ```rust
//! use yaml_write_stream::{to_string, yaml};
//!
//! let doc = yaml!({
//!     "name": "Alice",
//!     "age": 30,
//!     "tags": ["rust", "yaml"]
//! });
//! assert_eq!(
//!     to_string(&doc).unwrap(),
//!     "name: \"Alice\"\nage: 30\ntags:\n- \"rust\"\n- \"yaml\"\n"
//! );
//! ```

use crate::scalar::Scalar;
use crate::Mapping;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::borrow::Cow;

/// A dynamically-typed YAML value.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

/// A numeric value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Number {
    /// Converts this number to an `i64` if it is integral and in range.
    ///
    /// ```rust
    /// use yaml_write_stream::Number;
    ///
    /// assert_eq!(Number::Int(-4).as_i64(), Some(-4));
    /// assert_eq!(Number::UInt(u64::MAX).as_i64(), None);
    /// assert_eq!(Number::Float(1.0).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Int(i) => Some(*i),
            Number::UInt(u) => i64::try_from(*u).ok(),
            Number::Float(_) => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(i) => *i as f64,
            Number::UInt(u) => *u as f64,
            Number::Float(f) => *f,
        }
    }
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Borrows this value as a scalar, or `None` for containers.
    #[must_use]
    pub fn as_scalar(&self) -> Option<Scalar<'_>> {
        match self {
            Value::Null => Some(Scalar::Null),
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Number(Number::Int(i)) => Some(Scalar::Int(*i)),
            Value::Number(Number::UInt(u)) => Some(Scalar::UInt(*u)),
            Value::Number(Number::Float(f)) => Some(Scalar::Float(*f)),
            Value::String(s) => Some(Scalar::Str(Cow::Borrowed(s))),
            Value::Sequence(_) | Value::Mapping(_) => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Int(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::UInt(u)) => serializer.serialize_u64(*u),
            Value::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Sequence(items) => items.serialize(serializer),
            Value::Mapping(map) => {
                let mut entries = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    entries.serialize_entry(key, value)?;
                }
                entries.end()
            }
        }
    }
}

macro_rules! value_from_number {
    ($variant:ident, $target:ty, $($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::$variant(value as $target))
                }
            }
        )*
    };
}

value_from_number!(Int, i64, i8, i16, i32, i64);
value_from_number!(UInt, u64, u8, u16, u32, u64);
value_from_number!(Float, f64, f32, f64);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Sequence(value)
    }
}

impl From<Mapping> for Value {
    fn from(value: Mapping) -> Self {
        Value::Mapping(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_scalar() {
        assert_eq!(Value::Null.as_scalar(), Some(Scalar::Null));
        assert_eq!(Value::from(3).as_scalar(), Some(Scalar::Int(3)));
        assert_eq!(Value::from("x").as_scalar(), Some(Scalar::from("x")));
        assert_eq!(Value::Sequence(vec![]).as_scalar(), None);
        assert_eq!(Value::Mapping(Mapping::new()).as_scalar(), None);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::String("a".to_string()));
    }

    #[test]
    fn test_serialize_mapping_order() {
        let map: Mapping = vec![
            ("z".to_string(), Value::from(1)),
            ("a".to_string(), Value::from(2)),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            crate::to_string(&Value::Mapping(map)).unwrap(),
            "z: 1\na: 2\n"
        );
    }
}
