//! The generic tree model both merge inputs and the result are expressed in.
//!
//! A [`Value`] is a closed tagged union over null, scalars, mappings and
//! sequences. "This path has no value" is never a `Value`: it is modelled as
//! `Option::<Value>::None` so an explicit `null` in the source stays distinct
//! from a deletion.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MergeError, MergeResult};

/// Mapping storage. Key order carries no meaning.
pub type Mapping = BTreeMap<String, Value>;

// ---------------------------------------------------------------------------
// Scalar
// ---------------------------------------------------------------------------

/// An opaque comparable leaf payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A JSON-like tree node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Scalar(Scalar),
    Mapping(Mapping),
    Sequence(Vec<Value>),
}

/// Structural shape of a node as seen by the merge engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Mapping,
    Sequence,
    /// Scalars, null, and absent values.
    Other,
}

impl Shape {
    /// Classify a possibly absent value. Absence is never a container.
    pub fn of(value: Option<&Value>) -> Self {
        value.map_or(Shape::Other, Value::shape)
    }

    /// Returns `true` for mappings and sequences.
    pub fn is_container(self) -> bool {
        !matches!(self, Shape::Other)
    }
}

impl Value {
    /// Classify this value.
    pub fn shape(&self) -> Shape {
        match self {
            Value::Mapping(_) => Shape::Mapping,
            Value::Sequence(_) => Shape::Sequence,
            Value::Null | Value::Scalar(_) => Shape::Other,
        }
    }

    /// An empty mapping.
    pub fn empty_mapping() -> Self {
        Value::Mapping(Mapping::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns `true` if this is a mapping with no entries.
    pub fn is_empty_mapping(&self) -> bool {
        self.as_mapping().is_some_and(Mapping::is_empty)
    }

    /// Look up a key in a mapping node.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Decode a JSON document into the value model.
    pub fn from_json_str(text: &str) -> MergeResult<Self> {
        let raw: serde_json::Value = serde_json::from_str(text).map_err(MergeError::Decode)?;
        Ok(raw.into())
    }

    /// Encode this value as a JSON document.
    pub fn to_json_string(&self, pretty: bool) -> MergeResult<String> {
        let encoded = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        encoded.map_err(MergeError::Encode)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl From<serde_json::Value> for Value {
    fn from(raw: serde_json::Value) -> Self {
        match raw {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Scalar(Scalar::Bool(b)),
            serde_json::Value::Number(n) => Value::Scalar(Scalar::Number(n)),
            serde_json::Value::String(s) => Value::Scalar(Scalar::String(s)),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Mapping(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Scalar(Scalar::Bool(b)) => serde_json::Value::Bool(b),
            Value::Scalar(Scalar::Number(n)) => serde_json::Value::Number(n),
            Value::Scalar(Scalar::String(s)) => serde_json::Value::String(s),
            Value::Sequence(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Mapping(map) => {
                serde_json::Value::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Scalar(Scalar::Bool(b))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(Scalar::String(s.to_owned()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(Scalar::String(s))
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Scalar(Scalar::Number(serde_json::Number::from(n)))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl TryFrom<f64> for Value {
    type Error = MergeError;

    fn try_from(n: f64) -> Result<Self, Self::Error> {
        serde_json::Number::from_f64(n)
            .map(|n| Value::Scalar(Scalar::Number(n)))
            .ok_or_else(|| MergeError::UnsupportedNumber(n.to_string()))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

/// Fixed-length arrays lose their length typing and become plain sequences.
impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(map: BTreeMap<String, T>) -> Self {
        Value::Mapping(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
