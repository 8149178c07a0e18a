
use serde::Serialize;
use std::collections::BTreeMap;

///
/// AttributeValues
///
/// Ordered attribute-name → value map. Ordered so that compiled requests and
/// their serialized forms are deterministic and directly comparable in tests.
///

pub type AttributeValues = BTreeMap<String, Value>;

/// Record body as written to the store, keyed by physical attribute name.
pub type Item = BTreeMap<String, Value>;

///
/// Value
///
/// Tagged attribute value preserving the type information needed for key
/// interpolation and expression value encoding.
///
/// Null → the attribute is explicitly absent (never interpolated into keys).
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Int(i64),
    Uint(u64),
    Bool(bool),
    /// Epoch seconds; serialized as a plain number on the wire.
    Timestamp(i64),
    Null,
}

impl Value {
    /// String form used when this value is interpolated into a key template.
    ///
    /// Returns `None` for `Null`, which callers treat as a missing value.
    #[must_use]
    pub fn key_string(&self) -> Option<String> {
        match self {
            Self::Text(v) => Some(v.clone()),
            Self::Int(v) | Self::Timestamp(v) => Some(v.to_string()),
            Self::Uint(v) => Some(v.to_string()),
            Self::Bool(v) => Some(v.to_string()),
            Self::Null => None,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// Build an [`AttributeValues`] map from `(name, value)` pairs.
pub fn attribute_values<I, K, V>(pairs: I) -> AttributeValues
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
