use crate::{
    key::KeyTemplatePair,
    value::{AttributeValues, Value},
};
use derive_more::Display;
use std::fmt;

///
/// AttributeModel
///
/// Declared entity attribute: name, semantic kind, optional default-value
/// provider, optional uniqueness declaration.
///

#[derive(Clone, Debug)]
pub struct AttributeModel {
    pub name: String,
    pub kind: AttributeKind,
    pub default: Option<DefaultProvider>,
    pub unique: Option<UniqueConstraint>,
}

impl AttributeModel {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            unique: None,
        }
    }

    /// Static default applied when the attribute is absent at put time.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultProvider::Static(value.into()));
        self
    }

    /// Computed default; receives the full instance snapshot so a default can
    /// derive from other fields.
    #[must_use]
    pub fn with_computed_default(mut self, f: ComputedDefault) -> Self {
        self.default = Some(DefaultProvider::Computed(f));
        self
    }

    /// Declare uniqueness with the derived shadow-key template
    /// `<ENTITY>.<ATTR>#{{attr}}`.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = Some(UniqueConstraint::Derived);
        self
    }

    /// Declare uniqueness with an explicit shadow-key template pair.
    #[must_use]
    pub fn unique_with(mut self, key: KeyTemplatePair) -> Self {
        self.unique = Some(UniqueConstraint::Explicit(key));
        self
    }

    #[must_use]
    pub const fn is_unique(&self) -> bool {
        self.unique.is_some()
    }
}

///
/// AttributeKind
///
/// Semantic attribute type. Checked against static defaults at registration;
/// key stringification itself follows the runtime [`Value`] variant.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum AttributeKind {
    #[display("text")]
    Text,
    #[display("int")]
    Int,
    #[display("uint")]
    Uint,
    #[display("bool")]
    Bool,
    #[display("timestamp")]
    Timestamp,
}

impl AttributeKind {
    /// Whether a concrete value satisfies this declared kind.
    #[must_use]
    pub const fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::Text, Value::Text(_))
                | (Self::Int, Value::Int(_))
                | (Self::Uint, Value::Uint(_))
                | (Self::Bool, Value::Bool(_))
                | (Self::Timestamp, Value::Timestamp(_))
        ) || value.is_null()
    }
}

/// Function pointer computing a default from the full instance snapshot.
pub type ComputedDefault = fn(&AttributeValues) -> Value;

///
/// DefaultProvider
///

#[derive(Clone)]
pub enum DefaultProvider {
    Static(Value),
    Computed(ComputedDefault),
}

impl fmt::Debug for DefaultProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

///
/// UniqueConstraint
///
/// Either the derived shadow-key form or an explicit template pair supplied
/// by the caller.
///

#[derive(Clone, Debug)]
pub enum UniqueConstraint {
    Derived,
    Explicit(KeyTemplatePair),
}
