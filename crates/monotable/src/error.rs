use thiserror::Error as ThisError;

///
/// Error
///
/// Crate-level error taxonomy. Every variant is a deterministic function of
/// the inputs; the transformer performs no I/O, so nothing here is transient
/// or retryable.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    /// Raised before any compilation work when an entity name has no
    /// registered metadata.
    #[error("no entity registered under name '{entity}'")]
    EntityNotRegistered { entity: String },

    /// A key or shadow-key template referenced an attribute that is absent
    /// from the supplied values and has no default.
    #[error("missing value for attribute '{attribute}' referenced by key template")]
    MissingAttributeValue { attribute: String },

    /// A query named an index the entity does not declare.
    /// The message wording is part of the external contract.
    #[error("Requested to query items from index \"{index}\", but no such index exists on entity.")]
    UnknownIndex { index: String },

    /// An auto-generated attribute named a strategy outside the closed set.
    /// Fails metadata construction rather than deferring to request time.
    #[error("unknown auto-generation strategy '{strategy}'")]
    UnknownGenerationStrategy { strategy: String },

    /// Registration rejects duplicate entity names.
    #[error("entity '{entity}' already registered")]
    EntityAlreadyRegistered { entity: String },

    /// Registration rejects templates whose placeholders do not resolve to a
    /// declared attribute.
    #[error("template '{template}' references undeclared attribute '{attribute}'")]
    UndeclaredTemplateAttribute { template: String, attribute: String },

    /// Registration rejects static defaults that contradict the attribute's
    /// declared kind.
    #[error("static default for attribute '{attribute}' does not match declared kind {kind}")]
    DefaultKindMismatch { attribute: String, kind: String },
}

impl Error {
    pub(crate) fn missing_attribute(attribute: impl Into<String>) -> Self {
        Self::MissingAttributeValue {
            attribute: attribute.into(),
        }
    }

    pub(crate) fn entity_not_registered(entity: impl Into<String>) -> Self {
        Self::EntityNotRegistered {
            entity: entity.into(),
        }
    }

    pub(crate) fn unknown_index(index: impl Into<String>) -> Self {
        Self::UnknownIndex {
            index: index.into(),
        }
    }
}
