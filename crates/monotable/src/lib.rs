//! Core runtime for monotable: entity models, key/expression compilation,
//! uniqueness emulation, and the request transformer exported via `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod error;
pub mod expr;
pub mod key;
pub mod model;
pub mod registry;
pub mod request;
pub mod transformer;
pub mod unique;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Default physical attribute name backing the table partition key.
pub const DEFAULT_PARTITION_KEY_ATTR: &str = "PK";

/// Default physical attribute name backing the table sort key.
pub const DEFAULT_SORT_KEY_ATTR: &str = "SK";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No compilers, managers, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        error::Error,
        expr::SortKeyCondition,
        key::KeyTemplatePair,
        model::{
            attribute::{AttributeKind, AttributeModel, UniqueConstraint},
            autogen::{AutoGeneratedAttributeModel, DefaultGenerator, GenerationStrategy},
            entity::EntityModel,
            index::IndexModel,
        },
        registry::EntityRegistry,
        transformer::{QueryOptions, QueryOrder, RequestTransformer},
        value::{AttributeValues, Item, Value},
    };
}
