use crate::key::KeyTemplatePair;
use std::fmt::{self, Display};

///
/// IndexModel
///
/// Secondary index definition: external index name, the physical attribute
/// names the compiled keys are stored under, and the key template pair.
///

#[derive(Clone, Debug)]
pub struct IndexModel {
    pub name: String,
    pub partition_key_attr: String,
    pub sort_key_attr: String,
    pub key: KeyTemplatePair,
}

impl IndexModel {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        partition_key_attr: impl Into<String>,
        sort_key_attr: impl Into<String>,
        key: KeyTemplatePair,
    ) -> Self {
        Self {
            name: name.into(),
            partition_key_attr: partition_key_attr.into(),
            sort_key_attr: sort_key_attr.into(),
            key,
        }
    }
}

impl Display for IndexModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}, {})",
            self.name, self.partition_key_attr, self.sort_key_attr
        )
    }
}
