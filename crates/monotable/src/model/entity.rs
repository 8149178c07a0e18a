use crate::{
    DEFAULT_PARTITION_KEY_ATTR, DEFAULT_SORT_KEY_ATTR,
    key::KeyTemplatePair,
    model::{attribute::AttributeModel, autogen::AutoGeneratedAttributeModel, index::IndexModel},
};

///
/// EntityModel
///
/// Complete runtime metadata for one entity: owning table, primary-key
/// templates, ordered attribute list, auto-generated attributes, and
/// secondary index definitions. Attribute order is authoritative for update
/// expression placeholder assignment.
///

#[derive(Clone, Debug)]
pub struct EntityModel {
    /// Stable external name, unique within a registry.
    pub name: String,
    /// Owning table identifier.
    pub table: String,
    /// Physical attribute name backing the table partition key.
    pub partition_key_attr: String,
    /// Physical attribute name backing the table sort key.
    pub sort_key_attr: String,
    pub primary_key: KeyTemplatePair,
    /// Ordered attribute list (declaration order is significant).
    pub attributes: Vec<AttributeModel>,
    pub auto_generated: Vec<AutoGeneratedAttributeModel>,
    pub indexes: Vec<IndexModel>,
}

impl EntityModel {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        table: impl Into<String>,
        primary_key: KeyTemplatePair,
    ) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            partition_key_attr: DEFAULT_PARTITION_KEY_ATTR.to_string(),
            sort_key_attr: DEFAULT_SORT_KEY_ATTR.to_string(),
            primary_key,
            attributes: Vec::new(),
            auto_generated: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Override the physical primary-key attribute names.
    #[must_use]
    pub fn key_attributes(
        mut self,
        partition_key_attr: impl Into<String>,
        sort_key_attr: impl Into<String>,
    ) -> Self {
        self.partition_key_attr = partition_key_attr.into();
        self.sort_key_attr = sort_key_attr.into();
        self
    }

    #[must_use]
    pub fn attribute(mut self, attribute: AttributeModel) -> Self {
        self.attributes.push(attribute);
        self
    }

    #[must_use]
    pub fn auto_generated(mut self, attribute: AutoGeneratedAttributeModel) -> Self {
        self.auto_generated.push(attribute);
        self
    }

    #[must_use]
    pub fn index(mut self, index: IndexModel) -> Self {
        self.indexes.push(index);
        self
    }

    /// Look up a declared (non-generated) attribute by name.
    #[must_use]
    pub fn attribute_model(&self, name: &str) -> Option<&AttributeModel> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// Look up a secondary index by name.
    #[must_use]
    pub fn index_model(&self, name: &str) -> Option<&IndexModel> {
        self.indexes.iter().find(|index| index.name == name)
    }

    /// Whether a name is declared, either as a plain or auto-generated
    /// attribute.
    #[must_use]
    pub fn declares(&self, name: &str) -> bool {
        self.attributes.iter().any(|attr| attr.name == name)
            || self.auto_generated.iter().any(|attr| attr.name == name)
    }

    /// Declared attributes carrying a uniqueness constraint, in declaration
    /// order.
    pub fn unique_attributes(&self) -> impl Iterator<Item = &AttributeModel> {
        self.attributes.iter().filter(|attr| attr.is_unique())
    }

    #[must_use]
    pub fn has_unique_attributes(&self) -> bool {
        self.unique_attributes().next().is_some()
    }
}
