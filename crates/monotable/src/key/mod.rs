#[cfg(test)]
mod tests;

use crate::{
    error::Error,
    value::{AttributeValues, Value},
};
use std::fmt::{self, Display};

///
/// KeyTemplate
///
/// Parsed form of a key template string such as `USER#{{id}}`. Literal
/// segments pass through unchanged; `{{name}}` segments are substituted from
/// an attribute-value map at compile time.
///
/// Parsing is total: an unterminated `{{` is kept as literal text.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyTemplate {
    source: String,
    segments: Vec<Segment>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

impl KeyTemplate {
    #[must_use]
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let mut segments = Vec::new();
        let mut rest = source.as_str();

        while let Some(open) = rest.find("{{") {
            let Some(close) = rest[open + 2..].find("}}") else {
                break;
            };

            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            segments.push(Segment::Placeholder(
                rest[open + 2..open + 2 + close].trim().to_string(),
            ));
            rest = &rest[open + 2 + close + 2..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Self { source, segments }
    }

    /// Attribute names referenced by this template, in order of appearance.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|seg| match seg {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Whether any placeholder names one of the given attributes.
    pub fn references_any<'a>(&self, mut attrs: impl Iterator<Item = &'a str>) -> bool {
        attrs.any(|attr| self.references().any(|r| r == attr))
    }

    /// Interpolate the template against an attribute-value map.
    ///
    /// Deterministic: the same inputs always yield the same key string.
    pub fn compile(&self, values: &AttributeValues) -> Result<String, Error> {
        let mut out = String::with_capacity(self.source.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    let part = values
                        .get(name)
                        .and_then(Value::key_string)
                        .ok_or_else(|| Error::missing_attribute(name.clone()))?;
                    out.push_str(&part);
                }
            }
        }

        Ok(out)
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Display for KeyTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

///
/// KeyTemplatePair
///
/// Partition/sort key templates compiled together in one pass. Backs the
/// entity primary key, secondary index keys, and unique shadow keys with the
/// same representation.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyTemplatePair {
    pub partition_key: KeyTemplate,
    pub sort_key: KeyTemplate,
}

impl KeyTemplatePair {
    #[must_use]
    pub fn new(partition_key: impl Into<String>, sort_key: impl Into<String>) -> Self {
        Self {
            partition_key: KeyTemplate::parse(partition_key),
            sort_key: KeyTemplate::parse(sort_key),
        }
    }

    /// Compile both halves against the same attribute-value map.
    pub fn compile(&self, values: &AttributeValues) -> Result<CompiledKey, Error> {
        Ok(CompiledKey {
            partition_key: self.partition_key.compile(values)?,
            sort_key: self.sort_key.compile(values)?,
        })
    }

    /// All attribute names referenced by either half.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.partition_key
            .references()
            .chain(self.sort_key.references())
    }
}

///
/// CompiledKey
///
/// Concrete partition/sort key strings produced from one template pair.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompiledKey {
    pub partition_key: String,
    pub sort_key: String,
}
