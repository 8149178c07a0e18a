use crate::{error::Error, value::Value};
use derive_more::Display;
use std::str::FromStr;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

///
/// GenerationStrategy
///
/// Closed set of auto-value strategies. Extending it is a closed-set change,
/// not a registry; the resolver stays a plain match.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum GenerationStrategy {
    /// Random v4 identifier.
    #[display("uuid4")]
    Uuid4,
    /// Time-ordered random identifier (K-sortable).
    #[display("ulid")]
    Ulid,
    /// ISO-8601 timestamp.
    #[display("iso-date")]
    IsoDate,
    /// Epoch-seconds timestamp.
    #[display("epoch-date")]
    EpochDate,
}

impl FromStr for GenerationStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uuid4" => Ok(Self::Uuid4),
            "ulid" => Ok(Self::Ulid),
            "iso-date" => Ok(Self::IsoDate),
            "epoch-date" => Ok(Self::EpochDate),
            other => Err(Error::UnknownGenerationStrategy {
                strategy: other.to_string(),
            }),
        }
    }
}

///
/// ValueGenerator
///
/// Pluggable auto-value source. The model records only the generated result;
/// the algorithms themselves live behind this seam.
///

pub trait ValueGenerator {
    fn generate(&self, strategy: GenerationStrategy) -> Value;
}

///
/// DefaultGenerator
///

#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultGenerator;

impl ValueGenerator for DefaultGenerator {
    fn generate(&self, strategy: GenerationStrategy) -> Value {
        match strategy {
            GenerationStrategy::Uuid4 => Value::Text(uuid::Uuid::new_v4().to_string()),
            GenerationStrategy::Ulid => Value::Text(ulid::Ulid::new().to_string()),
            GenerationStrategy::IsoDate => {
                let now = OffsetDateTime::now_utc();
                // Rfc3339 formatting of a UTC instant cannot fail.
                Value::Text(now.format(&Rfc3339).expect("rfc3339 formatting"))
            }
            GenerationStrategy::EpochDate => {
                Value::Timestamp(OffsetDateTime::now_utc().unix_timestamp())
            }
        }
    }
}

///
/// AutoGeneratedAttributeModel
///
/// Auto-generated attribute declaration. The value is materialized once at
/// construction time for the requested strategy.
///

#[derive(Clone, Debug)]
pub struct AutoGeneratedAttributeModel {
    pub name: String,
    pub strategy: GenerationStrategy,
    /// Regenerate on every update, not only on creation.
    pub auto_update: bool,
    pub unique: bool,
    pub value: Value,
}

impl AutoGeneratedAttributeModel {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        strategy: GenerationStrategy,
        generator: &dyn ValueGenerator,
    ) -> Self {
        Self {
            name: name.into(),
            strategy,
            auto_update: false,
            unique: false,
            value: generator.generate(strategy),
        }
    }

    /// Construct from a strategy tag as it appears in declarative
    /// configuration. Unknown tags are a hard construction error.
    pub fn from_strategy_tag(
        name: impl Into<String>,
        strategy: &str,
        generator: &dyn ValueGenerator,
    ) -> Result<Self, Error> {
        Ok(Self::new(name, strategy.parse()?, generator))
    }

    #[must_use]
    pub const fn auto_update(mut self) -> Self {
        self.auto_update = true;
        self
    }

    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_strategy_tag_fails_construction() {
        let err = AutoGeneratedAttributeModel::from_strategy_tag("id", "nanoid", &DefaultGenerator)
            .unwrap_err();

        assert_eq!(
            err,
            Error::UnknownGenerationStrategy {
                strategy: "nanoid".to_string()
            }
        );
    }

    #[test]
    fn value_is_materialized_once_at_construction() {
        let model = AutoGeneratedAttributeModel::new("id", GenerationStrategy::Ulid, &DefaultGenerator);

        assert_eq!(model.value, model.clone().value);
        assert!(matches!(model.value, Value::Text(_)));
    }

    #[test]
    fn epoch_strategy_yields_timestamp_value() {
        let model =
            AutoGeneratedAttributeModel::new("createdAt", GenerationStrategy::EpochDate, &DefaultGenerator);

        assert!(matches!(model.value, Value::Timestamp(_)));
    }
}
