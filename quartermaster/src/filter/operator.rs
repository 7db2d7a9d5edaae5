use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Display;
use std::str::FromStr;

use crate::common::{FieldKind, AND_TOKEN, OR_TOKEN};
use crate::errors::{ErrorKind, QuartermasterError};

/// Comparison operator of a single condition.
///
/// The set is closed; a name that is not recognised (for example from a saved
/// filter written by a newer client, or a typo) is kept verbatim in
/// [`FilterOperator::Unknown`] so that it round-trips and its evaluation is
/// decided by the configured [`UnknownOperatorPolicy`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    Unknown(String),
}

static STRING_OPERATORS: [FilterOperator; 6] = [
    FilterOperator::Equals,
    FilterOperator::NotEquals,
    FilterOperator::Contains,
    FilterOperator::NotContains,
    FilterOperator::StartsWith,
    FilterOperator::EndsWith,
];

static NUMBER_OPERATORS: [FilterOperator; 6] = [
    FilterOperator::Equals,
    FilterOperator::NotEquals,
    FilterOperator::GreaterThan,
    FilterOperator::LessThan,
    FilterOperator::GreaterThanOrEqual,
    FilterOperator::LessThanOrEqual,
];

static BOOLEAN_OPERATORS: [FilterOperator; 2] = [FilterOperator::Equals, FilterOperator::NotEquals];

impl FilterOperator {
    /// Parses a wire name. Unrecognised names become [`FilterOperator::Unknown`].
    pub fn from_name(name: &str) -> FilterOperator {
        match name {
            "equals" => FilterOperator::Equals,
            "not_equals" => FilterOperator::NotEquals,
            "contains" => FilterOperator::Contains,
            "not_contains" => FilterOperator::NotContains,
            "starts_with" => FilterOperator::StartsWith,
            "ends_with" => FilterOperator::EndsWith,
            "greater_than" => FilterOperator::GreaterThan,
            "less_than" => FilterOperator::LessThan,
            "greater_than_or_equal" => FilterOperator::GreaterThanOrEqual,
            "less_than_or_equal" => FilterOperator::LessThanOrEqual,
            other => FilterOperator::Unknown(other.to_string()),
        }
    }

    /// The wire name of the operator.
    pub fn name(&self) -> &str {
        match self {
            FilterOperator::Equals => "equals",
            FilterOperator::NotEquals => "not_equals",
            FilterOperator::Contains => "contains",
            FilterOperator::NotContains => "not_contains",
            FilterOperator::StartsWith => "starts_with",
            FilterOperator::EndsWith => "ends_with",
            FilterOperator::GreaterThan => "greater_than",
            FilterOperator::LessThan => "less_than",
            FilterOperator::GreaterThanOrEqual => "greater_than_or_equal",
            FilterOperator::LessThanOrEqual => "less_than_or_equal",
            FilterOperator::Unknown(name) => name,
        }
    }

    #[inline]
    pub fn is_known(&self) -> bool {
        !matches!(self, FilterOperator::Unknown(_))
    }

    /// Operators that have defined semantics for values of `kind`.
    pub fn operators_for(kind: FieldKind) -> &'static [FilterOperator] {
        match kind {
            FieldKind::String => &STRING_OPERATORS,
            FieldKind::Number => &NUMBER_OPERATORS,
            FieldKind::Boolean => &BOOLEAN_OPERATORS,
        }
    }

    /// Checks whether this operator has defined semantics for values of `kind`.
    pub fn supports(&self, kind: FieldKind) -> bool {
        Self::operators_for(kind).contains(self)
    }
}

impl Display for FilterOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<&str> for FilterOperator {
    fn from(name: &str) -> Self {
        FilterOperator::from_name(name)
    }
}

impl Serialize for FilterOperator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for FilterOperator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(FilterOperator::from_name(&name))
    }
}

/// Boolean combinator placed between two adjacent conditions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Combinator {
    #[default]
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

impl Combinator {
    /// Combines the running result with the next condition's result.
    #[inline]
    pub fn apply(&self, left: bool, right: bool) -> bool {
        match self {
            Combinator::And => left && right,
            Combinator::Or => left || right,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Combinator::And => AND_TOKEN,
            Combinator::Or => OR_TOKEN,
        }
    }
}

impl Display for Combinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Combinator {
    type Err = QuartermasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case(AND_TOKEN) {
            Ok(Combinator::And)
        } else if s.eq_ignore_ascii_case(OR_TOKEN) {
            Ok(Combinator::Or)
        } else {
            log::error!("Unknown combinator {}", s);
            Err(QuartermasterError::new(
                &format!("Unknown combinator {}, expected AND or OR", s),
                ErrorKind::FilterError,
            ))
        }
    }
}

/// Outcome of a condition whose operator has no defined semantics for the
/// resolved value: an unknown operator, a known operator applied to a kind that
/// does not support it, or a value that is neither string, number nor boolean.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownOperatorPolicy {
    /// The condition holds, so the record passes through.
    #[default]
    Pass,
    /// The condition fails, so the record is excluded.
    Reject,
}

impl UnknownOperatorPolicy {
    #[inline]
    pub fn outcome(&self) -> bool {
        matches!(self, UnknownOperatorPolicy::Pass)
    }
}
