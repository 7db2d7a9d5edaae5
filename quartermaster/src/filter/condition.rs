use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::common::{FieldKind, Value, TRUE_LITERAL};
use crate::record::Record;

use super::{resolve, Combinator, FieldPath, FilterOperator, FilterSequence, UnknownOperatorPolicy};

/// A single `field operator value` predicate.
///
/// The literal is always kept as the string the user typed; it is interpreted
/// according to the kind of the value the field resolves to when the condition
/// is evaluated.
///
/// # Examples
///
/// ```rust,ignore
/// use quartermaster::filter::{Condition, FilterOperator};
///
/// let condition = Condition::new("quantity", FilterOperator::GreaterThan, "5");
/// assert!(condition.evaluate(&record!{ quantity: 10 }));
/// assert!(!condition.evaluate(&record!{ quantity: 3 }));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    field: FieldPath,
    operator: FilterOperator,
    value: String,
}

impl Condition {
    pub fn new(field: &str, operator: FilterOperator, value: &str) -> Self {
        Condition {
            field: FieldPath::parse(field),
            operator,
            value: value.to_string(),
        }
    }

    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    pub fn operator(&self) -> &FilterOperator {
        &self.operator
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_field(&mut self, field: &str) {
        self.field = FieldPath::parse(field);
    }

    pub fn set_operator(&mut self, operator: FilterOperator) {
        self.operator = operator;
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    /// The field path, split when the condition was built.
    pub fn path(&self) -> &FieldPath {
        &self.field
    }

    /// Evaluates the condition against `record` with the default
    /// [`UnknownOperatorPolicy::Pass`].
    pub fn evaluate(&self, record: &Record) -> bool {
        self.evaluate_with(record, UnknownOperatorPolicy::default())
    }

    /// Evaluates the condition against `record`.
    ///
    /// A field that is missing or `null` never matches, whatever the operator.
    pub fn evaluate_with(&self, record: &Record, policy: UnknownOperatorPolicy) -> bool {
        match resolve(record, &self.field) {
            Some(value) => self.matches(value, policy),
            None => false,
        }
    }

    /// Evaluates the condition against an already resolved field value.
    pub fn matches(&self, value: &Value, policy: UnknownOperatorPolicy) -> bool {
        match value {
            Value::Null => false,
            Value::Bool(b) => self.compare_bool(*b, policy),
            Value::String(s) => self.compare_string(s, policy),
            Value::I64(_) | Value::F64(_) => match value.as_number() {
                Some(n) => self.compare_number(n, policy),
                None => false,
            },
            Value::Record(_) | Value::Array(_) => self.fallback(None, policy),
        }
    }

    /// Starts a sequence `self AND other`.
    pub fn and(self, other: Condition) -> FilterSequence {
        FilterSequence::from(self).and(other)
    }

    /// Starts a sequence `self OR other`.
    pub fn or(self, other: Condition) -> FilterSequence {
        FilterSequence::from(self).or(other)
    }

    /// Joins `self` to `other` with `combinator`.
    pub fn then(self, combinator: Combinator, other: Condition) -> FilterSequence {
        let mut sequence = FilterSequence::from(self);
        sequence.add_condition(other, combinator);
        sequence
    }

    fn compare_bool(&self, actual: bool, policy: UnknownOperatorPolicy) -> bool {
        let expected = self.value == TRUE_LITERAL;
        match &self.operator {
            FilterOperator::Equals => actual == expected,
            FilterOperator::NotEquals => actual != expected,
            FilterOperator::Contains
            | FilterOperator::NotContains
            | FilterOperator::StartsWith
            | FilterOperator::EndsWith
            | FilterOperator::GreaterThan
            | FilterOperator::LessThan
            | FilterOperator::GreaterThanOrEqual
            | FilterOperator::LessThanOrEqual
            | FilterOperator::Unknown(_) => self.fallback(Some(FieldKind::Boolean), policy),
        }
    }

    fn compare_string(&self, actual: &str, policy: UnknownOperatorPolicy) -> bool {
        let actual = actual.to_lowercase();
        let expected = self.value.to_lowercase();
        match &self.operator {
            FilterOperator::Equals => actual == expected,
            FilterOperator::NotEquals => actual != expected,
            FilterOperator::Contains => actual.contains(&expected),
            FilterOperator::NotContains => !actual.contains(&expected),
            FilterOperator::StartsWith => actual.starts_with(&expected),
            FilterOperator::EndsWith => actual.ends_with(&expected),
            FilterOperator::GreaterThan
            | FilterOperator::LessThan
            | FilterOperator::GreaterThanOrEqual
            | FilterOperator::LessThanOrEqual
            | FilterOperator::Unknown(_) => self.fallback(Some(FieldKind::String), policy),
        }
    }

    fn compare_number(&self, actual: f64, policy: UnknownOperatorPolicy) -> bool {
        let expected = coerce_number(&self.value);
        match &self.operator {
            FilterOperator::Equals => actual == expected,
            FilterOperator::NotEquals => actual != expected,
            FilterOperator::GreaterThan => actual > expected,
            FilterOperator::LessThan => actual < expected,
            FilterOperator::GreaterThanOrEqual => actual >= expected,
            FilterOperator::LessThanOrEqual => actual <= expected,
            FilterOperator::Contains
            | FilterOperator::NotContains
            | FilterOperator::StartsWith
            | FilterOperator::EndsWith
            | FilterOperator::Unknown(_) => self.fallback(Some(FieldKind::Number), policy),
        }
    }

    fn fallback(&self, kind: Option<FieldKind>, policy: UnknownOperatorPolicy) -> bool {
        let kind = kind.map(|k| k.to_string()).unwrap_or_else(|| "non-scalar".to_string());
        log::debug!(
            "Operator {} has no semantics for {} field {}, applying {:?} policy",
            self.operator,
            kind,
            self.field,
            policy
        );
        policy.outcome()
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {:?}", self.field, self.operator, self.value)
    }
}

/// Converts a literal to a number the way a form input's text is read as a
/// number: surrounding whitespace and byte order marks are ignored, the empty
/// string is `0`, `Infinity` may be signed, `0x`/`0o`/`0b` prefixes select a
/// radix, and anything that is not a complete decimal literal is `NaN`.
pub fn coerce_number(literal: &str) -> f64 {
    let trimmed = literal.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match trimmed.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&trimmed[2..], radix);
    }

    // f64::from_str also accepts "inf" and "nan", which are not numbers here
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
        })
        .unwrap_or(f64::NAN)
}
