use std::fmt::Display;

use super::{Condition, FilterOperator};

/// Creates a fluent condition builder for the specified field path.
///
/// # Examples
///
/// ```rust,ignore
/// use quartermaster::filter::field;
///
/// let heavy = field("model.weight").gte(20);
/// let named = field("model.name").contains("blaster");
/// let sequence = heavy.or(named);
/// ```
pub fn field(field_name: &str) -> FluentField {
    FluentField {
        field_name: field_name.to_string(),
    }
}

/// A fluent builder for conditions on one field.
///
/// Literals are taken through `Display`, so `gt(5)` and `gt("5")` build the same
/// condition.
pub struct FluentField {
    field_name: String,
}

impl FluentField {
    /// Builds a condition with an explicit operator.
    #[inline]
    pub fn op<T: Display>(self, operator: FilterOperator, value: T) -> Condition {
        Condition::new(&self.field_name, operator, &value.to_string())
    }

    /// Field equals the value; case-insensitive for strings.
    #[inline]
    pub fn eq<T: Display>(self, value: T) -> Condition {
        self.op(FilterOperator::Equals, value)
    }

    /// Field does not equal the value.
    #[inline]
    pub fn ne<T: Display>(self, value: T) -> Condition {
        self.op(FilterOperator::NotEquals, value)
    }

    #[inline]
    pub fn contains<T: Display>(self, value: T) -> Condition {
        self.op(FilterOperator::Contains, value)
    }

    #[inline]
    pub fn not_contains<T: Display>(self, value: T) -> Condition {
        self.op(FilterOperator::NotContains, value)
    }

    #[inline]
    pub fn starts_with<T: Display>(self, value: T) -> Condition {
        self.op(FilterOperator::StartsWith, value)
    }

    #[inline]
    pub fn ends_with<T: Display>(self, value: T) -> Condition {
        self.op(FilterOperator::EndsWith, value)
    }

    #[inline]
    pub fn gt<T: Display>(self, value: T) -> Condition {
        self.op(FilterOperator::GreaterThan, value)
    }

    #[inline]
    pub fn gte<T: Display>(self, value: T) -> Condition {
        self.op(FilterOperator::GreaterThanOrEqual, value)
    }

    #[inline]
    pub fn lt<T: Display>(self, value: T) -> Condition {
        self.op(FilterOperator::LessThan, value)
    }

    #[inline]
    pub fn lte<T: Display>(self, value: T) -> Condition {
        self.op(FilterOperator::LessThanOrEqual, value)
    }
}
