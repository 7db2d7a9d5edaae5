//! Filter conditions, operators, sequences and their evaluation.
//!
//! A filter is a [FilterSequence]: conditions joined by `AND`/`OR`, evaluated
//! strictly left to right against an asset [`crate::record::Record`].
//!
//! # Creating Filters
//!
//! - `field("quantity").gt(5)` - a single [Condition]
//! - `field("quantity").gt(5).and(field("model.name").contains("blaster"))` - a sequence
//! - `FilterSequence::add_condition` - incremental building, as a filter form does
//!
//! # Supported Operators
//!
//! - **String** (case-insensitive): `equals`, `not_equals`, `contains`,
//!   `not_contains`, `starts_with`, `ends_with`
//! - **Number**: `equals`, `not_equals`, `greater_than`, `less_than`,
//!   `greater_than_or_equal`, `less_than_or_equal`
//! - **Boolean**: `equals`, `not_equals`
//!
//! A missing or `null` field never matches. An operator without semantics for
//! the field's value is decided by [UnknownOperatorPolicy].

mod accessor;
mod condition;
mod fluent;
mod operator;
mod sequence;

pub use accessor::*;
pub use condition::*;
pub use fluent::*;
pub use operator::*;
pub use sequence::*;
