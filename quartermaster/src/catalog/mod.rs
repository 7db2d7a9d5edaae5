//! Per asset type catalogs of filterable fields.
//!
//! Items, ships and vehicles each expose a fixed set of dotted field paths with
//! a declared [`FieldKind`](crate::common::FieldKind). The catalog is what a
//! filter form offers and what checks user input before it becomes a
//! [`Condition`](crate::filter::Condition).

mod field_catalog;

pub use field_catalog::*;
