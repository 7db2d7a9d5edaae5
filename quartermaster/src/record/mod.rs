//! Asset records and asset types.
//!
//! A [Record] is the plain, possibly nested data object a filter is evaluated
//! against. Records of one [AssetType] share the field layout described by that
//! type's [`crate::catalog::FieldCatalog`].

mod asset_type;
mod record;

pub use asset_type::*;
pub use record::*;
