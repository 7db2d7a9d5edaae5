//! Asset lists and pagination of filter results.

mod asset_list;
mod paginator;

pub use asset_list::*;
pub use paginator::*;
