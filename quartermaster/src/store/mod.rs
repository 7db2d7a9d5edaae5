//! Session filter state with change notifications.
//!
//! A [FilterStore] owns what one browsing session has selected: the asset type,
//! the filter sequence being built, the active character and the current page.
//! Components that render or apply that state subscribe to [StoreEvent]s instead
//! of sharing globals.

mod event;
mod filter_store;

pub use event::*;
pub use filter_store::*;
