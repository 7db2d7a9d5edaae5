//! Values, constants and shared utilities used across the crate.

mod constants;
mod event_bus;
mod util;
mod value;

pub use constants::*;
pub use event_bus::*;
pub use util::*;
pub use value::*;
