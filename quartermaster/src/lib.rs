//! # Quartermaster - Inventory Asset Filtering
//!
//! Quartermaster evaluates user-built filter chains against inventory assets
//! (items, ships and vehicles) of a role-play campaign. A filter chain is an
//! ordered sequence of conditions joined by `AND`/`OR`, evaluated strictly
//! left to right without precedence.
//!
//! ## Key Features
//!
//! - **Tolerant field access**: dotted paths such as `model.name` resolve through
//!   nested records; missing intermediates never fail
//! - **Typed comparisons**: case-insensitive string operators, numeric coercion,
//!   boolean equality
//! - **Field catalogs**: per asset type schemas that validate conditions
//! - **Pagination**: order-preserving filtering sliced into fixed-size pages
//! - **Session store**: typed filter state with change subscriptions
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use quartermaster::filter::field;
//! use quartermaster::record;
//!
//! let blaster = record! {
//!     quantity: 10,
//!     model: { name: "DL-44 Heavy Blaster", stackable: false }
//! };
//!
//! let filter = field("quantity").gt("5").and(field("model.name").contains("blaster"));
//! assert!(filter.evaluate(&blaster));
//! ```
//!
//! ## Module Organization
//!
//! - [`catalog`] - Per asset type field catalogs
//! - [`common`] - Values, constants and shared utilities
//! - [`config`] - Engine configuration and its builder
//! - [`errors`] - Error types and result definitions
//! - [`filter`] - Conditions, operators, sequences and the evaluator
//! - [`inventory`] - Asset lists and pagination
//! - [`record`] - Asset records and asset types
//! - [`store`] - Session filter store with change events

pub mod catalog;
pub mod common;
pub mod config;
pub mod errors;
pub mod filter;
pub mod inventory;
pub mod record;
pub mod store;

pub use common::*;
