//! # Taskboard Security
//!
//! Decides which commands the dashboard exposes and who may see it.
//!
//! - [`glob`]: shell-style wildcard matching on command names.
//! - [`filter`]: whitelist/blacklist policy over a command listing.
//! - [`gate`]: replaceable admission predicate with a local-only default.

pub mod filter;
pub mod gate;
pub mod glob;

pub use filter::{FilterMode, FilterPolicy};
pub use gate::{AccessGate, AuthPredicate, Environment, RequestContext};
pub use glob::glob_match;
