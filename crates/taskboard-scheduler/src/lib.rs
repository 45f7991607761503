//! # Taskboard Scheduler
//!
//! Read side of the scheduled-task dashboard. It never runs commands and
//! never computes run times; it only decides what the dashboard can offer.
//!
//! ## Architecture
//! ```text
//! Dashboard
//!   ├── AccessGate.check(ctx)        → admit / deny
//!   ├── get_commands()
//!   │     CommandSource.list_all() → FilterPolicy.apply() → sort_catalog()
//!   ├── frequencies()                → configured list, verbatim
//!   └── is_enabled()
//!         ReadinessProbe → ScheduleStore.has_table("<prefix>tasks")
//! ```

pub mod catalog;
pub mod dashboard;
pub mod frequencies;
pub mod persistence;
pub mod readiness;
pub mod registry;

pub use catalog::{CatalogEntry, NAMESPACE_SEPARATOR, assemble, sort_catalog, sort_key};
pub use dashboard::Dashboard;
pub use frequencies::FrequencyRegistry;
pub use persistence::{SchedulerDb, SqliteScheduleStore};
pub use readiness::{Readiness, ReadinessProbe};
pub use registry::CommandRegistry;
