//! # Taskboard Core
//!
//! Shared configuration, error type, data model and collaborator traits
//! used by every Taskboard crate.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::TaskboardConfig;
pub use error::{Result, TaskboardError};
pub use traits::{CommandSource, ScheduleStore};
pub use types::{Command, Frequency, FrequencyParameter};
