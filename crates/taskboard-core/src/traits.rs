//! Traits for the external collaborators Taskboard reads from.

use crate::error::Result;
use crate::types::Command;

/// Registry that can enumerate every runnable command.
///
/// Implementations list everything they know about; filtering and ordering
/// are applied by the catalog, never by the source.
pub trait CommandSource: Send + Sync {
    fn list_all(&self) -> Result<Vec<Command>>;
}

/// Durable store whose schema presence gates the dashboard.
pub trait ScheduleStore: Send + Sync {
    /// Whether a table/structure with this exact name exists.
    fn has_table(&self, name: &str) -> Result<bool>;
}
