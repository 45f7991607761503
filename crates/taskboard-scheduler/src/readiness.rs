//! Readiness check: has the schedule store been provisioned?
//!
//! [`ReadinessProbe::status`] keeps the reason, [`ReadinessProbe::is_enabled`]
//! collapses it to a go/no-go: anything but [`Readiness::Ready`] is `false`.

use taskboard_core::ScheduleStore;

/// Outcome of one store check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// The tasks table exists.
    Ready,
    /// The store answered, but the tasks table is absent.
    NotProvisioned,
    /// The store could not answer.
    StoreUnavailable(String),
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Checks for a named table in a [`ScheduleStore`].
pub struct ReadinessProbe<'a> {
    store: &'a dyn ScheduleStore,
    table: &'a str,
}

impl<'a> ReadinessProbe<'a> {
    pub fn new(store: &'a dyn ScheduleStore, table: &'a str) -> Self {
        Self { store, table }
    }

    /// Query the store once.
    pub fn status(&self) -> Readiness {
        match self.store.has_table(self.table) {
            Ok(true) => Readiness::Ready,
            Ok(false) => Readiness::NotProvisioned,
            Err(e) => Readiness::StoreUnavailable(e.to_string()),
        }
    }

    /// `true` only when the table is confirmed present. Store errors read as `false`.
    pub fn is_enabled(&self) -> bool {
        self.status().is_ready()
    }
}
