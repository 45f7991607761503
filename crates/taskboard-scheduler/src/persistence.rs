//! SQLite-backed schedule store.
//!
//! Taskboard only asks the store whether it has been provisioned; the
//! `setup` path creates the tasks table so the dashboard can go live.

use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use taskboard_core::ScheduleStore;
use taskboard_core::error::{Result, TaskboardError};

/// Connection to the scheduler database.
pub struct SchedulerDb {
    conn: Connection,
}

impl SchedulerDb {
    /// Open or create the scheduler database.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path).map_err(|e| db_err("DB open", e))?;
        Ok(Self { conn })
    }

    /// Open a database that must already exist.
    pub fn open_existing(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| db_err("DB open", e))?;
        Ok(Self { conn })
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| db_err("DB open", e))?;
        Ok(Self { conn })
    }

    /// Create the tasks table `<prefix>tasks` if missing.
    pub fn migrate(&self, table_prefix: &str) -> Result<()> {
        validate_prefix(table_prefix)?;
        self.conn
            .execute_batch(&format!(
                "
            CREATE TABLE IF NOT EXISTS {table_prefix}tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                command TEXT NOT NULL,
                parameters TEXT,
                expression TEXT,                 -- cron expression
                timezone TEXT NOT NULL DEFAULT 'UTC',
                is_active INTEGER NOT NULL DEFAULT 1,
                dont_overlap INTEGER NOT NULL DEFAULT 0,
                run_in_maintenance INTEGER NOT NULL DEFAULT 0,
                notification_email TEXT,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
         "
            ))
            .map_err(|e| db_err("Migration", e))?;
        tracing::info!("💾 Schedule store provisioned ({table_prefix}tasks)");
        Ok(())
    }

    /// Whether a table with this exact name exists.
    pub fn has_table(&self, name: &str) -> Result<bool> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [name],
                |row| row.get(0),
            )
            .map_err(|e| db_err("Schema query", e))?;
        Ok(count > 0)
    }
}

fn db_err(what: &str, e: rusqlite::Error) -> TaskboardError {
    TaskboardError::Database(format!("{what}: {e}"))
}

// The prefix is spliced unquoted into DDL, so `<prefix>tasks` must be a plain identifier.
fn validate_prefix(prefix: &str) -> Result<()> {
    let leads_ok = prefix
        .chars()
        .next()
        .is_none_or(|c| c.is_ascii_alphabetic() || c == '_');
    if leads_ok && prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(TaskboardError::Config(format!(
            "table_prefix must match ^[A-Za-z_][A-Za-z0-9_]*$, got {prefix}"
        )))
    }
}

/// [`ScheduleStore`] over a SQLite file, opened fresh for every query.
///
/// A missing file is reported as an error rather than silently created.
#[derive(Debug, Clone)]
pub struct SqliteScheduleStore {
    path: PathBuf,
}

impl SqliteScheduleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScheduleStore for SqliteScheduleStore {
    fn has_table(&self, name: &str) -> Result<bool> {
        SchedulerDb::open_existing(&self.path)?.has_table(name)
    }
}
