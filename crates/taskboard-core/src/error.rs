//! Taskboard error types.

/// Errors surfaced by Taskboard crates.
#[derive(Debug, thiserror::Error)]
pub enum TaskboardError {
    #[error("Config error: {0}")]
    Config(String),

    /// The command source could not enumerate its commands.
    #[error("Command source error: {0}")]
    CommandSource(String),

    /// The schedule store could not be reached or queried.
    #[error("Database error: {0}")]
    Database(String),

    #[error("Duplicate command: {0}")]
    DuplicateCommand(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result alias used across Taskboard.
pub type Result<T> = std::result::Result<T, TaskboardError>;
