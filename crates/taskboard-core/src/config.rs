//! Taskboard configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, TaskboardError};
use crate::types::{Command, Frequency};

/// Environment variable that overrides `[app] env`.
pub const ENV_OVERRIDE: &str = "TASKBOARD_ENV";

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskboardConfig {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default = "default_frequencies")]
    pub frequencies: Vec<Frequency>,
    #[serde(default)]
    pub commands: Vec<Command>,
}

impl Default for TaskboardConfig {
    fn default() -> Self {
        Self {
            app: AppConfig::default(),
            catalog: CatalogConfig::default(),
            database: DatabaseConfig::default(),
            dashboard: DashboardConfig::default(),
            frequencies: default_frequencies(),
            commands: Vec::new(),
        }
    }
}

impl TaskboardConfig {
    /// Load config from the default path (~/.taskboard/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TaskboardError::Config(format!("Failed to read config: {e}")))?;
        Self::parse(&content)
    }

    /// Parse config from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| TaskboardError::Config(format!("Failed to parse config: {e}")))
    }

    /// Save config to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| TaskboardError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get the Taskboard home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".taskboard")
    }
}

/// Application/deployment settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: String,
}

fn default_env() -> String { "production".into() }

impl Default for AppConfig {
    fn default() -> Self {
        Self { env: default_env() }
    }
}

impl AppConfig {
    /// Deployment mode name, preferring `TASKBOARD_ENV` when set.
    pub fn env_name(&self) -> String {
        resolve_env(&self.env, std::env::var(ENV_OVERRIDE).ok().as_deref())
    }
}

/// A non-blank override wins over the configured mode name.
pub fn resolve_env(configured: &str, override_value: Option<&str>) -> String {
    match override_value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => configured.to_string(),
    }
}

/// Which commands the dashboard offers for scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Glob patterns matched against command names, first match wins.
    #[serde(default)]
    pub filter: Vec<String>,
    /// `true`: only matching commands are listed. `false`: matching commands are hidden.
    #[serde(default = "bool_true")]
    pub whitelist: bool,
}

fn bool_true() -> bool { true }

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            filter: Vec::new(),
            whitelist: true,
        }
    }
}

/// Schedule store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,
}

fn default_db_path() -> String { "~/.taskboard/taskboard.db".into() }
fn default_table_prefix() -> String { "taskboard_".into() }

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            table_prefix: default_table_prefix(),
        }
    }
}

impl DatabaseConfig {
    /// Database path with `~` expanded.
    pub fn expanded_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.path).to_string())
    }

    /// Name of the table whose presence means the store is provisioned.
    pub fn tasks_table(&self) -> String {
        format!("{}tasks", self.table_prefix)
    }
}

/// Dashboard access wiring used by the CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// When non-empty, only these users are admitted.
    #[serde(default)]
    pub allowed_users: Vec<String>,
}

fn default_frequencies() -> Vec<Frequency> {
    vec![
        Frequency::new("Every Minute", "everyMinute"),
        Frequency::new("Every Five Minutes", "everyFiveMinutes"),
        Frequency::new("Every Ten Minutes", "everyTenMinutes"),
        Frequency::new("Every Fifteen Minutes", "everyFifteenMinutes"),
        Frequency::new("Every Thirty Minutes", "everyThirtyMinutes"),
        Frequency::new("Hourly", "hourly"),
        Frequency::new("Hourly At", "hourlyAt").with_param("Minutes of the Hour", "minutes"),
        Frequency::new("Daily", "daily"),
        Frequency::new("Daily At", "dailyAt").with_param("Time", "time"),
        Frequency::new("Twice Daily", "twiceDaily")
            .with_param("First Time", "first")
            .with_param("Second Time", "second"),
        Frequency::new("Weekly", "weekly"),
        Frequency::new("Weekly On", "weeklyOn")
            .with_param("Day of the Week", "day")
            .with_param("Time", "time"),
        Frequency::new("Monthly", "monthly"),
        Frequency::new("Monthly On", "monthlyOn")
            .with_param("Day of the Month", "day")
            .with_param("Time", "time"),
        Frequency::new("Quarterly", "quarterly"),
        Frequency::new("Yearly", "yearly"),
        Frequency::new("Weekdays", "weekdays"),
        Frequency::new("Weekends", "weekends"),
        Frequency::new("Mondays", "mondays"),
        Frequency::new("Tuesdays", "tuesdays"),
        Frequency::new("Wednesdays", "wednesdays"),
        Frequency::new("Thursdays", "thursdays"),
        Frequency::new("Fridays", "fridays"),
        Frequency::new("Saturdays", "saturdays"),
        Frequency::new("Sundays", "sundays"),
        Frequency::new("Between", "between")
            .with_param("Min", "min")
            .with_param("Max", "max"),
        Frequency::new("Unless Between", "unlessBetween")
            .with_param("Min", "min")
            .with_param("Max", "max"),
    ]
}
