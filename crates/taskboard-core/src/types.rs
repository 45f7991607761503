//! Data types shared between the catalog, the gate and the CLI.

use serde::{Deserialize, Serialize};

/// A runnable command as listed by a [`CommandSource`](crate::traits::CommandSource).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Unique identifier, optionally namespaced (`"db:migrate"`).
    pub name: String,
    /// Display text. Not interpreted by Taskboard.
    #[serde(default)]
    pub description: String,
}

impl Command {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    /// The identifier used for filtering and ordering.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A schedule frequency offered by the dashboard (e.g. "Daily At").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frequency {
    pub label: String,
    pub interval: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<FrequencyParameter>,
}

/// An input a frequency needs before it can be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyParameter {
    pub label: String,
    pub name: String,
}

impl Frequency {
    pub fn new(label: &str, interval: &str) -> Self {
        Self {
            label: label.to_string(),
            interval: interval.to_string(),
            parameters: Vec::new(),
        }
    }

    /// Add a required parameter.
    pub fn with_param(mut self, label: &str, name: &str) -> Self {
        self.parameters.push(FrequencyParameter {
            label: label.to_string(),
            name: name.to_string(),
        });
        self
    }
}
