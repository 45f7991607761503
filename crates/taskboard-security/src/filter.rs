//! Command filter policy.
//!
//! Patterns are tried in order against each command name; the first match
//! decides. In whitelist mode a match keeps the command and no match drops
//! it, blacklist mode is the mirror image. With no patterns every command
//! passes regardless of mode.

use crate::glob::glob_match;
use serde::{Deserialize, Serialize};
use taskboard_core::Command;
use taskboard_core::config::CatalogConfig;

/// How a pattern match is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Only matching commands pass.
    Whitelist,
    /// Matching commands are excluded.
    Blacklist,
}

/// Ordered glob patterns plus the mode they are applied in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPolicy {
    pub patterns: Vec<String>,
    pub mode: FilterMode,
}

impl FilterPolicy {
    pub fn new(patterns: Vec<String>, mode: FilterMode) -> Self {
        Self { patterns, mode }
    }

    /// Only commands matching one of `patterns` pass.
    pub fn whitelist<S: Into<String>>(patterns: impl IntoIterator<Item = S>) -> Self {
        Self::new(patterns.into_iter().map(Into::into).collect(), FilterMode::Whitelist)
    }

    /// Commands matching one of `patterns` are dropped.
    pub fn blacklist<S: Into<String>>(patterns: impl IntoIterator<Item = S>) -> Self {
        Self::new(patterns.into_iter().map(Into::into).collect(), FilterMode::Blacklist)
    }

    /// Policy that lets everything through.
    pub fn allow_all() -> Self {
        Self::new(Vec::new(), FilterMode::Whitelist)
    }

    /// Build the policy from `[catalog]` settings.
    pub fn from_config(config: &CatalogConfig) -> Self {
        let mode = if config.whitelist {
            FilterMode::Whitelist
        } else {
            FilterMode::Blacklist
        };
        Self::new(config.filter.clone(), mode)
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The first pattern matching `name`, if any.
    pub fn first_match(&self, name: &str) -> Option<&str> {
        self.patterns
            .iter()
            .map(String::as_str)
            .find(|pattern| glob_match(pattern, name))
    }

    /// Whether a command with this name is kept.
    pub fn admits(&self, name: &str) -> bool {
        if self.is_empty() {
            return true;
        }
        let matched = self.first_match(name).is_some();
        match self.mode {
            FilterMode::Whitelist => matched,
            FilterMode::Blacklist => !matched,
        }
    }

    /// Keep the admitted commands, preserving their order.
    pub fn apply(&self, commands: Vec<Command>) -> Vec<Command> {
        if self.is_empty() {
            return commands;
        }
        commands
            .into_iter()
            .filter(|command| self.admits(command.name()))
            .collect()
    }
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self::allow_all()
    }
}
