//! In-memory command source: commands declared in config or registered by the host.

use taskboard_core::error::{Result, TaskboardError};
use taskboard_core::{Command, CommandSource};

/// Commands kept in registration order.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry, rejecting duplicate names.
    pub fn from_commands(commands: impl IntoIterator<Item = Command>) -> Result<Self> {
        let mut registry = Self::new();
        for command in commands {
            registry.register(command)?;
        }
        Ok(registry)
    }

    /// Register a command. Returns error if the name is already taken.
    pub fn register(&mut self, command: Command) -> Result<()> {
        if command.name.trim().is_empty() {
            return Err(TaskboardError::Config("command name must not be empty".into()));
        }
        if self.get(&command.name).is_some() {
            return Err(TaskboardError::DuplicateCommand(command.name));
        }
        self.commands.push(command);
        Ok(())
    }

    /// Look up a command by name.
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl CommandSource for CommandRegistry {
    fn list_all(&self) -> Result<Vec<Command>> {
        Ok(self.commands.clone())
    }
}
