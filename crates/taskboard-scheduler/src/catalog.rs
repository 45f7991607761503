//! Command catalog: filtered, deterministically ordered command listing.
//!
//! Commands without a namespace sort as if they lived in the empty
//! namespace, so `list` is keyed `:list` and lands ahead of every
//! `group:name` entry instead of being scattered among them.

use taskboard_core::error::Result;
use taskboard_core::{Command, CommandSource};
use taskboard_security::FilterPolicy;

/// Separator between a command's group and its name.
pub const NAMESPACE_SEPARATOR: char = ':';

/// A command paired with the key it is ordered by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub sort_key: String,
    pub command: Command,
}

impl CatalogEntry {
    pub fn new(command: Command) -> Self {
        Self {
            sort_key: sort_key(&command),
            command,
        }
    }
}

/// Ordering key for a command.
pub fn sort_key(command: &Command) -> String {
    let name = command.name();
    if name.contains(NAMESPACE_SEPARATOR) {
        name.to_string()
    } else {
        format!("{NAMESPACE_SEPARATOR}{name}")
    }
}

/// Stable ascending sort by [`sort_key`].
pub fn sort_catalog(commands: Vec<Command>) -> Vec<Command> {
    let mut entries: Vec<CatalogEntry> = commands.into_iter().map(CatalogEntry::new).collect();
    entries.sort_by(|a, b| a.sort_key.cmp(&b.sort_key));
    entries.into_iter().map(|entry| entry.command).collect()
}

/// List the source, apply the policy, then order the survivors.
///
/// Enumeration errors from the source are returned as-is.
pub fn assemble(source: &dyn CommandSource, policy: &FilterPolicy) -> Result<Vec<Command>> {
    let all = source.list_all()?;
    let total = all.len();
    let filtered = policy.apply(all);
    tracing::debug!(
        "📋 Catalog assembled: {} of {} commands ({} patterns, {:?})",
        filtered.len(),
        total,
        policy.patterns.len(),
        policy.mode
    );
    Ok(sort_catalog(filtered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CommandRegistry;
    use taskboard_core::TaskboardError;

    fn commands(names: &[&str]) -> Vec<Command> {
        names.iter().map(|n| Command::new(n, "")).collect()
    }

    fn names(commands: &[Command]) -> Vec<String> {
        commands.iter().map(|c| c.name.clone()).collect()
    }

    struct BrokenSource;

    impl CommandSource for BrokenSource {
        fn list_all(&self) -> Result<Vec<Command>> {
            Err(TaskboardError::CommandSource("registry offline".into()))
        }
    }

    #[test]
    fn test_sort_key() {
        assert_eq!(sort_key(&Command::new("list", "")), ":list");
        assert_eq!(sort_key(&Command::new("db:migrate", "")), "db:migrate");
        assert_eq!(sort_key(&Command::new(":odd", "")), ":odd");
    }

    #[test]
    fn test_bare_name_sorts_like_empty_namespace() {
        let sorted = sort_catalog(commands(&["db:migrate", "list", "app:deploy", "about"]));
        assert_eq!(names(&sorted), vec!["about", "list", "app:deploy", "db:migrate"]);
    }

    #[test]
    fn test_sort_is_stable_and_idempotent() {
        let input = vec![
            Command::new("b:one", "first"),
            Command::new("a:x", ""),
            Command::new("b:one", "second"),
        ];
        let once = sort_catalog(input);
        assert_eq!(once[1].description, "first");
        assert_eq!(once[2].description, "second");
        assert_eq!(sort_catalog(once.clone()), once);
    }

    #[test]
    fn test_assemble_whitelist() {
        let listed = commands(&["app:deploy", "db:migrate"]);
        let source = CommandRegistry::from_commands(listed).unwrap();
        let policy = FilterPolicy::whitelist(["app:*"]);
        let catalog = assemble(&source, &policy).unwrap();
        assert_eq!(names(&catalog), vec!["app:deploy"]);
    }

    #[test]
    fn test_assemble_blacklist_sorted() {
        let listed = commands(&["app:deploy", "db:migrate", "list"]);
        let source = CommandRegistry::from_commands(listed).unwrap();
        let policy = FilterPolicy::blacklist(["db:*"]);
        let catalog = assemble(&source, &policy).unwrap();
        assert_eq!(names(&catalog), vec!["list", "app:deploy"]);
    }

    #[test]
    fn test_assemble_does_not_mutate_source() {
        let source =
            CommandRegistry::from_commands(commands(&["z:last", "db:migrate", "list"])).unwrap();
        assemble(&source, &FilterPolicy::blacklist(["db:*"])).unwrap();
        assert_eq!(names(&source.list_all().unwrap()), vec!["z:last", "db:migrate", "list"]);
    }

    #[test]
    fn test_assemble_propagates_source_error() {
        let err = assemble(&BrokenSource, &FilterPolicy::allow_all()).unwrap_err();
        assert!(matches!(err, TaskboardError::CommandSource(ref m) if m == "registry offline"));
    }
}
