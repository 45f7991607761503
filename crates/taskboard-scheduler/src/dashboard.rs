//! Dashboard: owns the wiring between config, collaborators and the gate.

use std::collections::HashSet;

use taskboard_core::error::Result;
use taskboard_core::{Command, CommandSource, Frequency, ScheduleStore, TaskboardConfig};
use taskboard_security::{AccessGate, Environment, FilterPolicy, RequestContext};

use crate::catalog;
use crate::frequencies::FrequencyRegistry;
use crate::persistence::SqliteScheduleStore;
use crate::readiness::{Readiness, ReadinessProbe};
use crate::registry::CommandRegistry;

/// Control plane for one dashboard instance.
pub struct Dashboard {
    source: Box<dyn CommandSource>,
    store: Box<dyn ScheduleStore>,
    policy: FilterPolicy,
    frequencies: FrequencyRegistry,
    gate: AccessGate,
    tasks_table: String,
}

impl Dashboard {
    /// Build a dashboard over the given collaborators.
    ///
    /// The deployment mode comes from `[app] env` or `TASKBOARD_ENV`.
    pub fn new(
        config: &TaskboardConfig,
        source: Box<dyn CommandSource>,
        store: Box<dyn ScheduleStore>,
    ) -> Self {
        let environment = Environment::parse(&config.app.env_name());
        Self::with_environment(config, environment, source, store)
    }

    /// Build a dashboard running in an explicit deployment mode.
    pub fn with_environment(
        config: &TaskboardConfig,
        environment: Environment,
        source: Box<dyn CommandSource>,
        store: Box<dyn ScheduleStore>,
    ) -> Self {
        tracing::debug!("Dashboard environment: {environment}");
        Self {
            source,
            store,
            policy: FilterPolicy::from_config(&config.catalog),
            frequencies: FrequencyRegistry::new(config.frequencies.clone()),
            gate: AccessGate::new(environment),
            tasks_table: config.database.tasks_table(),
        }
    }

    /// Dashboard backed by the config's `[[commands]]` and SQLite database.
    pub fn from_config(config: &TaskboardConfig) -> Result<Self> {
        let registry = CommandRegistry::from_commands(config.commands.iter().cloned())?;
        let store = SqliteScheduleStore::new(config.database.expanded_path());
        Ok(Self::new(config, Box::new(registry), Box::new(store)))
    }

    /// Filtered, ordered commands available for scheduling.
    pub fn get_commands(&self) -> Result<Vec<Command>> {
        catalog::assemble(self.source.as_ref(), &self.policy)
    }

    /// Configured frequencies, unchanged.
    pub fn frequencies(&self) -> &[Frequency] {
        self.frequencies.all()
    }

    /// The frequency with the given interval name, if configured.
    pub fn frequency(&self, interval: &str) -> Option<&Frequency> {
        self.frequencies.find(interval)
    }

    /// Detailed store readiness.
    pub fn readiness(&self) -> Readiness {
        ReadinessProbe::new(self.store.as_ref(), &self.tasks_table).status()
    }

    /// Whether the schedule store has been provisioned.
    pub fn is_enabled(&self) -> bool {
        ReadinessProbe::new(self.store.as_ref(), &self.tasks_table).is_enabled()
    }

    /// Install the admission predicate. Later calls replace earlier ones.
    pub fn auth<F>(&mut self, predicate: F) -> &mut AccessGate
    where
        F: Fn(Option<&RequestContext>) -> bool + Send + Sync + 'static,
    {
        self.gate.configure(predicate)
    }

    /// Admission decision for a caller.
    pub fn check(&self, context: Option<&RequestContext>) -> bool {
        self.gate.check(context)
    }

    /// Admit only the named users. An empty list keeps the gate as it is.
    pub fn allow_users(&mut self, users: &[String]) {
        if users.is_empty() {
            return;
        }
        let allowed: HashSet<String> = users.iter().cloned().collect();
        self.auth(move |ctx| {
            ctx.and_then(|c| c.user.as_deref())
                .is_some_and(|user| allowed.contains(user))
        });
    }

    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    /// Table whose presence marks the store as provisioned.
    pub fn tasks_table(&self) -> &str {
        &self.tasks_table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::SchedulerDb;
    use std::sync::Mutex;
    use taskboard_core::TaskboardError;

    /// Source whose listing can be swapped between calls.
    struct SharedSource(std::sync::Arc<Mutex<Vec<Command>>>);

    impl CommandSource for SharedSource {
        fn list_all(&self) -> Result<Vec<Command>> {
            Ok(self.0.lock().unwrap().clone())
        }
    }

    struct FailingSource;

    impl CommandSource for FailingSource {
        fn list_all(&self) -> Result<Vec<Command>> {
            Err(TaskboardError::CommandSource("boom".into()))
        }
    }

    struct MemoryStore(bool);

    impl ScheduleStore for MemoryStore {
        fn has_table(&self, _name: &str) -> Result<bool> {
            Ok(self.0)
        }
    }

    struct UnreachableStore;

    impl ScheduleStore for UnreachableStore {
        fn has_table(&self, _name: &str) -> Result<bool> {
            Err(TaskboardError::Database("unreachable".into()))
        }
    }

    fn config(filter: &[&str], whitelist: bool) -> TaskboardConfig {
        let mut config = TaskboardConfig::default();
        config.catalog.filter = filter.iter().map(|s| s.to_string()).collect();
        config.catalog.whitelist = whitelist;
        config
    }

    /// Dashboard in production mode, independent of `TASKBOARD_ENV`.
    fn dashboard(
        cfg: &TaskboardConfig,
        source: Box<dyn CommandSource>,
        store: Box<dyn ScheduleStore>,
    ) -> Dashboard {
        Dashboard::with_environment(cfg, Environment::Production, source, store)
    }

    fn open_dashboard(environment: Environment) -> Dashboard {
        Dashboard::with_environment(
            &config(&[], true),
            environment,
            registry(&[]),
            Box::new(MemoryStore(true)),
        )
    }

    fn registry(names: &[&str]) -> Box<dyn CommandSource> {
        let commands = names.iter().map(|n| Command::new(n, ""));
        Box::new(CommandRegistry::from_commands(commands).unwrap())
    }

    fn names(commands: &[Command]) -> Vec<&str> {
        commands.iter().map(|c| c.name()).collect()
    }

    #[test]
    fn test_whitelist_scenario() {
        let dash = dashboard(
            &config(&["app:*"], true),
            registry(&["app:deploy", "db:migrate"]),
            Box::new(MemoryStore(true)),
        );
        assert_eq!(names(&dash.get_commands().unwrap()), vec!["app:deploy"]);
    }

    #[test]
    fn test_blacklist_scenario() {
        let dash = dashboard(
            &config(&["db:*"], false),
            registry(&["app:deploy", "db:migrate", "list"]),
            Box::new(MemoryStore(true)),
        );
        assert_eq!(names(&dash.get_commands().unwrap()), vec!["list", "app:deploy"]);
    }

    #[test]
    fn test_catalog_reflects_source_at_call_time() {
        let shared = std::sync::Arc::new(Mutex::new(vec![Command::new("a:one", "")]));
        let dash = dashboard(
            &config(&[], true),
            Box::new(SharedSource(shared.clone())),
            Box::new(MemoryStore(true)),
        );
        assert_eq!(names(&dash.get_commands().unwrap()), vec!["a:one"]);

        shared.lock().unwrap().push(Command::new("list", ""));
        assert_eq!(names(&dash.get_commands().unwrap()), vec!["list", "a:one"]);
    }

    #[test]
    fn test_source_failure_propagates() {
        let dash = dashboard(
            &config(&[], true),
            Box::new(FailingSource),
            Box::new(MemoryStore(true)),
        );
        assert!(matches!(dash.get_commands(), Err(TaskboardError::CommandSource(_))));
    }

    #[test]
    fn test_frequencies_verbatim() {
        let mut cfg = config(&[], true);
        cfg.frequencies = vec![Frequency::new("Daily", "daily")];
        let dash = dashboard(&cfg, registry(&[]), Box::new(MemoryStore(true)));
        assert_eq!(dash.frequencies(), cfg.frequencies.as_slice());
    }

    #[test]
    fn test_frequency_lookup() {
        let mut cfg = config(&[], true);
        cfg.frequencies = vec![
            Frequency::new("Daily", "daily"),
            Frequency::new("Daily At", "dailyAt").with_param("Time", "time"),
        ];
        let dash = dashboard(&cfg, registry(&[]), Box::new(MemoryStore(true)));

        assert_eq!(dash.frequency("dailyAt"), Some(&cfg.frequencies[1]));
        assert!(dash.frequency("DailyAt").is_none());
        assert!(dash.frequency("fortnightly").is_none());
    }

    #[test]
    fn test_is_enabled() {
        let cfg = config(&[], true);
        let ready = dashboard(&cfg, registry(&[]), Box::new(MemoryStore(true)));
        let empty = dashboard(&cfg, registry(&[]), Box::new(MemoryStore(false)));
        let down = dashboard(&cfg, registry(&[]), Box::new(UnreachableStore));

        assert!(ready.is_enabled());
        assert!(!empty.is_enabled());
        assert_eq!(empty.readiness(), Readiness::NotProvisioned);
        assert!(!down.is_enabled());
        assert!(matches!(down.readiness(), Readiness::StoreUnavailable(_)));
    }

    #[test]
    fn test_is_enabled_against_sqlite() {
        let dir = std::env::temp_dir().join("taskboard-dashboard-test");
        std::fs::remove_dir_all(&dir).ok();
        let mut cfg = config(&[], true);
        cfg.database.path = dir.join("dash.db").to_string_lossy().to_string();

        let dash = Dashboard::from_config(&cfg).unwrap();
        assert!(!dash.is_enabled());

        SchedulerDb::open(&cfg.database.expanded_path())
            .unwrap()
            .migrate(&cfg.database.table_prefix)
            .unwrap();
        assert!(dash.is_enabled());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_from_config_rejects_duplicate_commands() {
        let mut cfg = TaskboardConfig::default();
        cfg.commands = vec![Command::new("list", ""), Command::new("list", "")];
        assert!(Dashboard::from_config(&cfg).is_err());
    }

    #[test]
    fn test_default_gate_by_environment() {
        let local = open_dashboard(Environment::Local);
        let dev = open_dashboard(Environment::Development);
        let prod = open_dashboard(Environment::Production);
        let ctx = RequestContext::new().with_user("someone");

        assert!(local.check(Some(&ctx)));
        assert!(local.check(None));
        assert!(dev.check(None));
        assert!(!prod.check(Some(&ctx)));
        assert!(!prod.check(None));
    }

    #[test]
    fn test_auth_overrides_default() {
        let mut dash = open_dashboard(Environment::Production);
        dash.auth(|ctx| ctx.is_some_and(|c| c.user.as_deref() == Some("ops")));

        assert!(dash.gate().is_configured());
        assert!(dash.check(Some(&RequestContext::new().with_user("ops"))));
        assert!(!dash.check(Some(&RequestContext::new().with_user("dev"))));
        assert!(!dash.check(None));

        dash.auth(|_| true);
        assert!(dash.check(None));
    }

    #[test]
    fn test_allow_users_admits_listed_only() {
        let mut dash = open_dashboard(Environment::Local);
        dash.allow_users(&["ops".to_string(), "admin".to_string()]);

        assert!(dash.gate().is_configured());
        assert!(dash.check(Some(&RequestContext::new().with_user("ops"))));
        assert!(dash.check(Some(&RequestContext::new().with_user("admin"))));
        assert!(!dash.check(Some(&RequestContext::new().with_user("guest"))));
    }

    #[test]
    fn test_allow_users_denies_missing_user() {
        let mut dash = open_dashboard(Environment::Local);
        dash.allow_users(&["ops".to_string()]);

        assert!(!dash.check(None));
        assert!(!dash.check(Some(&RequestContext::new())));
    }

    #[test]
    fn test_allow_users_empty_keeps_default() {
        let mut local = open_dashboard(Environment::Local);
        let mut prod = open_dashboard(Environment::Production);
        local.allow_users(&[]);
        prod.allow_users(&[]);

        assert!(!local.gate().is_configured());
        assert!(local.check(Some(&RequestContext::new().with_user("guest"))));
        assert!(!prod.check(Some(&RequestContext::new().with_user("ops"))));
    }
}
