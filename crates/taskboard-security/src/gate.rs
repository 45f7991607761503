//! Dashboard access gate.
//!
//! The gate holds at most one admission predicate, installed by whoever
//! wires the dashboard together during startup. Installing again replaces
//! the previous predicate. With nothing installed the gate admits callers
//! only when the process runs in a local or development deployment.

use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Admission predicate. Receives the request context when one is available.
pub type AuthPredicate = Arc<dyn Fn(Option<&RequestContext>) -> bool + Send + Sync>;

/// Deployment mode the process is running in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Local,
    Development,
    Staging,
    Production,
    Other(String),
}

impl Environment {
    /// Parse a mode name such as `"local"` or `"prod"`. Unknown names are kept verbatim.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "local" => Self::Local,
            "development" | "dev" => Self::Development,
            "staging" => Self::Staging,
            "production" | "prod" => Self::Production,
            _ => Self::Other(name.trim().to_string()),
        }
    }

    /// Local and development deployments get the open default.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local | Self::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Development => write!(f, "development"),
            Self::Staging => write!(f, "staging"),
            Self::Production => write!(f, "production"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

/// What a predicate may know about the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub user: Option<String>,
    pub remote_addr: Option<IpAddr>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: &str) -> Self {
        self.user = Some(user.to_string());
        self
    }

    pub fn with_remote_addr(mut self, addr: IpAddr) -> Self {
        self.remote_addr = Some(addr);
        self
    }
}

/// Decides whether a caller may view the dashboard.
#[derive(Clone)]
pub struct AccessGate {
    environment: Environment,
    predicate: Option<AuthPredicate>,
}

impl AccessGate {
    /// A gate with no predicate installed.
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            predicate: None,
        }
    }

    /// Install the admission predicate, replacing any earlier one.
    pub fn configure<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(Option<&RequestContext>) -> bool + Send + Sync + 'static,
    {
        if self.predicate.is_some() {
            tracing::info!("🔐 Access gate predicate replaced");
        } else {
            tracing::info!("🔐 Access gate predicate installed");
        }
        self.predicate = Some(Arc::new(predicate));
        self
    }

    /// Admission decision for `context`.
    ///
    /// Panics raised by an installed predicate are not caught.
    pub fn check(&self, context: Option<&RequestContext>) -> bool {
        match &self.predicate {
            Some(predicate) => predicate(context),
            None => self.default_decision(),
        }
    }

    /// Whether a predicate has been installed.
    pub fn is_configured(&self) -> bool {
        self.predicate.is_some()
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    fn default_decision(&self) -> bool {
        self.environment.is_local()
    }
}

impl fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessGate")
            .field("environment", &self.environment)
            .field("configured", &self.is_configured())
            .finish()
    }
}
