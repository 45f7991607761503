//! # Taskboard - Scheduled-Task Dashboard Control Plane
//!
//! Usage:
//!   taskboard commands                 # Commands the dashboard can schedule
//!   taskboard init                     # Write a default config file
//!   taskboard frequencies --json       # Available schedule frequencies
//!   taskboard frequencies dailyAt      # One frequency and its parameters
//!   taskboard status                   # Is the schedule store provisioned?
//!   taskboard setup                    # Provision the schedule store
//!   taskboard check --user ops         # Would this caller be admitted?

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;
use taskboard_core::{Frequency, TaskboardConfig};
use taskboard_scheduler::{Dashboard, Readiness, SchedulerDb};
use taskboard_security::RequestContext;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "taskboard",
    version,
    about = "📅 Taskboard: scheduled-task dashboard control plane"
)]
struct Cli {
    /// Config file (default: ~/.taskboard/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// List schedulable commands, filtered and ordered
    Commands {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List configured schedule frequencies
    Frequencies {
        /// Show only this interval (e.g. dailyAt)
        interval: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Report whether the schedule store is provisioned
    Status,
    /// Create the schedule store tables
    Setup,
    /// Evaluate the access gate for a caller
    Check {
        /// Caller's user name
        #[arg(long)]
        user: Option<String>,
        /// Caller's address
        #[arg(long)]
        addr: Option<IpAddr>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "taskboard=debug,taskboard_scheduler=debug,taskboard_security=debug"
    } else {
        "taskboard=info"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    if let Commands::Init { force } = cli.command {
        let path = cli.config.unwrap_or_else(TaskboardConfig::default_path);
        if path.exists() && !force {
            return Err(anyhow!(
                "{} already exists, pass --force to overwrite",
                path.display()
            ));
        }
        TaskboardConfig::default().save_to(&path)?;
        println!("✅ Config written to {}", path.display());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => TaskboardConfig::load_from(path)?,
        None => TaskboardConfig::load()?,
    };

    let mut dashboard = Dashboard::from_config(&config)?;
    dashboard.allow_users(&config.dashboard.allowed_users);

    match cli.command {
        Commands::Init { .. } => unreachable!("handled before config load"),
        Commands::Commands { json } => {
            let commands = dashboard.get_commands()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&commands)?);
            } else {
                let width = commands.iter().map(|c| c.name.len()).max().unwrap_or(0);
                for command in &commands {
                    println!("{:<width$}  {}", command.name, command.description);
                }
            }
        }
        Commands::Frequencies { interval, json } => {
            let frequencies: Vec<&Frequency> = match &interval {
                Some(name) => vec![
                    dashboard
                        .frequency(name)
                        .ok_or_else(|| anyhow!("unknown frequency: {name}"))?,
                ],
                None => dashboard.frequencies().iter().collect(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&frequencies)?);
            } else {
                for frequency in frequencies {
                    print_frequency(frequency);
                }
            }
        }
        Commands::Status => match dashboard.readiness() {
            Readiness::Ready => println!("✅ Ready ({})", dashboard.tasks_table()),
            Readiness::NotProvisioned => {
                println!("⚠️  Not provisioned, run `taskboard setup`");
            }
            Readiness::StoreUnavailable(reason) => {
                tracing::debug!("Store check failed: {reason}");
                println!("⚠️  Not provisioned, run `taskboard setup`");
            }
        },
        Commands::Setup => {
            let db_path = config.database.expanded_path();
            let db = SchedulerDb::open(&db_path)?;
            db.migrate(&config.database.table_prefix)?;
            if !dashboard.is_enabled() {
                return Err(anyhow!(
                    "store at {} still not ready after setup",
                    db_path.display()
                ));
            }
            println!("✅ Schedule store ready at {}", db_path.display());
        }
        Commands::Check { user, addr } => {
            let mut context = RequestContext::new();
            context.user = user;
            context.remote_addr = addr;
            let admitted = dashboard.check(Some(&context));
            println!(
                "{} ({})",
                if admitted { "✅ admitted" } else { "❌ denied" },
                dashboard.gate().environment()
            );
            if !admitted {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn print_frequency(frequency: &Frequency) {
    let params: Vec<&str> = frequency.parameters.iter().map(|p| p.name.as_str()).collect();
    if params.is_empty() {
        println!("{:<24} {}", frequency.label, frequency.interval);
    } else {
        println!(
            "{:<24} {} ({})",
            frequency.label,
            frequency.interval,
            params.join(", ")
        );
    }
}
