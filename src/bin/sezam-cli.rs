//! Sezam admin CLI.
//!
//! Command-line front end for the access controller: trigger simulated
//! scan cycles, manage the authorized-credential registry and inspect
//! the access event journal. A thin adapter over the command layer;
//! all decisions happen in the core.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sezam::{
    access::{AccessController, GrantPolicy},
    audit::EventLog,
    command::{
        AddKeyCommand, AppContext, Command, CommandExecute, ListEventsCommand, ListKeysCommand,
        RemoveKeyCommand, RemoveSelector, Reply, ScanCommand,
    },
    config::Settings,
    device::{SimulatedLock, SimulatedReader},
    registry::{RegistryEngine, RegistryStore},
};

/// Main CLI argument structure.
#[derive(Parser)]
#[command(name = "sezam-cli")]
#[command(author = "Sezam Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sezam CLI - administer the access controller", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the credential registry database
    #[arg(long, env = "SEZAM_DB_PATH")]
    db: Option<String>,
    /// Path to the access event journal
    #[arg(long, env = "SEZAM_EVENT_LOG_PATH")]
    journal: Option<String>,
    /// Enable verbose (debug) output
    #[arg(short, long)]
    verbose: bool,
    /// Suppress most logs (warn/error only)
    #[arg(short = 'q', long)]
    quiet: bool,
    /// Output format for command replies
    #[arg(long, value_enum, default_value = "pretty")]
    output: OutputFormat,
    #[command(subcommand)]
    command: Commands,
}

/// CLI output format.
#[derive(Clone, Debug, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Pretty,
    /// JSON output
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one scan cycle; without a credential the simulated reader
    /// supplies one
    Scan {
        /// Credential id to present; omit to use the simulated reader
        credential: Option<String>,
    },
    /// Authorize a credential
    Add {
        /// Credential id to authorize
        credential: String,
        /// Optional human-readable label
        #[arg(default_value = "")]
        label: String,
    },
    /// Revoke credentials by id or by label (label removes every match)
    Remove {
        /// Credential id to revoke
        #[arg(long, conflicts_with = "label", required_unless_present = "label")]
        id: Option<String>,
        /// Label to revoke; removes every record with this exact label
        #[arg(long)]
        label: Option<String>,
    },
    /// List authorized credentials
    List,
    /// Show recorded access events
    Events {
        /// Show only the most recent N events
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    let mut settings = Settings::load().context("loading configuration")?;
    if let Some(db) = cli.db.clone() {
        settings.db_path = db;
    }
    if let Some(journal) = cli.journal.clone() {
        settings.event_log_path = Some(journal);
    }

    let ctx = build_context(&settings)?;
    let command = match cli.command {
        Commands::Scan { credential } => Command::Scan(ScanCommand { credential }),
        Commands::Add { credential, label } => {
            Command::AddKey(AddKeyCommand { credential, label })
        }
        Commands::Remove { id, label } => {
            let selector = match (id, label) {
                (Some(id), _) => RemoveSelector::ById(id),
                (None, Some(label)) => RemoveSelector::ByLabel(label),
                (None, None) => unreachable!("clap enforces one of --id/--label"),
            };
            Command::RemoveKey(RemoveKeyCommand { selector })
        }
        Commands::List => Command::ListKeys(ListKeysCommand),
        Commands::Events { limit } => Command::ListEvents(ListEventsCommand { limit }),
    };

    let reply = command
        .execute(&ctx)
        .await
        .with_context(|| format!("executing {}", command.command_name()))?;

    match cli.output {
        OutputFormat::Pretty => print_pretty(&reply),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reply)?),
    }

    Ok(())
}

fn build_context(settings: &Settings) -> anyhow::Result<AppContext> {
    let registry: Arc<dyn RegistryStore> =
        Arc::new(RegistryEngine::initialize(settings).context("opening credential registry")?);
    let events = Arc::new(match &settings.event_log_path {
        Some(path) => EventLog::with_journal(path).context("opening event journal")?,
        None => EventLog::in_memory(),
    });
    let controller = Arc::new(AccessController::new(
        Arc::clone(&registry),
        Arc::new(SimulatedLock::new()),
        Arc::clone(&events),
        GrantPolicy::from_settings(settings),
    ));

    Ok(AppContext {
        registry,
        controller,
        events,
        reader: Arc::new(SimulatedReader::new()),
    })
}

fn print_pretty(reply: &Reply) {
    match reply {
        Reply::Scan {
            credential_id,
            outcome,
            ..
        } => match outcome {
            sezam::audit::Outcome::Granted => {
                println!("Read credential: {credential_id}. Access granted!")
            }
            sezam::audit::Outcome::Denied => {
                println!("Read credential: {credential_id}. Access denied!")
            }
        },
        Reply::Added { credential_id } => {
            println!("Key {credential_id} added to the registry.")
        }
        Reply::AlreadyExists { credential_id } => {
            println!("Key {credential_id} already exists in the registry.")
        }
        Reply::Removed { count } => println!("Removed {count} entr{}.", plural_y(*count)),
        Reply::NotFound => println!("No matching entries found."),
        Reply::Keys(keys) => {
            if keys.is_empty() {
                println!("No entries found in the registry.");
            }
            for key in keys {
                println!("Key: {}, Label: {}", key.credential_id, key.label);
            }
        }
        Reply::Events(events) => {
            if events.is_empty() {
                println!("No events recorded.");
            }
            for event in events {
                println!("{event}");
            }
        }
    }
}

fn plural_y(count: usize) -> &'static str {
    if count == 1 {
        "y"
    } else {
        "ies"
    }
}
