//! tenantctl: provision and remove per-tenant Neo4j accounts.
//!
//! # Usage
//!
//! ```bash
//! export NEO4J_URI=neo4j+s://abc123.databases.neo4j.io
//! export NEO4J_USERNAME=neo4j
//! export NEO4J_PASSWORD=...
//!
//! tenantctl add alice@example.com bob@example.com
//! tenantctl remove alice@example.com
//! tenantctl --format json --keep-going add carol@example.com dave@example.com
//! ```

use std::io::Write;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tenantry_core::control_plane::ControlPlane;
use tenantry_core::error::{TenantryError, TenantryResult};
use tenantry_core::models::identity::Email;
use tenantry_db::{DbConfig, DbManager};
use tenantry_provision::{CredentialGenerator, FailurePolicy, ProvisionConfig, ProvisionService};
use tracing_subscriber::EnvFilter;

mod output;

use output::OutputFormat;

#[derive(Parser)]
#[command(name = "tenantctl")]
#[command(version)]
#[command(about = "Provision and remove per-tenant Neo4j accounts", long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Output format
    #[arg(long, short, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Continue with the remaining emails after a failure
    #[arg(long, global = true)]
    keep_going: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Provision a database, user and role for each email
    Add {
        #[arg(required = true, value_name = "EMAIL")]
        emails: Vec<Email>,
    },
    /// Remove the user, database and role of each email
    Remove {
        #[arg(required = true, value_name = "EMAIL")]
        emails: Vec<Email>,
    },
}

#[derive(Debug, Clone, Copy)]
struct BatchOptions {
    format: OutputFormat,
    keep_going: bool,
}

impl BatchOptions {
    fn policy(self) -> FailurePolicy {
        if self.keep_going {
            FailurePolicy::Continue
        } else {
            FailurePolicy::Abort
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failures) => {
            eprintln!("{failures} tenant(s) failed");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tenantry=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load configuration, connect, and run the requested command.
///
/// Configuration is validated in full before any connection attempt.
async fn run(cli: Cli) -> TenantryResult<usize> {
    let db_config = DbConfig::from_env()?;
    let provision_config = ProvisionConfig::from_env()?;
    tracing::debug!(?db_config, ?provision_config, "Loaded configuration");

    let db = DbManager::connect(&db_config).await?;
    let service = ProvisionService::new(db, provision_config);

    let opts = BatchOptions {
        format: cli.format,
        keep_going: cli.keep_going,
    };
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Commands::Add { emails } => add(&service, &emails, opts, &mut stdout).await,
        Commands::Remove { emails } => remove(&service, &emails, opts, &mut stdout).await,
    }
}

/// Provision each email, printing every result as soon as it exists so
/// that credentials survive a later failure. Returns the failure count.
async fn add<C: ControlPlane, G: CredentialGenerator>(
    service: &ProvisionService<C, G>,
    emails: &[Email],
    opts: BatchOptions,
    out: &mut impl Write,
) -> TenantryResult<usize> {
    if opts.format == OutputFormat::Text {
        emit(out, &output::batch_header("Adding", "provisioned", emails))?;
    }

    let failures = service
        .provision_each(emails, opts.policy(), |tenant| {
            emit(out, &output::provisioned(opts.format, &tenant)?)
        })
        .await?;
    Ok(report_failures(&failures))
}

/// Remove each email, printing a confirmation per tenant. Returns the
/// failure count.
async fn remove<C: ControlPlane, G: CredentialGenerator>(
    service: &ProvisionService<C, G>,
    emails: &[Email],
    opts: BatchOptions,
    out: &mut impl Write,
) -> TenantryResult<usize> {
    if opts.format == OutputFormat::Text {
        emit(out, &output::batch_header("Removing", "removed", emails))?;
    }

    let failures = service
        .remove_each(emails, opts.policy(), |tenant| {
            emit(out, &output::removed(opts.format, &tenant)?)
        })
        .await?;
    Ok(report_failures(&failures))
}

fn report_failures(failures: &[TenantryError]) -> usize {
    for err in failures {
        eprintln!("Error: {err}");
    }
    failures.len()
}

fn emit(out: &mut impl Write, line: &str) -> TenantryResult<()> {
    writeln!(out, "{line}").map_err(|e| TenantryError::Internal(format!("cannot write output: {e}")))
}
