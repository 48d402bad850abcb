//! `probation` — command-line front end for the probation tracker.
//!
//! Thin wrapper over the `probation-core` access layers, backed by the
//! single-file JSON store. Stands in for the web UI: catalog
//! management, monthly evaluations, driver check-offs, roster lookup,
//! and department reference info.

mod catalog_cmd;
mod config;
mod department_cmd;
mod driver_cmd;
mod monthly_cmd;
mod roster_cmd;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use probation_core::Principal;
use probation_core::roles::RolesClient;
use probation_store::{DocumentStore, JsonFileStore};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Shared handles every subcommand needs.
pub(crate) struct AppContext {
    pub store: Arc<dyn DocumentStore>,
    /// Identity from the config file, if any. Commands that stamp
    /// evaluator fields degrade to empty fields without it, matching
    /// the access-layer defaults.
    pub evaluator: Option<Principal>,
}

#[derive(Debug, Parser)]
#[command(
    name = "probation",
    about = "Firefighter probationer training tracker",
    version
)]
struct Cli {
    /// Config file (defaults to config.toml under the user config dir).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON store file (overrides the config file).
    #[arg(long, global = true, value_name = "FILE")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage the monthly skill catalog.
    Catalog(catalog_cmd::CatalogCli),
    /// Record and review monthly skill evaluations.
    Monthly(monthly_cmd::MonthlyCli),
    /// Driver task catalog and check-offs.
    Driver(driver_cmd::DriverCli),
    /// Look up roster members by shift (or active members without one).
    Roster(roster_cmd::RosterArgs),
    /// Show department reference information.
    Department,
    /// Check whether the configured identity is a catalog owner.
    Owner,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;
    let store_path = cli
        .store
        .or_else(|| cfg.store_path.clone())
        .unwrap_or_else(config::default_store_path);
    debug!(store = %store_path.display(), "opening store");
    let store: Arc<dyn DocumentStore> = Arc::new(JsonFileStore::open(&store_path)?);
    let ctx = AppContext {
        store,
        evaluator: cfg.evaluator.map(Principal::from),
    };

    match cli.command {
        Command::Catalog(cmd) => catalog_cmd::run(&ctx, cmd).await,
        Command::Monthly(cmd) => monthly_cmd::run(&ctx, cmd).await,
        Command::Driver(cmd) => driver_cmd::run(&ctx, cmd).await,
        Command::Roster(args) => roster_cmd::run(&ctx, args).await,
        Command::Department => department_cmd::run(&ctx).await,
        Command::Owner => run_owner(&ctx).await,
    }
}

async fn run_owner(ctx: &AppContext) -> anyhow::Result<()> {
    let roles = RolesClient::new(ctx.store.clone());
    let is_owner = roles.is_owner(ctx.evaluator.as_ref()).await?;
    match &ctx.evaluator {
        Some(principal) => {
            let who = if principal.email.is_empty() {
                &principal.uid
            } else {
                &principal.email
            };
            println!("{who}: {}", if is_owner { "owner" } else { "not an owner" });
        }
        None => println!("no evaluator configured: not an owner"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
