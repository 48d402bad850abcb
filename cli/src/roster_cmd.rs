//! `probation roster` — roster lookup.

use clap::Parser;
use probation_core::roster::RosterClient;

use crate::AppContext;

#[derive(Debug, Parser)]
pub struct RosterArgs {
    /// Shift letter (e.g. A). Omit to list active members instead.
    #[arg(long)]
    shift: Option<String>,
}

pub async fn run(ctx: &AppContext, args: RosterArgs) -> anyhow::Result<()> {
    let client = RosterClient::new(ctx.store.clone());
    let entries = client.search_by_shift(args.shift.as_deref()).await?;
    if entries.is_empty() {
        println!("no members found");
    }
    for entry in &entries {
        let name = if entry.display_name.is_empty() {
            &entry.email
        } else {
            &entry.display_name
        };
        let shift = if entry.shift.is_empty() {
            "-"
        } else {
            entry.shift.as_str()
        };
        println!(
            "{name}  (shift {shift}, {})  {}",
            if entry.is_active { "active" } else { "inactive" },
            entry.email
        );
    }
    Ok(())
}
