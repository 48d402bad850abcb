//! `probation catalog` — monthly skill catalog management.

use anyhow::bail;
use clap::{Parser, Subcommand};
use probation_core::Month;
use probation_core::catalog::{CatalogClient, Skill, SkillPatch, slugify_title};

use crate::AppContext;

#[derive(Debug, Parser)]
pub struct CatalogCli {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    /// List the catalog, optionally for one month.
    List {
        /// Month 1-6.
        #[arg(long, short)]
        month: Option<u8>,
    },
    /// Add a skill to a month.
    Add {
        /// Month 1-6.
        #[arg(long, short)]
        month: u8,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        details: String,
        /// Skill id (derived from the title when omitted).
        #[arg(long)]
        id: Option<String>,
    },
    /// Remove a skill from a month.
    Remove {
        #[arg(long, short)]
        month: u8,
        #[arg(long)]
        id: String,
    },
    /// Edit a skill's title and/or details.
    Edit {
        #[arg(long, short)]
        month: u8,
        #[arg(long)]
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        details: Option<String>,
    },
    /// Move a skill one position up or down within its month.
    Move {
        #[arg(long, short)]
        month: u8,
        #[arg(long)]
        id: String,
        #[arg(long, conflicts_with = "down")]
        up: bool,
        #[arg(long)]
        down: bool,
    },
}

fn parse_month(month: u8) -> anyhow::Result<Month> {
    Ok(Month::try_from(month)?)
}

pub async fn run(ctx: &AppContext, cli: CatalogCli) -> anyhow::Result<()> {
    let client = CatalogClient::new(ctx.store.clone());
    match cli.command {
        CatalogSubcommand::List { month } => {
            let catalog = client.load().await?;
            let months: Vec<Month> = match month {
                Some(n) => vec![parse_month(n)?],
                None => Month::ALL.to_vec(),
            };
            for m in months {
                println!("{m}");
                let skills = catalog.month(m);
                if skills.is_empty() {
                    println!("  (no skills configured)");
                }
                for (index, skill) in skills.iter().enumerate() {
                    if skill.details.is_empty() {
                        println!("  {}. {} [{}]", index + 1, skill.title, skill.id);
                    } else {
                        println!(
                            "  {}. {} [{}] — {}",
                            index + 1,
                            skill.title,
                            skill.id,
                            skill.details
                        );
                    }
                }
            }
        }
        CatalogSubcommand::Add {
            month,
            title,
            details,
            id,
        } => {
            let month = parse_month(month)?;
            let title = title.trim().to_string();
            if title.is_empty() {
                bail!("skill title must not be empty");
            }
            let id = id.unwrap_or_else(|| slugify_title(&title));
            client
                .add_skill(
                    month,
                    Skill {
                        id: id.clone(),
                        title,
                        details: details.trim().to_string(),
                    },
                )
                .await?;
            println!("added {id} to {month}");
        }
        CatalogSubcommand::Remove { month, id } => {
            let month = parse_month(month)?;
            client.remove_skill(month, &id).await?;
            println!("removed {id} from {month}");
        }
        CatalogSubcommand::Edit {
            month,
            id,
            title,
            details,
        } => {
            let month = parse_month(month)?;
            client
                .update_skill(month, &id, SkillPatch { title, details })
                .await?;
            println!("updated {id} in {month}");
        }
        CatalogSubcommand::Move {
            month,
            id,
            up,
            down,
        } => {
            let month = parse_month(month)?;
            let delta = match (up, down) {
                (true, false) => -1,
                (false, true) => 1,
                _ => bail!("pass exactly one of --up or --down"),
            };
            client.move_skill(month, &id, delta).await?;
            println!("moved {id} in {month}");
        }
    }
    Ok(())
}
