//! `probation driver` — driver task catalog and check-offs.

use clap::{Parser, Subcommand};
use probation_core::driver::{self, DriverClient, NewDriverSignoff};
use probation_core::signoff::SignoffResult;

use crate::AppContext;

#[derive(Debug, Parser)]
pub struct DriverCli {
    #[command(subcommand)]
    command: DriverSubcommand,
}

#[derive(Debug, Subcommand)]
enum DriverSubcommand {
    /// List the driver task catalog.
    Tasks {
        /// Case-insensitive substring over task id + title.
        #[arg(long)]
        filter: Option<String>,
    },
    /// Record a pass/fail check-off for one task.
    Record {
        /// Roster id of the probationer.
        #[arg(long)]
        user: String,
        /// Task id from the driver catalog.
        #[arg(long)]
        task: String,
        /// pass or fail.
        #[arg(long)]
        result: SignoffResult,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// List check-offs for a probationer, newest first.
    List {
        /// Roster id of the probationer.
        #[arg(long)]
        user: String,
    },
}

pub async fn run(ctx: &AppContext, cli: DriverCli) -> anyhow::Result<()> {
    let client = DriverClient::new(ctx.store.clone());
    match cli.command {
        DriverSubcommand::Tasks { filter } => {
            let tasks = client.tasks().await?;
            let shown = driver::filter_tasks(&tasks, filter.as_deref().unwrap_or(""));
            if shown.is_empty() {
                println!("no tasks match");
            }
            for task in shown {
                if task.category.is_empty() {
                    println!("{} [{}]", task.title, task.id);
                } else {
                    println!("{} [{}] ({})", task.title, task.id, task.category);
                }
                if !task.details.is_empty() {
                    println!("    {}", task.details);
                }
            }
        }
        DriverSubcommand::Record {
            user,
            task,
            result,
            notes,
        } => {
            let evaluator_id = ctx
                .evaluator
                .as_ref()
                .map(|p| p.uid.clone())
                .unwrap_or_default();
            let id = client
                .record(NewDriverSignoff {
                    user_id: user,
                    task_id: task.clone(),
                    result,
                    notes,
                    evaluator_id,
                })
                .await?;
            println!("recorded {result} for {task} ({id})");
        }
        DriverSubcommand::List { user } => {
            let signoffs = client.list_signoffs(&user).await?;
            if signoffs.is_empty() {
                println!("no entries");
            }
            for signoff in signoffs {
                println!(
                    "{}  {:4}  {}  {}",
                    signoff.created_at.format("%Y-%m-%d %H:%M"),
                    signoff.result.as_str(),
                    signoff.task_id,
                    if signoff.notes.is_empty() {
                        "—"
                    } else {
                        signoff.notes.as_str()
                    }
                );
            }
        }
    }
    Ok(())
}
