//! `probation monthly` — monthly skill evaluations.

use clap::{Parser, Subcommand};
use probation_core::Month;
use probation_core::signoff::{MonthlySignoffClient, NewMonthlySignoff, SignoffResult};

use crate::AppContext;

#[derive(Debug, Parser)]
pub struct MonthlyCli {
    #[command(subcommand)]
    command: MonthlySubcommand,
}

#[derive(Debug, Subcommand)]
enum MonthlySubcommand {
    /// Record a pass/fail evaluation for one skill.
    Record {
        /// Probationer email.
        #[arg(long)]
        probationer: String,
        /// Month 1-6.
        #[arg(long, short)]
        month: u8,
        /// Skill id from the catalog.
        #[arg(long)]
        skill: String,
        /// pass or fail.
        #[arg(long)]
        result: SignoffResult,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// List evaluations for a probationer, newest first.
    List {
        /// Probationer email.
        #[arg(long)]
        probationer: String,
        /// Narrow to one month.
        #[arg(long, short)]
        month: Option<u8>,
    },
}

pub async fn run(ctx: &AppContext, cli: MonthlyCli) -> anyhow::Result<()> {
    let client = MonthlySignoffClient::new(ctx.store.clone());
    match cli.command {
        MonthlySubcommand::Record {
            probationer,
            month,
            skill,
            result,
            notes,
        } => {
            let month = Month::try_from(month)?;
            let id = client
                .record(NewMonthlySignoff {
                    probationer_email: probationer,
                    month,
                    skill_id: skill.clone(),
                    result,
                    notes,
                    evaluator: ctx.evaluator.clone(),
                })
                .await?;
            println!("recorded {result} for {skill} ({id})");
        }
        MonthlySubcommand::List { probationer, month } => {
            let month = month.map(Month::try_from).transpose()?;
            let records = client.list(&probationer, month).await?;
            if records.is_empty() {
                println!("no entries");
            }
            for record in records {
                println!(
                    "{}  {:4}  {}  {}  {}",
                    record.created_at.format("%Y-%m-%d %H:%M"),
                    record.result.as_str(),
                    record.month,
                    record.skill_id,
                    if record.notes.is_empty() {
                        "—"
                    } else {
                        record.notes.as_str()
                    }
                );
            }
        }
    }
    Ok(())
}
