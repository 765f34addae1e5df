//! The `ledger` subcommands: audit reporting and explicit maintenance.

use anyhow::Context;
use clap::Subcommand;

use famscout_core::AppConfig;
use famscout_ledger::Ledger;

#[derive(Debug, Subcommand)]
pub enum LedgerCommand {
    /// Per-source article/event totals and overall counts.
    Report,
    /// Processed-article rows for one source, most recent first.
    History {
        #[arg(long)]
        source: String,
    },
    /// Delete every ledger row. Requires `--yes`; every known article
    /// becomes eligible for re-extraction afterwards.
    Reset {
        #[arg(long)]
        yes: bool,
    },
}

pub async fn execute(config: &AppConfig, command: LedgerCommand) -> anyhow::Result<()> {
    let ledger = Ledger::open(&config.ledger_db_path)
        .await
        .context("ledger unavailable")?;

    match command {
        LedgerCommand::Report => {
            let summaries = ledger.source_summaries().await?;
            if summaries.is_empty() {
                println!("ledger is empty");
                return Ok(());
            }

            println!("{:<24} {:>10} {:>14}", "source", "articles", "total events");
            for summary in &summaries {
                println!(
                    "{:<24} {:>10} {:>14}",
                    summary.source_id, summary.article_count, summary.event_total
                );
            }

            let totals = ledger.totals().await?;
            println!(
                "\n{} articles processed, {} events extracted overall",
                totals.article_count, totals.event_total
            );
        }
        LedgerCommand::History { source } => {
            let history = ledger.history_for(&source).await?;
            if history.is_empty() {
                println!("no processed articles for source \"{source}\"");
                return Ok(());
            }
            println!("{:<20} {:>8} {:<28}", "article", "events", "processed at");
            for record in &history {
                println!(
                    "{:<20} {:>8} {:<28}",
                    record.article_id,
                    record.event_count,
                    record.processed_at.to_rfc3339()
                );
            }
        }
        LedgerCommand::Reset { yes } => {
            if !yes {
                anyhow::bail!("refusing to reset the ledger without --yes");
            }
            let deleted = ledger.reset().await?;
            println!("ledger reset: {deleted} rows deleted");
        }
    }

    Ok(())
}
