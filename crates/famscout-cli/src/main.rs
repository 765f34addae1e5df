use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cross_folder;
mod ledger_cmd;
mod run;
mod summary;

#[derive(Debug, Parser)]
#[command(name = "famscout")]
#[command(about = "Family-events decision pipeline: dedup, relevance filtering, merge")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the full pipeline over an extraction batch file.
    Run(run::RunArgs),
    /// Deduplicate across an explicit set of collection folders.
    Dedup(cross_folder::DedupArgs),
    /// Ledger reporting and maintenance.
    Ledger {
        #[command(subcommand)]
        command: ledger_cmd::LedgerCommand,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = famscout_core::load_app_config().context("configuration error")?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => run::execute(&config, args).await,
        Commands::Dedup(args) => cross_folder::execute(&config, args).await,
        Commands::Ledger { command } => ledger_cmd::execute(&config, command).await,
    }
}
