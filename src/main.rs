use anyhow::Context;
use clap::Parser;

use couriers::cli::{check, run, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Run(args) => run::execute(args)
            .await
            .context("classification run failed")?,
        Commands::CheckConfig(args) => {
            check::execute(&args.config).context("configuration check failed")?
        }
    }
    Ok(())
}
