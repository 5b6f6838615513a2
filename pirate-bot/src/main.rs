//! Binary for the pirate Telegram bot.

use anyhow::Result;
use clap::Parser;
use pirate_bot::{run_bot, BotConfig, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = BotConfig::from_env(token)?;
            run_bot(config).await
        }
    }
}
