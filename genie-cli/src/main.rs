use anyhow::Result;
use clap::Parser;
use genie_core::{ChatClient, Config, Genie};

#[derive(Parser)]
#[command(name = "genie")]
#[command(about = "Ask ChatGenie a single question from the terminal", long_about = None)]
struct Cli {
    /// The question to send
    query: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    let query = cli.query.trim();
    if query.is_empty() {
        anyhow::bail!("Query cannot be empty");
    }

    let config = Config::from_env()?;
    let genie = Genie::new(config.groq_api_key);

    match genie.reply(query).await {
        Ok(reply) => {
            println!("{reply}");
            Ok(())
        }
        Err(e) => anyhow::bail!("{e}"),
    }
}
