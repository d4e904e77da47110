mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "kidspots-cli")]
#[command(about = "Inspect the kidspots Overpass query and data without running the server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the Overpass QL query for the configured region
    Query,
    /// Print the location type registry
    Types,
    /// Fetch and normalize locations, then print a per-type summary
    Fetch {
        /// Print the normalized locations as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = kidspots_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Query => commands::print_query(&config),
        Commands::Types => commands::print_types(),
        Commands::Fetch { json } => commands::fetch(&config, json).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
