mod args;
mod estimate;
mod export;
mod render;
mod saved;
mod search;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::args::{EstimateArgs, SearchArgs};
use crate::saved::SavedCommands;

#[derive(Debug, Parser)]
#[command(name = "flipcalc")]
#[command(about = "Resale profit research over marketplace listings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search listings and estimate resale profit for each
    Search {
        #[command(flatten)]
        args: SearchArgs,
        /// Write results as CSV; defaults to a timestamped file in the export dir
        #[arg(long, num_args = 0..=1, value_name = "PATH")]
        export: Option<Option<PathBuf>>,
    },
    /// Estimate profit for a single sale price without searching
    Estimate(EstimateArgs),
    /// Manage saved searches
    Saved {
        #[command(subcommand)]
        command: SavedCommands,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = flipcalc_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search { args, export } => {
            let state = saved::load_state(&config.saved_searches_path)?;
            search::run_search(&config, state, args.to_params(), export).await?;
        }
        Commands::Estimate(args) => estimate::run_estimate(&config, &args)?,
        Commands::Saved { command } => match command {
            SavedCommands::List => saved::run_saved_list(&config.saved_searches_path)?,
            SavedCommands::Add(args) => {
                saved::run_saved_add(&config.saved_searches_path, args.to_params())?;
            }
            SavedCommands::Delete { number } => {
                saved::run_saved_delete(&config.saved_searches_path, number)?;
            }
            SavedCommands::Run { number, export } => {
                let state = saved::load_for_run(&config.saved_searches_path, number)?;
                search::run_search(&config, state, flipcalc_core::SearchParams::default(), export)
                    .await?;
            }
        },
    }

    Ok(())
}
