mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod utils;

use crate::cli::{Cli, Commands};
use crate::config::PartialAppConfig;
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run_app().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!("afiface CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if let Some(num_threads) = cli.threads {
        info!(
            "Setting Rayon global thread pool to {} threads.",
            num_threads
        );
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| {
                CliError::Other(anyhow::anyhow!("Failed to build global thread pool: {}", e))
            })?;
    }

    let config = PartialAppConfig::load(cli.config.as_deref(), &cli.set_values)?;

    let command_result = match cli.command {
        Commands::Summary(args) => {
            info!("Dispatching to 'summary' command.");
            commands::summary::run(args).await
        }
        Commands::Pae(args) => {
            info!("Dispatching to 'pae' command.");
            commands::pae::run(args, &config).await
        }
        Commands::Interface(args) => {
            info!("Dispatching to 'interface' command.");
            commands::interface::run(args, &config).await
        }
        Commands::Collect(args) => {
            info!("Dispatching to 'collect' command.");
            commands::collect::run(args).await
        }
        Commands::Dump(args) => {
            info!("Dispatching to 'dump' command.");
            commands::dump::run(args).await
        }
        Commands::Af3Input(args) => {
            info!("Dispatching to 'af3-input' command.");
            commands::af3_input::run(args).await
        }
    };

    match &command_result {
        Ok(_) => info!("Command completed successfully."),
        Err(e) => error!("Command failed: {}", e),
    }
    command_result
}
