//! placement-report CLI entry point.

use clap::Parser;

use placement_report::cli::commands::{report, serve};
use placement_report::cli::{handle_error, Cli, Commands};
use placement_report::infrastructure::config::ConfigLoader;
use placement_report::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Configuration errors are fatal before anything is served
    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => handle_error(err.into(), cli.json),
    };

    let logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => handle_error(err.context("Failed to initialize logging"), cli.json),
    };

    let result = match cli.command {
        Commands::Serve { port } => serve::execute(config, port).await,
        Commands::Report => report::execute(config, cli.json).await,
    };

    if let Err(err) = result {
        drop(logger);
        handle_error(err, cli.json);
    }
}
