//! rRaid library root.
//! Exposes the CLI parser, the high-level run() function, the API client and
//! the reset-week scheduling logic.

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod logging;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Login { .. } => cli::commands::login::handle(&cli.command, cfg).await,
        Commands::Status => cli::commands::status::handle(cfg),
        Commands::Window => cli::commands::window::handle(cli),
        Commands::Raids { action } => cli::commands::raids::handle(cli, action, cfg).await,
        Commands::Chars { action } => cli::commands::chars::handle(action, cfg).await,
    }
}

/// Entry point used by main.rs
pub async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut cfg = Config::load()?;

    // --api-url wins over the configuration file
    if let Some(url) = &cli.api_url {
        cfg.api_url = url.clone();
        cfg.validate()?;
    }

    dispatch(&cli, &cfg).await
}
