#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

use anyhow::Result;
use clap::Parser;
use translator_providers::providers::register_all_providers_with;
use translator_providers::{Config, logging};

mod app;
mod cli;

use cli::commands::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // `init` must work even when the current config file is broken.
    if let Commands::Init { force } = cli.command {
        return app::dispatch::init_config(&Config::default_path()?, force);
    }

    let config = Config::load_or_default()?;

    if let Err(e) = logging::init(&config.log_level) {
        eprintln!("Warning: {e}");
    }

    register_all_providers_with(&config.providers);
    app::dispatch::dispatch(cli, config).await
}
