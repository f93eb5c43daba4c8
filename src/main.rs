//! anilink - anime episode links over Telegram
//!
//! # Usage
//!
//! ```bash
//! # Run the bot
//! BOT_TOKEN=123:abc API_BASE_URL=https://api.example/anime anilink
//!
//! # One-off lookups
//! anilink search "frieren"
//! anilink get frieren-18542 12 --json
//! ```

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use anilink::cli::{Cli, Command, ExitCode, Output};
use anilink::commands;
use anilink::config::{Config, ConfigError};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.quiet);

    run_cli(cli).await.into()
}

/// Log to stderr; RUST_LOG overrides the default level
fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Resolve config layers: file, then environment, then flags
fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    let file = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let mut config = file.with_env();
    if let Some(url) = &cli.api_base_url {
        config.api_base_url = Some(url.clone());
    }
    config.validate()
}

/// Run the selected command and return exit code
async fn run_cli(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => return output.error(e.to_string(), ExitCode::InvalidArgs),
    };

    match cli.command() {
        Command::Bot(cmd) => commands::bot_cmd(cmd, &config, &output).await,
        Command::Search(cmd) => commands::search_cmd(cmd, &config, &output).await,
        Command::Get(cmd) => commands::get_cmd(cmd, &config, &output).await,
    }
}
