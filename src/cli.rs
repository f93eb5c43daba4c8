//! CLI - Command Line Interface for anilink
//!
//! Without a subcommand (or with `bot`) the Telegram bot runs. `search` and
//! `get` run the same lookups once from the terminal, for scripting and for
//! checking an API deployment without a chat client.
//!
//! # Examples
//!
//! ```bash
//! # Run the bot (BOT_TOKEN and API_BASE_URL from env or .env)
//! anilink
//!
//! # One-off lookups
//! anilink search "one piece"
//! anilink get one-piece-100 1071 --json
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments or configuration
    InvalidArgs = 2,
    /// Network or content API error
    NetworkError = 3,
    /// No search results or episode not found
    NotFound = 4,
    /// Preferred server not offered
    ServerUnavailable = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// anilink - anime episode links over Telegram
///
/// Run without arguments to start the bot.
/// Use subcommands for one-off lookups.
#[derive(Parser, Debug)]
#[command(
    name = "anilink",
    version,
    about = "Telegram bot that resolves anime episodes to streaming links",
    after_help = "EXAMPLES:\n\
                  anilink                             Run the Telegram bot\n\
                  anilink search \"one piece\"          Search for a title\n\
                  anilink get one-piece-100 1071      Resolve an episode"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output and lower log level to warnings
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Content API base URL (overrides API_BASE_URL)
    #[arg(long, global = true)]
    pub api_base_url: Option<String>,

    /// Subcommand to run (omit to run the bot)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Subcommand to run, defaulting to the bot
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Bot(BotCmd::default()))
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the Telegram bot (default)
    Bot(BotCmd),

    /// Search for anime titles
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Resolve an episode to its streaming link and subtitles
    #[command(visible_alias = "g")]
    Get(GetCmd),
}

/// Run the Telegram bot
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct BotCmd {
    /// Long-poll window in seconds
    #[arg(long)]
    pub poll_timeout: Option<u64>,
}

/// Search the catalog by title
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SearchCmd {
    /// Search query (title, keywords)
    #[arg(required = true)]
    pub query: String,

    /// Maximum number of results (default from config, else 5)
    #[arg(
        long,
        short = 'l',
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub limit: Option<usize>,
}

/// Resolve one episode
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct GetCmd {
    /// Anime slug as shown by `search`
    #[arg(required = true)]
    pub anime_id: String,

    /// Episode number (1-based)
    #[arg(required = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub episode: u32,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data: JSON envelope, or the pre-rendered text
    pub fn print<T: Serialize>(&self, data: T, text: &str) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", text);
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
