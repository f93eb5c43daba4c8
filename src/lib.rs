//! anilink - anime episode links over Telegram
//!
//! Answers `/search <name>` with the top catalog matches and
//! `/get <slug> <episode>` with a streaming link plus subtitle tracks,
//! proxying a remote anime content API.
//!
//! # Modules
//!
//! - `models` - Titles, episodes, servers, streams and resolution results
//! - `api` - Content API and Telegram Bot API clients
//! - `resolve` - Episode -> server -> stream pipeline and bounded search
//! - `render` - User-facing text
//! - `bot` - Command parsing and the long-polling loop
//! - `cli` / `commands` / `config` - Binary entry points and settings

pub mod api;
pub mod bot;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod render;
pub mod resolve;

// Re-export commonly used types
pub use models::{
    Episode, ResolutionResult, Server, ServerKind, StreamDescriptor, Subtitle, Title,
    PREFERRED_SERVER,
};

pub use api::{ContentClient, ContentError, TelegramClient};
pub use bot::{Bot, BotCommand, CommandHandler};
pub use resolve::{EpisodeResolver, ResolutionPipeline, SearchQuery, ServerSelector, StreamFetcher};
