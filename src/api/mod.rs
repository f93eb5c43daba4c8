//! API clients for external services
//!
//! - Content: anime search, episodes, servers and streams
//! - Telegram: Bot API transport for the chat frontend

pub mod content;
pub mod telegram;

pub use content::{ContentClient, ContentError};
pub use telegram::{TelegramClient, TelegramError};
