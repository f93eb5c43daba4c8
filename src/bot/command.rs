//! Chat command parsing
//!
//! Recognises `/search <text>` and `/get <slug> <episode>` (plus `/start`
//! and `/help`), including Telegram's `/command@BotName` form.

use thiserror::Error;

use crate::render;

/// Parsed chat command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Search { query: String },
    Get { anime_id: String, episode: u32 },
    Help,
    /// A slash command this bot does not know
    Unknown(String),
}

/// Command recognised but arguments unusable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("{}", render::SEARCH_USAGE)]
    Search,

    #[error("{}", render::GET_USAGE)]
    Get,

    #[error("{}", render::INVALID_EPISODE)]
    InvalidEpisode,
}

impl BotCommand {
    /// Parse message text when the bot's own username is not known
    ///
    /// Returns `None` for anything that is not a slash command.
    pub fn parse(text: &str) -> Option<Result<BotCommand, UsageError>> {
        Self::parse_addressed(text, None)
    }

    /// Parse message text sent to the bot named `bot_username`
    ///
    /// `/cmd@OtherBot` is addressed to another bot in the same chat and
    /// yields `None`. Without a known username, a mention is accepted on
    /// the bot's own commands only.
    pub fn parse_addressed(
        text: &str,
        bot_username: Option<&str>,
    ) -> Option<Result<BotCommand, UsageError>> {
        let text = text.trim();
        let body = text.strip_prefix('/')?;

        let (head, rest) = body
            .split_once(char::is_whitespace)
            .unwrap_or((body, ""));
        let (name, mention) = match head.split_once('@') {
            Some((name, mention)) => (name, Some(mention)),
            None => (head, None),
        };
        if name.is_empty() {
            return None;
        }

        if let (Some(mention), Some(own)) = (mention, bot_username) {
            if !mention.eq_ignore_ascii_case(own.trim_start_matches('@')) {
                return None;
            }
        }

        let command = match name.to_ascii_lowercase().as_str() {
            "search" => parse_search(rest),
            "get" => parse_get(rest),
            "start" | "help" => Ok(BotCommand::Help),
            _ if mention.is_some() && bot_username.is_none() => return None,
            _ => Ok(BotCommand::Unknown(name.to_string())),
        };
        Some(command)
    }
}

fn parse_search(args: &str) -> Result<BotCommand, UsageError> {
    let query = args.trim();
    if query.is_empty() {
        return Err(UsageError::Search);
    }
    Ok(BotCommand::Search {
        query: query.to_string(),
    })
}

fn parse_get(args: &str) -> Result<BotCommand, UsageError> {
    let mut parts = args.split_whitespace();
    let (Some(anime_id), Some(episode)) = (parts.next(), parts.next()) else {
        return Err(UsageError::Get);
    };

    let episode: u32 = episode.parse().map_err(|_| UsageError::InvalidEpisode)?;
    if episode == 0 {
        return Err(UsageError::InvalidEpisode);
    }

    Ok(BotCommand::Get {
        anime_id: anime_id.to_string(),
        episode,
    })
}
