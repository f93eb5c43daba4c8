//! Telegram bot frontend
//!
//! Long-polls the Bot API and answers each command on its own task. The
//! steps inside one command run sequentially; separate commands may finish
//! in any order.

pub mod command;

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinSet;

use crate::api::{ContentClient, TelegramClient, TelegramError};
use crate::render;
use crate::resolve::{ResolutionPipeline, SearchQuery};

pub use command::{BotCommand, UsageError};

/// Pause after a failed poll so a dead network does not spin the loop
const POLL_ERROR_PAUSE: Duration = Duration::from_secs(5);

/// Turns parsed commands into reply text
#[derive(Debug, Clone)]
pub struct CommandHandler {
    search: SearchQuery,
    pipeline: ResolutionPipeline,
}

impl CommandHandler {
    pub fn new(client: ContentClient, search_limit: usize) -> Self {
        Self {
            search: SearchQuery::with_limit(client.clone(), search_limit),
            pipeline: ResolutionPipeline::new(client),
        }
    }

    /// Reply for raw message text, `None` when the text is not a command
    pub async fn reply_to(&self, text: &str) -> Option<String> {
        let parsed = BotCommand::parse(text)?;
        Some(self.reply(parsed).await)
    }

    /// Reply for a parsed command; usage errors become their usage line
    pub async fn reply(&self, parsed: Result<BotCommand, UsageError>) -> String {
        match parsed {
            Ok(command) => self.handle(command).await,
            Err(usage) => usage.to_string(),
        }
    }

    pub async fn handle(&self, command: BotCommand) -> String {
        match command {
            BotCommand::Search { query } => match self.search.run(&query).await {
                Ok(titles) => render::search_results(&query, &titles),
                Err(e) => {
                    tracing::warn!(%query, error = %e, "search failed");
                    render::SEARCH_FAILED.to_string()
                }
            },
            BotCommand::Get { anime_id, episode } => {
                let result = self.pipeline.run(&anime_id, episode).await;
                render::resolution(&anime_id, episode, &result)
            }
            BotCommand::Help | BotCommand::Unknown(_) => render::help(),
        }
    }
}

/// Long-polling bot
pub struct Bot {
    telegram: TelegramClient,
    handler: CommandHandler,
    poll_timeout_secs: u64,
    username: Option<String>,
    offset: i64,
    tasks: JoinSet<()>,
}

impl Bot {
    pub fn new(telegram: TelegramClient, handler: CommandHandler, poll_timeout_secs: u64) -> Self {
        Self {
            telegram,
            handler,
            poll_timeout_secs,
            username: None,
            offset: 0,
            tasks: JoinSet::new(),
        }
    }

    /// Set the bot's own username so commands for other bots are skipped
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Next update id the bot will ask for
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Poll until `shutdown` resolves, then wait for in-flight commands
    pub async fn run_until<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        if self.username.is_none() {
            tokio::select! {
                _ = &mut shutdown => return,
                _ = self.fetch_username() => {}
            }
        }
        tracing::info!(username = ?self.username, "bot is up and running");

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = self.poll_or_pause() => {}
            }

            while let Some(joined) = self.tasks.try_join_next() {
                log_task_outcome(joined);
            }
        }

        tracing::info!(in_flight = self.tasks.len(), "shutting down");
        self.drain().await;
    }

    async fn fetch_username(&mut self) {
        match self.telegram.get_me().await {
            Ok(me) => self.username = me.username,
            Err(e) => tracing::warn!(error = %e, "could not fetch bot username"),
        }
    }

    async fn poll_or_pause(&mut self) {
        if let Err(e) = self.poll_once().await {
            tracing::warn!(error = %e, "polling for updates failed");
            tokio::time::sleep(POLL_ERROR_PAUSE).await;
        }
    }

    /// Fetch one batch of updates and spawn a task per command
    ///
    /// Returns how many commands were dispatched.
    pub async fn poll_once(&mut self) -> Result<usize, TelegramError> {
        let updates = self
            .telegram
            .get_updates(self.offset, self.poll_timeout_secs)
            .await?;

        let mut dispatched = 0;
        for update in updates {
            self.offset = self.offset.max(update.update_id + 1);

            let Some(message) = update.message else {
                continue;
            };
            let username = self.username.as_deref();
            let Some(parsed) = message
                .text
                .as_deref()
                .and_then(|text| BotCommand::parse_addressed(text, username))
            else {
                continue;
            };

            let chat_id = message.chat.id;
            tracing::info!(chat_id, command = ?parsed, "received command");

            let telegram = self.telegram.clone();
            let handler = self.handler.clone();
            self.tasks.spawn(async move {
                let reply = handler.reply(parsed).await;
                if let Err(e) = telegram.send_message(chat_id, &reply).await {
                    tracing::warn!(chat_id, error = %e, "failed to send reply");
                }
            });
            dispatched += 1;
        }

        Ok(dispatched)
    }

    /// Wait for every spawned command to finish
    pub async fn drain(&mut self) {
        while let Some(joined) = self.tasks.join_next().await {
            log_task_outcome(joined);
        }
    }
}

fn log_task_outcome(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        tracing::error!(error = %e, "command task panicked");
    }
}
