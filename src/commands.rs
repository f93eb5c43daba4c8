//! CLI Command Handlers
//!
//! Each handler takes its CLI args, the resolved config and the Output,
//! and returns an ExitCode.

use crate::api::{ContentClient, ContentError, TelegramClient};
use crate::bot::{Bot, CommandHandler};
use crate::cli::{BotCmd, ExitCode, GetCmd, Output, SearchCmd};
use crate::config::Config;
use crate::models::ResolutionResult;
use crate::render;
use crate::resolve::{ResolutionPipeline, SearchQuery};

fn content_client(config: &Config, output: &Output) -> Result<ContentClient, ExitCode> {
    match config.api_base_url() {
        Ok(url) => Ok(ContentClient::with_timeout(url, config.request_timeout())),
        Err(e) => Err(output.error(e.to_string(), ExitCode::InvalidArgs)),
    }
}

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, config: &Config, output: &Output) -> ExitCode {
    let client = match content_client(config, output) {
        Ok(client) => client,
        Err(code) => return code,
    };
    let limit = cmd.limit.unwrap_or_else(|| config.search_limit());
    let search = SearchQuery::with_limit(client, limit);

    output.info(format!("Searching for: {}", cmd.query));

    match search.run(&cmd.query).await {
        Ok(titles) => {
            let text = render::search_results(&cmd.query, &titles);
            if let Err(e) = output.print(&titles, &text) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            if titles.is_empty() {
                ExitCode::NotFound
            } else {
                ExitCode::Success
            }
        }
        Err(e @ ContentError::EmptyQuery) => output.error(e.to_string(), ExitCode::InvalidArgs),
        Err(e) => {
            tracing::warn!(query = %cmd.query, error = %e, "search failed");
            output.error(render::SEARCH_FAILED, ExitCode::NetworkError)
        }
    }
}

// =============================================================================
// Get Command
// =============================================================================

pub async fn get_cmd(cmd: GetCmd, config: &Config, output: &Output) -> ExitCode {
    let client = match content_client(config, output) {
        Ok(client) => client,
        Err(code) => return code,
    };
    let pipeline = ResolutionPipeline::new(client);

    output.info(format!("Resolving {} episode {}", cmd.anime_id, cmd.episode));

    let result = pipeline.run(&cmd.anime_id, cmd.episode).await;
    let text = render::resolution(&cmd.anime_id, cmd.episode, &result);

    match &result {
        ResolutionResult::Success(stream) => {
            if let Err(e) = output.print(stream, &text) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        ResolutionResult::EpisodeNotFound => output.error(text, ExitCode::NotFound),
        ResolutionResult::ServerUnavailable => output.error(text, ExitCode::ServerUnavailable),
        ResolutionResult::TransportError => output.error(text, ExitCode::NetworkError),
    }
}

// =============================================================================
// Bot Command
// =============================================================================

pub async fn bot_cmd(cmd: BotCmd, config: &Config, output: &Output) -> ExitCode {
    let token = match config.bot_token() {
        Ok(token) => token.to_string(),
        Err(e) => return output.error(e.to_string(), ExitCode::InvalidArgs),
    };
    let client = match content_client(config, output) {
        Ok(client) => client,
        Err(code) => return code,
    };

    let telegram = TelegramClient::with_timeout(token, config.request_timeout());
    let handler = CommandHandler::new(client, config.search_limit());
    let poll_timeout = cmd.poll_timeout.unwrap_or_else(|| config.poll_timeout_secs());

    let bot = Bot::new(telegram, handler, poll_timeout);
    bot.run_until(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    })
    .await;

    ExitCode::Success
}
