//! Resolution pipeline
//!
//! Turns `(anime id, episode number)` into a stream in three strictly
//! sequential steps:
//!
//! ```text
//! ResolvingEpisode -> SelectingServer -> FetchingStream -> Done
//!        \                  |                  /
//!         +-------------> Failed <------------+
//! ```
//!
//! The first failing step ends the run. Nothing is retried and no partial
//! result (a link without its subtitles, say) ever leaves this module.

use std::fmt;

use crate::api::ContentClient;
use crate::models::{ResolutionResult, StreamDescriptor};

use super::{EpisodeResolver, ResolveError, ServerSelector, StreamFetcher};

/// Pipeline step, used to tag log output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolvingEpisode,
    SelectingServer,
    FetchingStream,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::ResolvingEpisode => write!(f, "resolving episode"),
            Stage::SelectingServer => write!(f, "selecting server"),
            Stage::FetchingStream => write!(f, "fetching stream"),
        }
    }
}

/// Episode -> server -> stream resolution
#[derive(Debug, Clone)]
pub struct ResolutionPipeline {
    episodes: EpisodeResolver,
    servers: ServerSelector,
    streams: StreamFetcher,
}

impl ResolutionPipeline {
    pub fn new(client: ContentClient) -> Self {
        Self {
            episodes: EpisodeResolver::new(client.clone()),
            servers: ServerSelector::new(client.clone()),
            streams: StreamFetcher::new(client),
        }
    }

    /// Resolve one episode to its stream
    pub async fn run(&self, anime_id: &str, episode_number: u32) -> ResolutionResult {
        match self.try_run(anime_id, episode_number).await {
            Ok(stream) => {
                tracing::info!(anime_id, episode_number, "resolved stream");
                ResolutionResult::Success(stream)
            }
            Err((stage, ResolveError::Transport(e))) => {
                tracing::warn!(anime_id, episode_number, %stage, error = %e, "content api failure");
                ResolutionResult::TransportError
            }
            Err((stage, e)) => {
                tracing::info!(anime_id, episode_number, %stage, "{}", e);
                e.into()
            }
        }
    }

    async fn try_run(
        &self,
        anime_id: &str,
        episode_number: u32,
    ) -> Result<StreamDescriptor, (Stage, ResolveError)> {
        let at = |stage| move |e: ResolveError| (stage, e);

        let episode = self
            .episodes
            .resolve(anime_id, episode_number)
            .await
            .map_err(at(Stage::ResolvingEpisode))?;

        let server = self
            .servers
            .select(&episode.identifier)
            .await
            .map_err(at(Stage::SelectingServer))?;

        self.streams
            .fetch(&episode.identifier, &server)
            .await
            .map_err(|e| (Stage::FetchingStream, e.into()))
    }
}
