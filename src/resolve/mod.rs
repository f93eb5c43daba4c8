//! Episode resolution pipeline
//!
//! - Episode: match an episode number against free-text episode titles
//! - Server: pick the preferred delivery server
//! - Stream: fetch the final link and subtitles
//! - Pipeline: chain the three, stopping at the first failure
//! - Search: bounded catalog search

pub mod episode;
pub mod pipeline;
pub mod search;
pub mod server;
pub mod stream;

use thiserror::Error;

use crate::api::ContentError;
use crate::models::ResolutionResult;

pub use episode::EpisodeResolver;
pub use pipeline::{ResolutionPipeline, Stage};
pub use search::{SearchQuery, DEFAULT_SEARCH_LIMIT};
pub use server::ServerSelector;
pub use stream::StreamFetcher;

/// Failure of one pipeline stage
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("No episode title matches the requested number")]
    EpisodeNotFound,

    #[error("Preferred server is not offered for this episode")]
    ServerUnavailable,

    #[error(transparent)]
    Transport(#[from] ContentError),
}

impl From<ResolveError> for ResolutionResult {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::EpisodeNotFound => ResolutionResult::EpisodeNotFound,
            ResolveError::ServerUnavailable => ResolutionResult::ServerUnavailable,
            ResolveError::Transport(_) => ResolutionResult::TransportError,
        }
    }
}
