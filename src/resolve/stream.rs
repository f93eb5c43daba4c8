//! Stream descriptor fetch

use crate::api::{content, ContentClient};
use crate::models::{Server, ServerKind, StreamDescriptor};

/// Fetches the subtitled stream for a selected server
#[derive(Debug, Clone)]
pub struct StreamFetcher {
    client: ContentClient,
}

impl StreamFetcher {
    pub fn new(client: ContentClient) -> Self {
        Self { client }
    }

    /// Only subtitled streams are supported, so the kind is always `sub`
    pub async fn fetch(
        &self,
        episode_id: &str,
        server: &Server,
    ) -> content::Result<StreamDescriptor> {
        let stream = self
            .client
            .fetch_stream(episode_id, &server.name, ServerKind::Sub)
            .await?;
        tracing::debug!(
            episode_id,
            server = %server.name,
            subtitles = stream.subtitles.len(),
            "fetched stream"
        );
        Ok(stream)
    }
}
