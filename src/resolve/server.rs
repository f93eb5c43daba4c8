//! Delivery server selection

use crate::api::ContentClient;
use crate::models::Server;

use super::ResolveError;

/// Picks the preferred subtitled server for an episode
#[derive(Debug, Clone)]
pub struct ServerSelector {
    client: ContentClient,
}

impl ServerSelector {
    pub fn new(client: ContentClient) -> Self {
        Self { client }
    }

    /// Fetch the server list and return the preferred server
    ///
    /// No fallback: other servers being present still yields
    /// `ServerUnavailable`.
    pub async fn select(&self, episode_id: &str) -> Result<Server, ResolveError> {
        let servers = self.client.list_servers(episode_id).await?;
        tracing::debug!(episode_id, count = servers.len(), "fetched server list");

        pick_server(servers).ok_or(ResolveError::ServerUnavailable)
    }
}

/// First sub server whose name is exactly the preferred one
pub fn pick_server(servers: Vec<Server>) -> Option<Server> {
    servers.into_iter().find(Server::is_preferred)
}
