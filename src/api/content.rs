//! Content API client
//!
//! Thin wrapper over the four read-only endpoints of the anime content API:
//! search, episode list, server list and stream descriptor. Responses are
//! validated for shape only; interpretation happens in `crate::resolve`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::models::{Episode, Server, ServerKind, StreamDescriptor, Title};

/// Content API error types
///
/// Every variant is a transport-level failure from the pipeline's point of
/// view; the detail is for logs only.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Search query is empty")]
    EmptyQuery,

    #[error("Content API returned HTTP {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ContentError>;

/// Content API client
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ContentClient {
    base_url: String,
    client: reqwest::Client,
}

impl ContentClient {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self::with_client(client, base_url)
    }

    /// Create a client around an existing reqwest client
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search the catalog by free text
    ///
    /// Accepts both a bare array and a `{ "data": [...] }` envelope.
    pub async fn search(&self, query: &str) -> Result<Vec<Title>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ContentError::EmptyQuery);
        }

        let endpoint = format!("/search?key={}", urlencoding::encode(query));
        let response: Listing<Title> = self.get(&endpoint).await?;
        Ok(response.into_items())
    }

    /// List every episode of an anime
    pub async fn list_episodes(&self, anime_id: &str) -> Result<Vec<Episode>> {
        let endpoint = format!("/episodes/{}", urlencoding::encode(anime_id));
        self.get(&endpoint).await
    }

    /// List delivery servers for an episode, flattened across kinds
    pub async fn list_servers(&self, episode_id: &str) -> Result<Vec<Server>> {
        let endpoint = format!("/servers?id={}", urlencoding::encode(episode_id));
        let response: ServersResponse = self.get(&endpoint).await?;
        Ok(response.into_servers())
    }

    /// Fetch the streaming link and subtitles for one server
    pub async fn fetch_stream(
        &self,
        episode_id: &str,
        server_name: &str,
        kind: ServerKind,
    ) -> Result<StreamDescriptor> {
        let endpoint = format!(
            "/stream?id={}&server={}&type={}",
            urlencoding::encode(episode_id),
            urlencoding::encode(server_name),
            kind.as_str()
        );
        self.get(&endpoint).await
    }

    /// Single GET with status and shape validation, no retries
    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%url, "content api request");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ContentError::InvalidResponse(format!("JSON parse error: {}", e)))
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

/// List payload that is either bare or wrapped under `data`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> Listing<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Listing::Bare(items) => items,
            Listing::Wrapped { data } => data,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ServersResponse {
    #[serde(default)]
    sub: Vec<ServerRaw>,
    #[serde(default)]
    dub: Vec<ServerRaw>,
    #[serde(default)]
    raw: Vec<ServerRaw>,
}

impl ServersResponse {
    fn into_servers(self) -> Vec<Server> {
        let tagged = |servers: Vec<ServerRaw>, kind: ServerKind| {
            servers
                .into_iter()
                .map(move |s| Server { name: s.name, kind })
        };

        tagged(self.sub, ServerKind::Sub)
            .chain(tagged(self.dub, ServerKind::Dub))
            .chain(tagged(self.raw, ServerKind::Raw))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ServerRaw {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_accepts_both_shapes() {
        let bare: Listing<Title> =
            serde_json::from_str(r#"[{"title": "Naruto", "id": "naruto-677"}]"#).unwrap();
        let wrapped: Listing<Title> = serde_json::from_str(
            r#"{"success": true, "data": [{"title": "Naruto", "id": "naruto-677"}]}"#,
        )
        .unwrap();

        assert_eq!(bare.into_items(), wrapped.into_items());
    }

    #[test]
    fn test_listing_rejects_other_shapes() {
        assert!(serde_json::from_str::<Listing<Title>>(r#"{"results": []}"#).is_err());
        assert!(serde_json::from_str::<Listing<Title>>(r#""naruto""#).is_err());
    }

    #[test]
    fn test_servers_flatten_keeps_kind_and_order() {
        let response: ServersResponse = serde_json::from_str(
            r#"{
                "sub": [{"name": "HD-1"}, {"name": "HD-2"}],
                "dub": [{"name": "HD-2"}]
            }"#,
        )
        .unwrap();

        let servers = response.into_servers();
        assert_eq!(servers.len(), 3);
        assert_eq!(servers[0].name, "HD-1");
        assert_eq!(servers[1].kind, ServerKind::Sub);
        assert_eq!(servers[2].kind, ServerKind::Dub);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ContentClient::new("https://api.example/api/");
        assert_eq!(client.base_url(), "https://api.example/api");
    }

    #[test]
    fn test_empty_query_rejected_without_request() {
        // Unroutable base URL: a request would fail with RequestFailed instead
        let client = ContentClient::new("http://127.0.0.1:1");
        let result = tokio_test::block_on(client.search("   "));
        assert!(matches!(result, Err(ContentError::EmptyQuery)));
    }
}
