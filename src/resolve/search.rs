//! Bounded catalog search

use crate::api::{content, ContentClient};
use crate::models::Title;

/// Number of titles shown for a search unless configured otherwise
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Catalog search truncated to the top `limit` titles
#[derive(Debug, Clone)]
pub struct SearchQuery {
    client: ContentClient,
    limit: usize,
}

impl SearchQuery {
    pub fn new(client: ContentClient) -> Self {
        Self::with_limit(client, DEFAULT_SEARCH_LIMIT)
    }

    pub fn with_limit(client: ContentClient, limit: usize) -> Self {
        Self { client, limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Search and keep the first `limit` titles in API order
    ///
    /// An empty list is a normal outcome, not an error.
    pub async fn run(&self, query: &str) -> content::Result<Vec<Title>> {
        let mut titles = self.client.search(query).await?;
        tracing::debug!(query, hits = titles.len(), "search completed");

        titles.truncate(self.limit);
        Ok(titles)
    }
}
