//! Episode lookup by number
//!
//! The content API has no structured episode number, so the match is made
//! against the number embedded in each episode's display title.

use crate::api::ContentClient;
use crate::models::Episode;

use super::ResolveError;

/// Finds one episode of an anime by its human-facing number
#[derive(Debug, Clone)]
pub struct EpisodeResolver {
    client: ContentClient,
}

impl EpisodeResolver {
    pub fn new(client: ContentClient) -> Self {
        Self { client }
    }

    /// Fetch the episode list and return the first title encoding `episode_number`
    pub async fn resolve(
        &self,
        anime_id: &str,
        episode_number: u32,
    ) -> Result<Episode, ResolveError> {
        let episodes = self.client.list_episodes(anime_id).await?;
        tracing::debug!(anime_id, count = episodes.len(), "fetched episode list");

        find_episode(episodes, episode_number).ok_or(ResolveError::EpisodeNotFound)
    }
}

/// First episode (in list order) whose title encodes `episode_number`
///
/// The list is not assumed to be sorted; titles without a parseable number
/// are skipped.
pub fn find_episode(episodes: Vec<Episode>, episode_number: u32) -> Option<Episode> {
    episodes
        .into_iter()
        .find(|ep| ep.number() == Some(episode_number))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ep(id: &str, title: &str) -> Episode {
        Episode {
            identifier: id.to_string(),
            raw_title: title.to_string(),
        }
    }

    #[test]
    fn test_find_episode_exact_number() {
        let episodes = vec![ep("e1", "Episode 1"), ep("e2", "Episode 12")];
        assert_eq!(find_episode(episodes, 12).unwrap().identifier, "e2");
    }

    #[test]
    fn test_find_episode_prefix_does_not_match() {
        // "Episode 12" must not satisfy a request for episode 1
        let episodes = vec![ep("e12", "Episode 12"), ep("e1", "Episode 1")];
        assert_eq!(find_episode(episodes, 1).unwrap().identifier, "e1");
    }

    #[test]
    fn test_find_episode_first_match_wins() {
        let episodes = vec![
            ep("a", "Episode 3 (Uncut)"),
            ep("b", "episode 3"),
            ep("c", "Episode 2"),
        ];
        assert_eq!(find_episode(episodes, 3).unwrap().identifier, "a");
    }

    #[test]
    fn test_find_episode_unsorted_list() {
        let episodes = vec![ep("e3", "Episode 3"), ep("e1", "Episode 1"), ep("e2", "Episode 2")];
        assert_eq!(find_episode(episodes, 2).unwrap().identifier, "e2");
    }

    #[test]
    fn test_find_episode_skips_unparseable_titles() {
        let episodes = vec![ep("x", "Special: Recap"), ep("e5", "The Return - EPISODE 05")];
        assert_eq!(find_episode(episodes, 5).unwrap().identifier, "e5");
    }

    #[test]
    fn test_find_episode_not_found() {
        let episodes = vec![ep("e1", "Episode 1"), ep("x", "Movie")];
        assert!(find_episode(episodes, 4).is_none());
        assert!(find_episode(vec![], 1).is_none());
    }
}
