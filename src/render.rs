//! Plain-text rendering of results for chat and terminal output
//!
//! Every failure maps to one fixed sentence. Internal error detail never
//! reaches the user; it only goes to the logs.

use std::fmt::Write;

use crate::models::{ResolutionResult, StreamDescriptor, Title, PREFERRED_SERVER};

pub const SEARCH_FAILED: &str = "Error searching anime. Please try again later.";
pub const RESOLVE_FAILED: &str = "An error occurred. Please try again later.";
pub const NO_SUBTITLES: &str = "No subtitles found.";

pub const SEARCH_USAGE: &str = "Usage: /search <anime name>";
pub const GET_USAGE: &str = "Usage: /get <animeSlug> <episodeNumber>";
pub const INVALID_EPISODE: &str = "Episode number must be a positive integer.";

/// Numbered list of titles, or the "no results" line
pub fn search_results(query: &str, titles: &[Title]) -> String {
    if titles.is_empty() {
        return format!("No results found for \"{}\".", query);
    }

    let mut out = format!("Top results for \"{}\":\n", query);
    for (i, title) in titles.iter().enumerate() {
        let _ = write!(out, "\n{}. {}", i + 1, title);
    }
    out
}

/// Reply text for a resolution attempt
pub fn resolution(anime_id: &str, episode_number: u32, result: &ResolutionResult) -> String {
    match result {
        ResolutionResult::Success(stream) => stream_links(stream),
        ResolutionResult::EpisodeNotFound => {
            format!("Episode {} not found for {}.", episode_number, anime_id)
        }
        ResolutionResult::ServerUnavailable => {
            format!("{} server not available for this episode.", PREFERRED_SERVER)
        }
        ResolutionResult::TransportError => RESOLVE_FAILED.to_string(),
    }
}

/// Link line followed by subtitle lines (or the fixed "none" line)
pub fn stream_links(stream: &StreamDescriptor) -> String {
    let mut out = format!("📥 Download Link:\n{}\n\n", stream.streaming_link);

    if stream.subtitles.is_empty() {
        out.push_str(NO_SUBTITLES);
    } else {
        out.push_str("💬 Subtitles:");
        for sub in &stream.subtitles {
            let _ = write!(out, "\n{}", sub);
        }
    }
    out
}

/// Help text for /start, /help and unknown commands
pub fn help() -> String {
    [
        "Commands:",
        "/search <anime name> - find an anime and its slug",
        "/get <animeSlug> <episodeNumber> - get the streaming link and subtitles",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Subtitle;

    fn title(name: &str, id: &str) -> Title {
        Title {
            display_name: name.to_string(),
            identifier: id.to_string(),
        }
    }

    #[test]
    fn test_search_results_numbered_from_one() {
        let titles = vec![
            title("Naruto", "naruto-677"),
            title("Naruto: Shippuden", "naruto-shippuden-355"),
        ];
        assert_eq!(
            search_results("naruto", &titles),
            "Top results for \"naruto\":\n\n\
             1. Naruto (slug: naruto-677)\n\
             2. Naruto: Shippuden (slug: naruto-shippuden-355)"
        );
    }

    #[test]
    fn test_search_results_empty() {
        assert_eq!(
            search_results("zzz", &[]),
            "No results found for \"zzz\"."
        );
    }

    #[test]
    fn test_stream_links_with_subtitles() {
        let stream = StreamDescriptor {
            streaming_link: "https://cdn.example/master.m3u8".to_string(),
            subtitles: vec![
                Subtitle {
                    language: "English".to_string(),
                    source: "https://cdn.example/eng.vtt".to_string(),
                },
                Subtitle {
                    language: "Spanish".to_string(),
                    source: "https://cdn.example/spa.vtt".to_string(),
                },
            ],
        };
        assert_eq!(
            stream_links(&stream),
            "📥 Download Link:\nhttps://cdn.example/master.m3u8\n\n\
             💬 Subtitles:\n\
             English: https://cdn.example/eng.vtt\n\
             Spanish: https://cdn.example/spa.vtt"
        );
    }

    #[test]
    fn test_stream_links_without_subtitles() {
        let stream = StreamDescriptor {
            streaming_link: "https://cdn.example/master.m3u8".to_string(),
            subtitles: vec![],
        };
        let text = stream_links(&stream);
        assert!(text.ends_with(NO_SUBTITLES));
        assert!(!text.contains("Subtitles:"));
    }

    #[test]
    fn test_resolution_failures_are_fixed_messages() {
        assert_eq!(
            resolution("one-piece-100", 1200, &ResolutionResult::EpisodeNotFound),
            "Episode 1200 not found for one-piece-100."
        );
        assert_eq!(
            resolution("one-piece-100", 1, &ResolutionResult::ServerUnavailable),
            "HD-2 server not available for this episode."
        );
        assert_eq!(
            resolution("one-piece-100", 1, &ResolutionResult::TransportError),
            RESOLVE_FAILED
        );
    }

    #[test]
    fn test_help_lists_commands() {
        let text = help();
        assert!(text.contains("/search"));
        assert!(text.contains("/get"));
    }
}
