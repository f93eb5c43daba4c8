//! Data structures and types for anilink
//!
//! Contains the shared models passed between the content client, the
//! resolution pipeline and the renderers:
//! - **Search**: catalog titles
//! - **Episodes**: episode entries with free-text titles
//! - **Servers**: delivery servers for one episode
//! - **Streams**: the final link plus subtitle tracks

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Server name the pipeline always asks for.
pub const PREFERRED_SERVER: &str = "HD-2";

// =============================================================================
// Search Models
// =============================================================================

/// Catalog entry returned by a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    #[serde(rename = "title")]
    pub display_name: String,
    #[serde(rename = "id")]
    pub identifier: String,
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (slug: {})", self.display_name, self.identifier)
    }
}

// =============================================================================
// Episode Models
// =============================================================================

static EPISODE_NUMBER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)episode\s*(\d+)").ok());

/// Single episode of an anime
///
/// The upstream API has no structured episode number, only a display
/// title like `"Episode 12"`. The number is always derived from
/// `raw_title` through [`parse_episode_number`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    #[serde(rename = "id")]
    pub identifier: String,
    #[serde(rename = "title")]
    pub raw_title: String,
}

impl Episode {
    /// Episode number embedded in the title, if any
    pub fn number(&self) -> Option<u32> {
        parse_episode_number(&self.raw_title)
    }
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.raw_title, self.identifier)
    }
}

/// Extract the episode number from free text like "Episode 12 - The Duel"
///
/// Matches `episode` case-insensitively, optional whitespace, then decimal
/// digits. Only the first occurrence counts. Leading zeros are accepted;
/// numbers that overflow `u32` yield `None`.
pub fn parse_episode_number(text: &str) -> Option<u32> {
    let re = EPISODE_NUMBER.as_ref()?;
    let caps = re.captures(text)?;
    caps.get(1)?.as_str().parse().ok()
}

// =============================================================================
// Server Models
// =============================================================================

/// Audio/subtitle flavour offered by a server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerKind {
    Sub,
    Dub,
    Raw,
}

impl ServerKind {
    /// Value used for the `type` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerKind::Sub => "sub",
            ServerKind::Dub => "dub",
            ServerKind::Raw => "raw",
        }
    }
}

impl fmt::Display for ServerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named delivery endpoint for one episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    pub name: String,
    pub kind: ServerKind,
}

impl Server {
    /// True for the subtitled server the pipeline consumes
    pub fn is_preferred(&self) -> bool {
        self.kind == ServerKind::Sub && self.name == PREFERRED_SERVER
    }
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

// =============================================================================
// Stream Models
// =============================================================================

/// Subtitle track attached to a stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtitle {
    #[serde(rename = "lang")]
    pub language: String,
    #[serde(rename = "src")]
    pub source: String,
}

impl fmt::Display for Subtitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.language, self.source)
    }
}

/// Final streaming link with its subtitles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    #[serde(rename = "streamingLink")]
    pub streaming_link: String,
    #[serde(default)]
    pub subtitles: Vec<Subtitle>,
}

// =============================================================================
// Resolution Result
// =============================================================================

/// Outcome of resolving an anime + episode number to a stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "stream", rename_all = "snake_case")]
pub enum ResolutionResult {
    Success(StreamDescriptor),
    EpisodeNotFound,
    ServerUnavailable,
    TransportError,
}

impl ResolutionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ResolutionResult::Success(_))
    }

    /// The stream, when resolution succeeded
    pub fn stream(&self) -> Option<&StreamDescriptor> {
        match self {
            ResolutionResult::Success(stream) => Some(stream),
            _ => None,
        }
    }
}
