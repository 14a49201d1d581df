use serde::{Deserialize, Serialize};
use std::fmt;

/// Next.js build identifier of the currently deployed LiveScore frontend.
/// Required as a path segment of every `/_next/data/` request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildId(String);

impl BuildId {
    pub fn new(token: impl Into<String>) -> Self {
        BuildId(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A team as it appears in LiveScore URLs, e.g. `/team/west-ham-united/252/`.
/// Used verbatim; never checked against the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamIdentity {
    /// URL slug, e.g. "west-ham-united"
    pub slug: String,
    /// Numeric team id, kept as text, e.g. "252"
    pub id: String,
}

impl TeamIdentity {
    pub fn new(slug: impl Into<String>, id: impl Into<String>) -> Self {
        TeamIdentity {
            slug: slug.into(),
            id: id.into(),
        }
    }
}

/// One finished or scheduled match, flattened out of the provider payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// "YYYY-MM-DD HH:MM", or the raw provider token when it does not parse
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Home Team")]
    pub home_team: String,
    #[serde(rename = "Away Team")]
    pub away_team: String,
    /// "H-A", or "vs" when either side's score is missing
    #[serde(rename = "Score")]
    pub score: String,
    #[serde(rename = "Competition")]
    pub competition: String,
    #[serde(rename = "Stage")]
    pub stage: String,
    /// Provider status code, e.g. "FT"
    #[serde(rename = "Status")]
    pub status: String,
}
