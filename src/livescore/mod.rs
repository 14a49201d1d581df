pub mod cache;
pub mod fetcher;
pub mod normalize;
pub mod provider;
pub mod resolver;

#[cfg(test)]
pub(crate) mod test_server;

pub use cache::BuildIdCache;
pub use fetcher::TeamResultsFetcher;
pub use normalize::normalize;
pub use provider::GameProvider;
pub use resolver::{extract_build_id, BuildIdResolver};

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::info;

use crate::error::{Result, ScrapeError};
use crate::models::{BuildId, GameRecord, TeamIdentity};

pub const DEFAULT_BASE_URL: &str = "https://www.livescore.com";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings shared by the resolver and the fetcher.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Site root; overridden in tests to point at a local server
    pub base_url: String,
    pub timeout: Duration,
    /// LiveScore serves bot-looking clients a different page
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

pub(crate) fn build_http_client(opts: &ClientOptions) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(opts.timeout)
        .user_agent(opts.user_agent.as_str())
        .build()
}

/// Team-results client for LiveScore's internal Next.js data routes.
#[derive(Clone)]
pub struct LiveScore {
    fetcher: TeamResultsFetcher,
}

impl LiveScore {
    /// Build a client around an injected build-id cache. Clones of `cache`
    /// handed to other clients share the resolved id.
    pub fn new(opts: &ClientOptions, cache: BuildIdCache) -> Result<Self> {
        let http = build_http_client(opts)
            .map_err(|e| ScrapeError::fetch_from("failed to build HTTP client", e))?;
        let resolver = BuildIdResolver::new(http.clone(), &opts.base_url, cache);
        Ok(LiveScore {
            fetcher: TeamResultsFetcher::new(http, &opts.base_url, resolver),
        })
    }

    pub fn cache(&self) -> &BuildIdCache {
        self.fetcher.resolver().cache()
    }

    pub async fn resolve_build_id(&self) -> Result<BuildId> {
        self.fetcher.resolver().resolve().await
    }

    /// Raw `results.json` payload, untouched.
    pub async fn fetch_raw(&self, team: &TeamIdentity, build_id: Option<&BuildId>) -> Result<Value> {
        self.fetcher.fetch(team, build_id).await
    }

    /// Fetch and normalize in one go.
    pub async fn team_games(
        &self,
        team: &TeamIdentity,
        limit: Option<usize>,
    ) -> Result<Vec<GameRecord>> {
        let payload = self.fetch_raw(team, None).await?;
        let games = normalize(&payload, limit)?;
        info!(
            "Fetched {} game(s) for {} ({})",
            games.len(),
            team.slug,
            team.id
        );
        Ok(games)
    }
}

#[async_trait]
impl GameProvider for LiveScore {
    fn name(&self) -> &str {
        "LiveScore"
    }

    async fn fetch_team_games(
        &self,
        team: &TeamIdentity,
        limit: Option<usize>,
    ) -> Result<Vec<GameRecord>> {
        self.team_games(team, limit).await
    }
}

/// Process-wide build-id cache used by [`get_team_games`].
pub fn global_cache() -> &'static BuildIdCache {
    static CACHE: OnceLock<BuildIdCache> = OnceLock::new();
    CACHE.get_or_init(BuildIdCache::new)
}

/// One-shot entry point: the last `limit` games of a team, using the default
/// LiveScore settings and the process-wide build-id cache.
pub async fn get_team_games(
    team_id: &str,
    team_name: &str,
    limit: Option<usize>,
) -> Result<Vec<GameRecord>> {
    let client = LiveScore::new(&ClientOptions::default(), global_cache().clone())?;
    client
        .team_games(&TeamIdentity::new(team_name, team_id), limit)
        .await
}
