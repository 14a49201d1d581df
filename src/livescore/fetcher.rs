use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::resolver::BuildIdResolver;
use crate::error::{Result, ScrapeError};
use crate::models::{BuildId, TeamIdentity};

/// Fetches the raw `results.json` payload for a team.
#[derive(Clone)]
pub struct TeamResultsFetcher {
    http: Client,
    base_url: String,
    resolver: BuildIdResolver,
}

impl TeamResultsFetcher {
    pub fn new(http: Client, base_url: &str, resolver: BuildIdResolver) -> Self {
        TeamResultsFetcher {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            resolver,
        }
    }

    pub fn resolver(&self) -> &BuildIdResolver {
        &self.resolver
    }

    /// GET the team's results payload. Without an explicit `build_id` the
    /// resolver is consulted (hitting the homepage only on a cold cache).
    /// No retries: one call, one request.
    pub async fn fetch(&self, team: &TeamIdentity, build_id: Option<&BuildId>) -> Result<Value> {
        let build_id = match build_id {
            Some(id) => id.clone(),
            None => self.resolver.resolve().await?,
        };

        let url = results_url(&self.base_url, &build_id, team)?;
        debug!("Fetching team results from {}", url);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::fetch_from("team results request failed", e))?;

        let resp = resp.error_for_status().map_err(|e| {
            ScrapeError::fetch_from("team results endpoint returned an error status", e)
        })?;

        resp.json::<Value>()
            .await
            .map_err(|e| ScrapeError::fetch_from("team results body is not valid JSON", e))
    }
}

/// `{base}/_next/data/{build}/en/football/team/{slug}/{id}/results.json`
/// with the slug and id repeated as query parameters; the provider's router
/// wants both.
pub fn results_url(base_url: &str, build_id: &BuildId, team: &TeamIdentity) -> Result<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| ScrapeError::fetch(format!("invalid base URL '{}': {}", base_url, e)))?;

    url.path_segments_mut()
        .map_err(|_| ScrapeError::fetch(format!("base URL '{}' cannot take a path", base_url)))?
        .pop_if_empty()
        .extend([
            "_next",
            "data",
            build_id.as_str(),
            "en",
            "football",
            "team",
            team.slug.as_str(),
            team.id.as_str(),
            "results.json",
        ]);

    url.query_pairs_mut()
        .append_pair("sport", "football")
        .append_pair("teamName", &team.slug)
        .append_pair("teamId", &team.id);

    Ok(url)
}
