//! Discovery of LiveScore's current Next.js build id.
//!
//! The internal data endpoints live under `/_next/data/<build id>/…` and the
//! build id changes with every frontend deployment.  It is not published
//! anywhere except the homepage markup, so we fetch `/` and look for it in
//! two places, in order:
//!
//! 1. `<script src="/_next/static/<build id>/…">` tags (skipping the
//!    `chunks` directory, which sits at the same depth),
//! 2. the `<script id="__NEXT_DATA__">` JSON blob, via its `"buildId"` key.

use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use tracing::{debug, info};

use super::cache::BuildIdCache;
use crate::error::{Result, ScrapeError};
use crate::models::BuildId;

/// Path segment that matches the static-asset pattern but is not a build id.
const CHUNKS_DIR: &str = "chunks";

/// Resolves (and caches) the provider's build id.
#[derive(Clone)]
pub struct BuildIdResolver {
    http: Client,
    base_url: String,
    cache: BuildIdCache,
}

impl BuildIdResolver {
    pub fn new(http: Client, base_url: &str, cache: BuildIdCache) -> Self {
        BuildIdResolver {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache,
        }
    }

    pub fn cache(&self) -> &BuildIdCache {
        &self.cache
    }

    /// Return the cached build id, discovering it from the homepage on a miss.
    pub async fn resolve(&self) -> Result<BuildId> {
        if let Some(build_id) = self.cache.get().await {
            return Ok(build_id);
        }

        let discovered = self.discover().await?;
        info!("Resolved LiveScore build id: {}", discovered);
        Ok(self.cache.get_or_insert(discovered).await)
    }

    /// Fetch the homepage and extract the build id, bypassing the cache.
    async fn discover(&self) -> Result<BuildId> {
        let url = format!("{}/", self.base_url);
        debug!("Fetching LiveScore homepage from {}", url);

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ScrapeError::resolution_from("failed to fetch LiveScore homepage", e))?;

        let resp = resp.error_for_status().map_err(|e| {
            ScrapeError::resolution_from("LiveScore homepage returned an error status", e)
        })?;

        let html = resp
            .text()
            .await
            .map_err(|e| ScrapeError::resolution_from("failed to read LiveScore homepage", e))?;

        extract_build_id(&html).ok_or_else(|| ScrapeError::resolution("identifier not found"))
    }
}

/// Find the build id in homepage HTML. Pure; no network.
pub fn extract_build_id(html: &str) -> Option<BuildId> {
    let document = Html::parse_document(html);

    if let Some(token) = from_script_sources(&document) {
        debug!("Build id found in script src: {}", token);
        return Some(BuildId::new(token));
    }

    if let Some(token) = from_next_data(&document) {
        debug!("Build id found in __NEXT_DATA__: {}", token);
        return Some(BuildId::new(token));
    }

    None
}

fn from_script_sources(document: &Html) -> Option<String> {
    document
        .select(script_src_selector())
        .filter_map(|script| script.value().attr("src"))
        .filter_map(|src| static_path_regex().captures(src))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .find(|token| !token.is_empty() && *token != CHUNKS_DIR)
        .map(str::to_string)
}

fn from_next_data(document: &Html) -> Option<String> {
    document.select(next_data_selector()).find_map(|script| {
        let text: String = script.text().collect();
        build_id_regex()
            .captures(&text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

fn script_src_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("script[src]").expect("valid selector"))
}

fn next_data_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("script#__NEXT_DATA__").expect("valid selector"))
}

fn static_path_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"/_next/static/([^/]+)/").expect("valid regex"))
}

fn build_id_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r#""buildId"\s*:\s*"([^"]+)""#).expect("valid regex"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::livescore::test_server::FakeProvider;
    use crate::livescore::build_http_client;
    use crate::livescore::ClientOptions;
    use std::sync::atomic::Ordering;

    const HOMEPAGE: &str = r#"<html><head>
        <script src="/_next/static/chunks/webpack-1a2b.js"></script>
        <script src="/_next/static/AbC123xyz/_buildManifest.js"></script>
        </head><body></body></html>"#;

    fn resolver_for(base_url: &str) -> BuildIdResolver {
        let opts = ClientOptions {
            base_url: base_url.to_string(),
            ..ClientOptions::default()
        };
        let http = build_http_client(&opts).unwrap();
        BuildIdResolver::new(http, &opts.base_url, BuildIdCache::new())
    }

    #[test]
    fn test_extract_skips_chunks_dir() {
        assert_eq!(extract_build_id(HOMEPAGE), Some(BuildId::new("AbC123xyz")));
    }

    #[test]
    fn test_extract_only_chunks_falls_through_to_next_data() {
        let html = r#"<html><head>
            <script src="/_next/static/chunks/main.js"></script>
            <script id="__NEXT_DATA__" type="application/json">
              {"props":{},"page":"/","buildId":"nextData42","isFallback":false}
            </script>
            </head></html>"#;
        assert_eq!(extract_build_id(html), Some(BuildId::new("nextData42")));
    }

    #[test]
    fn test_extract_prefers_script_src_over_next_data() {
        let html = r#"<html><head>
            <script src="https://cdn.example.com/_next/static/fromSrc/_ssgManifest.js"></script>
            <script id="__NEXT_DATA__">{"buildId":"fromJson"}</script>
            </head></html>"#;
        assert_eq!(extract_build_id(html), Some(BuildId::new("fromSrc")));
    }

    #[test]
    fn test_extract_ignores_build_id_outside_next_data() {
        let html = r#"<html><body>
            <script>window.x = {"buildId":"inline"};</script>
            </body></html>"#;
        assert_eq!(extract_build_id(html), None);
    }

    #[test]
    fn test_extract_not_found() {
        assert_eq!(extract_build_id("<html><body>maintenance</body></html>"), None);
        assert_eq!(extract_build_id(""), None);
    }

    #[tokio::test]
    async fn test_resolve_caches_across_calls() {
        let fake = FakeProvider::start(200, HOMEPAGE, 200, "{}").await;
        let resolver = resolver_for(&fake.base_url);

        let first = resolver.resolve().await.unwrap();
        let second = resolver.resolve().await.unwrap();

        assert_eq!(first.as_str(), "AbC123xyz");
        assert_eq!(first, second);
        assert_eq!(fake.state.home_hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_resolve_concurrent_callers_agree() {
        let fake = FakeProvider::start(200, HOMEPAGE, 200, "{}").await;
        let resolver = resolver_for(&fake.base_url);

        let calls: Vec<_> = (0..4).map(|_| resolver.resolve()).collect();
        let results = futures_util::future::join_all(calls).await;

        for r in results {
            assert_eq!(r.unwrap().as_str(), "AbC123xyz");
        }
        let hits = fake.state.home_hits.load(Ordering::SeqCst);
        assert!((1..=4).contains(&hits), "unexpected homepage hits: {}", hits);
    }

    #[tokio::test]
    async fn test_resolve_uses_seeded_cache_without_network() {
        let fake = FakeProvider::start(200, HOMEPAGE, 200, "{}").await;
        let mut resolver = resolver_for(&fake.base_url);
        resolver.cache = BuildIdCache::seeded(BuildId::new("preseeded"));

        assert_eq!(resolver.resolve().await.unwrap().as_str(), "preseeded");
        assert_eq!(fake.state.home_hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_resolve_http_500_is_resolution_error() {
        let fake = FakeProvider::start(500, "oops", 200, "{}").await;
        let resolver = resolver_for(&fake.base_url);

        let err = resolver.resolve().await.unwrap_err();
        assert!(err.is_resolution(), "got {:?}", err);
        assert_eq!(resolver.cache().get().await, None);
    }

    #[tokio::test]
    async fn test_resolve_pattern_missing_is_resolution_error() {
        let fake = FakeProvider::start(200, "<html></html>", 200, "{}").await;
        let resolver = resolver_for(&fake.base_url);

        let err = resolver.resolve().await.unwrap_err();
        assert!(err.is_resolution());
        assert!(err.to_string().contains("identifier not found"));
    }

    #[tokio::test]
    async fn test_resolve_unreachable_is_resolution_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let resolver = resolver_for(&format!("http://{}", addr));
        let err = resolver.resolve().await.unwrap_err();
        assert!(err.is_resolution());
    }
}
