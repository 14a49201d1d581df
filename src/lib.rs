//! Recent team results scraped from LiveScore's internal Next.js data routes.
//!
//! LiveScore has no public API.  Its web frontend loads team pages from
//! `/_next/data/<build id>/…/results.json`, where the build id changes on
//! every deployment.  This crate discovers that id from the homepage, caches
//! it, requests a team's results and flattens the provider's nested payload
//! into [`GameRecord`]s.

pub mod error;
pub mod livescore;
pub mod models;

pub use error::ScrapeError;
pub use livescore::{get_team_games, BuildIdCache, ClientOptions, GameProvider, LiveScore};
pub use models::{BuildId, GameRecord, TeamIdentity};
