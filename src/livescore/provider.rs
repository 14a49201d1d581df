use async_trait::async_trait;

use crate::error::Result;
use crate::models::{GameRecord, TeamIdentity};

/// Trait that every team-results source must implement.
#[async_trait]
pub trait GameProvider: Send + Sync {
    /// Games for `team` in the order the source lists them, at most `limit`.
    async fn fetch_team_games(
        &self,
        team: &TeamIdentity,
        limit: Option<usize>,
    ) -> Result<Vec<GameRecord>>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
