use clap::Parser;
use std::time::Duration;

use livescore_results::livescore::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use livescore_results::{BuildId, ClientOptions, TeamIdentity};

/// Print a team's recent LiveScore results as JSON lines
#[derive(Parser, Debug, Clone)]
#[command(name = "livescore-results", version, about)]
pub struct Config {
    /// Team name as it appears in LiveScore URLs (e.g. west-ham-united)
    #[arg(long, env = "TEAM_NAME")]
    pub team_name: String,

    /// Numeric team id from the LiveScore URL (e.g. 252)
    #[arg(long, env = "TEAM_ID")]
    pub team_id: String,

    /// Maximum number of games to print
    #[arg(long, env = "GAME_LIMIT", default_value = "10")]
    pub limit: usize,

    /// Print every game the provider returns, ignoring --limit
    #[arg(long, default_value = "false")]
    pub all: bool,

    /// LiveScore site root
    #[arg(long, env = "LIVESCORE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// HTTP timeout per request, in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value = "10")]
    pub timeout_secs: u64,

    /// User-Agent header sent to LiveScore
    #[arg(long, env = "LIVESCORE_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Known build id; skips homepage discovery
    #[arg(long, env = "LIVESCORE_BUILD_ID")]
    pub build_id: Option<String>,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.team_name.trim().is_empty() {
            anyhow::bail!("team_name must not be empty");
        }
        if self.team_id.is_empty() || !self.team_id.chars().all(|c| c.is_ascii_digit()) {
            anyhow::bail!("team_id must be numeric, got '{}'", self.team_id);
        }
        if !self.all && self.limit == 0 {
            anyhow::bail!("limit must be at least 1 (use --all for no limit)");
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be positive");
        }
        if let Some(id) = &self.build_id {
            if id.trim().is_empty() {
                anyhow::bail!("build_id must not be empty when given");
            }
        }
        Ok(())
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }

    pub fn team(&self) -> TeamIdentity {
        TeamIdentity::new(self.team_name.trim(), self.team_id.as_str())
    }

    pub fn game_limit(&self) -> Option<usize> {
        if self.all {
            None
        } else {
            Some(self.limit)
        }
    }

    pub fn seeded_build_id(&self) -> Option<BuildId> {
        self.build_id.as_deref().map(|id| BuildId::new(id.trim()))
    }
}
