//! Make connection configuration.
//!
//! All three connection settings are mandatory. The binary collects them from
//! CLI flags / environment and validates them here before anything talks to
//! the Make API.

use thiserror::Error;

/// Default Make API version.
pub const DEFAULT_API_VERSION: u32 = 2;

/// Default page size when listing scenarios.
pub const DEFAULT_SCENARIO_LIMIT: u32 = 1000;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid zone: {0}")]
    InvalidZone(String),

    #[error("Invalid team ID: {0}")]
    InvalidTeam(String),
}

/// Validated Make connection settings.
#[derive(Clone)]
pub struct MakeConfig {
    /// API token sent as `Authorization: Token <key>`.
    pub api_key: String,
    /// Zone host, e.g. `eu1.make.com`.
    pub zone: String,
    /// Team whose scenarios are exposed.
    pub team_id: u64,
    /// API version segment (`/api/v{n}`).
    pub api_version: u32,
    /// Page size for scenario listing.
    pub scenario_limit: u32,
}

impl std::fmt::Debug for MakeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MakeConfig")
            .field("api_key", &"<redacted>")
            .field("zone", &self.zone)
            .field("team_id", &self.team_id)
            .field("api_version", &self.api_version)
            .field("scenario_limit", &self.scenario_limit)
            .finish()
    }
}

impl MakeConfig {
    /// Validate raw settings into a config with default version and limit.
    ///
    /// The zone may be given with a scheme or trailing slash
    /// (`https://eu1.make.com/`); only the host is kept.
    pub fn new(api_key: &str, zone: &str, team: &str) -> Result<Self, ConfigError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ConfigError::Missing("MAKE_API_KEY"));
        }

        let zone = normalize_zone(zone)?;

        let team = team.trim();
        if team.is_empty() {
            return Err(ConfigError::Missing("MAKE_TEAM"));
        }
        let team_id = team
            .parse::<u64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| ConfigError::InvalidTeam(team.to_string()))?;

        Ok(Self {
            api_key: api_key.to_string(),
            zone,
            team_id,
            api_version: DEFAULT_API_VERSION,
            scenario_limit: DEFAULT_SCENARIO_LIMIT,
        })
    }

    /// Override the API version.
    pub fn with_api_version(mut self, version: u32) -> Self {
        self.api_version = version;
        self
    }

    /// Override the scenario listing page size.
    pub fn with_scenario_limit(mut self, limit: u32) -> Self {
        self.scenario_limit = limit;
        self
    }

    /// Base URL of the REST API, without trailing slash.
    pub fn api_base_url(&self) -> String {
        format!("https://{}/api/v{}", self.zone, self.api_version)
    }

    /// Web editor URL for a scenario.
    pub fn scenario_url(&self, scenario_id: u64) -> String {
        format!("https://{}/scenarios/{}/edit", self.zone, scenario_id)
    }
}

fn normalize_zone(zone: &str) -> Result<String, ConfigError> {
    let zone = zone.trim();
    if zone.is_empty() {
        return Err(ConfigError::Missing("MAKE_ZONE"));
    }

    let host = zone
        .strip_prefix("https://")
        .or_else(|| zone.strip_prefix("http://"))
        .unwrap_or(zone)
        .trim_end_matches('/');

    if host.is_empty() || host.contains('/') || host.contains(char::is_whitespace) {
        return Err(ConfigError::InvalidZone(zone.to_string()));
    }

    Ok(host.to_string())
}
