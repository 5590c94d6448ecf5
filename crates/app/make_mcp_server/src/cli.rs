use clap::{Args, Parser, Subcommand};

use make_core::config::{DEFAULT_API_VERSION, DEFAULT_SCENARIO_LIMIT};
use make_core::{ConfigError, MakeConfig};

/// Expose Make scenarios as MCP tools over stdio.
#[derive(Parser, Debug)]
#[command(name = "make-mcp", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Serve MCP over stdin/stdout (default).
    Serve,
    /// Run tool discovery once and print the descriptors as JSON.
    Tools,
    /// Print the version.
    Version,
}

/// Make connection settings. Each falls back to its environment variable.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Make API token.
    #[arg(long, env = "MAKE_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Make zone host, e.g. eu1.make.com.
    #[arg(long, env = "MAKE_ZONE", global = true)]
    pub zone: Option<String>,

    /// Team whose on-demand scenarios are exposed.
    #[arg(long, env = "MAKE_TEAM", global = true)]
    pub team: Option<String>,

    /// Make API version.
    #[arg(long, env = "MAKE_API_VERSION", default_value_t = DEFAULT_API_VERSION, global = true)]
    pub api_version: u32,

    /// Page size used when listing scenarios.
    #[arg(long, env = "MAKE_SCENARIO_LIMIT", default_value_t = DEFAULT_SCENARIO_LIMIT, global = true)]
    pub scenario_limit: u32,
}

impl ConnectionArgs {
    /// Validate into a [`MakeConfig`]. Missing values are reported by
    /// their environment variable name.
    pub fn into_config(self) -> Result<MakeConfig, ConfigError> {
        let api_key = self.api_key.ok_or(ConfigError::Missing("MAKE_API_KEY"))?;
        let zone = self.zone.ok_or(ConfigError::Missing("MAKE_ZONE"))?;
        let team = self.team.ok_or(ConfigError::Missing("MAKE_TEAM"))?;

        Ok(MakeConfig::new(&api_key, &zone, &team)?
            .with_api_version(self.api_version)
            .with_scenario_limit(self.scenario_limit))
    }
}
