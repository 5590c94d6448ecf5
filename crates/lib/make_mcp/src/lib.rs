//! # make_mcp
//!
//! MCP (Model Context Protocol) layer exposing Make scenarios as tools.
//!
//! Each on-demand scenario of the configured team becomes a
//! `run_scenario_<id>` tool whose input schema is translated from the
//! scenario interface. Four management tools cover templates and scenario
//! creation. The server speaks MCP over stdio.

pub mod hooks;
pub mod registry;
pub mod router;
pub mod schema;
pub mod server;
pub mod tools;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use rmcp::ServiceExt;
use thiserror::Error;
use tracing::info;

use make_core::MakeApi;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Failures of the stdio transport.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("Failed to start MCP server: {0}")]
    Start(String),

    #[error("MCP server stopped abnormally: {0}")]
    Stopped(String),
}

/// Serve MCP over stdin/stdout until the client disconnects.
///
/// Stdout carries the protocol, so nothing else may write to it while this
/// runs.
pub async fn serve_stdio(api: Arc<dyn MakeApi>, team_id: u64) -> Result<(), ServeError> {
    let hook_pipeline = Arc::new(hooks::default_pipeline());
    let server = server::MakeMcpServer::new(api, team_id, hook_pipeline);

    let running = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| ServeError::Start(e.to_string()))?;
    info!(team_id, "MCP server listening on stdio");

    let reason = running
        .waiting()
        .await
        .map_err(|e| ServeError::Stopped(e.to_string()))?;
    info!(?reason, "MCP server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
