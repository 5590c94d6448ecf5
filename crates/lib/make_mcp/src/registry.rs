// @zen-component: MCP-ToolRegistry
//
//! Tool discovery.
//!
//! Every `tools/list` request rebuilds the list from live Make state: one tool
//! per on-demand scenario plus the static management tools. Nothing is cached.

use std::sync::Arc;

use futures::future::try_join_all;
use rmcp::model::Tool;
use thiserror::Error;
use tracing::{debug, info, warn};

use make_core::models::Scenario;
use make_core::{MakeApi, MakeError};

use crate::schema;
use crate::tools::{management, scenario_tool_name};

/// Discovery failures. Any failure aborts the whole listing.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Failed to list scenarios: {0}")]
    ListScenarios(#[source] MakeError),

    #[error("Failed to fetch interface of scenario {scenario_id}: {source}")]
    Interface {
        scenario_id: u64,
        #[source]
        source: MakeError,
    },
}

/// Build the full tool list for a team.
///
/// Interfaces of on-demand scenarios are fetched concurrently. The join is
/// all-or-nothing: if any interface fetch fails, discovery fails.
pub async fn list_tools(api: &dyn MakeApi, team_id: u64) -> Result<Vec<Tool>, DiscoveryError> {
    let scenarios = api
        .list_scenarios(team_id)
        .await
        .map_err(DiscoveryError::ListScenarios)?;

    let on_demand: Vec<Scenario> = scenarios.into_iter().filter(Scenario::is_on_demand).collect();
    debug!(team_id, count = on_demand.len(), "on-demand scenarios");

    let scenario_tools = try_join_all(on_demand.iter().map(|scenario| scenario_tool(api, scenario)))
        .await
        .inspect_err(|e| warn!("tool discovery failed: {e}"))?;

    let mut tools = scenario_tools;
    tools.extend(management::descriptors());

    info!(team_id, tools = tools.len(), "tool discovery complete");
    Ok(tools)
}

async fn scenario_tool(api: &dyn MakeApi, scenario: &Scenario) -> Result<Tool, DiscoveryError> {
    let interface = api
        .scenario_interface(scenario.id)
        .await
        .map_err(|source| DiscoveryError::Interface {
            scenario_id: scenario.id,
            source,
        })?;

    let input_schema = schema::input_schema(&interface.input).into_json_object();
    Ok(Tool::new(
        scenario_tool_name(scenario.id),
        scenario_description(scenario),
        Arc::new(input_schema),
    ))
}

/// Tool description: the scenario name, with its description in parentheses.
fn scenario_description(scenario: &Scenario) -> String {
    match scenario.description.as_deref().filter(|d| !d.is_empty()) {
        Some(description) => format!("{} ({description})", scenario.name),
        None => scenario.name.clone(),
    }
}
