// @zen-component: MCP-RequestRouter
//
//! Tool call dispatch.
//!
//! Each call is classified once ([`classify`]) and then executed against the
//! Make API. Remote failures and missing arguments come back as error
//! envelopes (`isError: true`). An unknown tool name is the only failure that
//! escapes as a [`DispatchError`].

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use make_core::models::CreateScenarioRequest;
use make_core::{MakeApi, MakeError, prompt};

use crate::tools::{ManagementTool, ToolRoute, classify};

/// Reply when a scenario run produced no output.
pub const RUN_SUCCESS_MESSAGE: &str = "Scenario executed successfully.";

/// Fatal dispatch failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

/// Recoverable action failures, rendered into error envelopes.
#[derive(Debug, Error)]
enum ActionError {
    #[error("{0}")]
    MissingArguments(&'static str),

    #[error(transparent)]
    Remote(#[from] MakeError),

    #[error("Failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Routes tool calls to Make.
///
/// Holds no per-call state; every field is read-only configuration.
#[derive(Clone)]
pub struct Dispatcher {
    api: Arc<dyn MakeApi>,
    team_id: u64,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn MakeApi>, team_id: u64) -> Self {
        Self { api, team_id }
    }

    /// Dispatch one tool call.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, DispatchError> {
        let arguments = arguments.unwrap_or_default();
        let result = match classify(name) {
            ToolRoute::RunScenario(scenario_id) => self.run_scenario(scenario_id, arguments).await,
            ToolRoute::Management(tool) => self.run_management(tool, &arguments).await,
            ToolRoute::Unknown => {
                warn!(tool = name, "call to unknown tool");
                return Err(DispatchError::UnknownTool(name.to_string()));
            }
        };

        Ok(match result {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(e) => {
                warn!(tool = name, "tool call failed: {e}");
                CallToolResult::error(vec![Content::text(e.to_string())])
            }
        })
    }

    async fn run_scenario(&self, scenario_id: u64, arguments: JsonObject) -> Result<String, ActionError> {
        info!(scenario_id, "running scenario");
        let run = self
            .api
            .run_scenario(scenario_id, Value::Object(arguments))
            .await?;
        debug!(scenario_id, execution_id = ?run.execution_id, "scenario run finished");

        match run.outputs {
            None | Some(Value::Null) => Ok(RUN_SUCCESS_MESSAGE.to_string()),
            Some(outputs) => pretty(&outputs),
        }
    }

    async fn run_management(
        &self,
        tool: ManagementTool,
        arguments: &JsonObject,
    ) -> Result<String, ActionError> {
        match tool {
            ManagementTool::ListTemplates => {
                let category = string_arg(arguments, "category");
                let templates = self
                    .api
                    .list_templates(self.team_id, category.as_deref())
                    .await?;
                pretty(&templates)
            }
            ManagementTool::GetTemplateDetails => {
                let template_id = string_arg(arguments, "templateId")
                    .ok_or(ActionError::MissingArguments("Template ID is required"))?;
                let template = self.api.get_template(&template_id).await?;
                pretty(&template)
            }
            ManagementTool::CreateScenario => self.create_scenario(arguments).await,
            ManagementTool::CreateScenarioFromPrompt => {
                self.create_scenario_from_prompt(arguments).await
            }
        }
    }

    async fn create_scenario(&self, arguments: &JsonObject) -> Result<String, ActionError> {
        let (Some(name), Some(modules)) = (
            string_arg(arguments, "name"),
            present_arg(arguments, "modules"),
        ) else {
            return Err(ActionError::MissingArguments(
                "Name and modules are required for scenario creation",
            ));
        };

        let request = CreateScenarioRequest {
            name,
            description: string_arg(arguments, "description"),
            team_id: self.team_id,
            modules,
            connections: present_arg(arguments, "connections"),
            template_id: string_arg(arguments, "template"),
        };

        let created = self.api.create_scenario(&request).await?;
        info!(scenario_id = created.id, "scenario created");
        Ok(format!(
            "Scenario created successfully!\n\nID: {}\nName: {}\nURL: {}",
            created.id, created.name, created.url
        ))
    }

    async fn create_scenario_from_prompt(&self, arguments: &JsonObject) -> Result<String, ActionError> {
        let (Some(prompt_text), Some(name)) =
            (string_arg(arguments, "prompt"), string_arg(arguments, "name"))
        else {
            return Err(ActionError::MissingArguments("Prompt and name are required"));
        };

        let modules = prompt::draft_modules(&prompt_text, &name);
        let request = CreateScenarioRequest {
            name,
            description: Some(format!("Created from prompt: {prompt_text}")),
            team_id: self.team_id,
            modules: serde_json::to_value(modules)?,
            connections: None,
            template_id: None,
        };

        let created = self.api.create_scenario(&request).await?;
        info!(scenario_id = created.id, "scenario created from prompt");
        Ok(format!(
            "Scenario created successfully from your prompt!\n\nID: {}\nName: {}\nURL: {}\n\nPrompt: \"{}\"",
            created.id, created.name, created.url, prompt_text
        ))
    }
}

fn pretty<T: Serialize>(value: &T) -> Result<String, ActionError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Non-empty string argument. Numbers are accepted and stringified.
fn string_arg(arguments: &JsonObject, key: &str) -> Option<String> {
    match arguments.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Argument forwarded as-is; absent and `null` count as missing.
fn present_arg(arguments: &JsonObject, key: &str) -> Option<Value> {
    match arguments.get(key)? {
        Value::Null => None,
        value => Some(value.clone()),
    }
}
