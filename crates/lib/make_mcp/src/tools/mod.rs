//! Tool naming and classification.
//!
//! Scenario tools are named `run_scenario_<id>`; the router parses the id
//! back out of the name, so both directions live here.

pub mod management;

use std::fmt;

/// Prefix of every generated scenario tool name.
pub const SCENARIO_TOOL_PREFIX: &str = "run_scenario_";

/// Static management actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagementTool {
    ListTemplates,
    GetTemplateDetails,
    CreateScenario,
    CreateScenarioFromPrompt,
}

impl ManagementTool {
    pub const ALL: [ManagementTool; 4] = [
        ManagementTool::ListTemplates,
        ManagementTool::GetTemplateDetails,
        ManagementTool::CreateScenario,
        ManagementTool::CreateScenarioFromPrompt,
    ];

    /// Wire name of the tool.
    pub fn name(self) -> &'static str {
        match self {
            ManagementTool::ListTemplates => "list_templates",
            ManagementTool::GetTemplateDetails => "get_template_details",
            ManagementTool::CreateScenario => "create_scenario",
            ManagementTool::CreateScenarioFromPrompt => "create_scenario_from_prompt",
        }
    }

    /// Look up a management tool by its exact (case-sensitive) name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }
}

impl fmt::Display for ManagementTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where an incoming tool call should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolRoute {
    RunScenario(u64),
    Management(ManagementTool),
    Unknown,
}

/// Name of the tool that runs the given scenario.
pub fn scenario_tool_name(scenario_id: u64) -> String {
    format!("{SCENARIO_TOOL_PREFIX}{scenario_id}")
}

/// Classify a tool name.
///
/// A scenario route needs the prefix followed by ASCII digits only; anything
/// else after the prefix (signs, spaces, letters) or an id that does not fit
/// in a `u64` is unknown.
pub fn classify(name: &str) -> ToolRoute {
    if let Some(digits) = name.strip_prefix(SCENARIO_TOOL_PREFIX) {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return digits
                .parse::<u64>()
                .map(ToolRoute::RunScenario)
                .unwrap_or(ToolRoute::Unknown);
        }
        return ToolRoute::Unknown;
    }

    ManagementTool::from_name(name)
        .map(ToolRoute::Management)
        .unwrap_or(ToolRoute::Unknown)
}
