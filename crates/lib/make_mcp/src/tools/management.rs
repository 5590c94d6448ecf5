// @awa-component: MCP-ManagementTools
//
//! Descriptors of the static management tools.

use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use serde_json::{Value, json};

use super::ManagementTool;

/// Build the descriptor of a management tool.
pub fn descriptor(tool: ManagementTool) -> Tool {
    let (description, schema) = match tool {
        ManagementTool::ListTemplates => (
            "List available scenario templates for creating new automation flows",
            list_templates_schema(),
        ),
        ManagementTool::GetTemplateDetails => (
            "Get detailed information about a specific template",
            get_template_details_schema(),
        ),
        ManagementTool::CreateScenario => (
            "Create a new automation scenario in Make",
            create_scenario_schema(),
        ),
        ManagementTool::CreateScenarioFromPrompt => (
            "Create a new automation scenario from a natural language prompt",
            create_scenario_from_prompt_schema(),
        ),
    };

    Tool::new(tool.name(), description, Arc::new(into_object(schema)))
}

/// Descriptors of every management tool, in declaration order.
pub fn descriptors() -> Vec<Tool> {
    ManagementTool::ALL.into_iter().map(descriptor).collect()
}

fn into_object(schema: Value) -> JsonObject {
    match schema {
        Value::Object(map) => map,
        _ => JsonObject::new(),
    }
}

fn list_templates_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "category": {
                "type": "string",
                "description": "Optional category to filter templates"
            }
        }
    })
}

fn get_template_details_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "templateId": {
                "type": "string",
                "description": "The ID of the template to retrieve"
            }
        },
        "required": ["templateId"]
    })
}

fn create_scenario_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": {
                "type": "string",
                "description": "Name of the new scenario"
            },
            "description": {
                "type": "string",
                "description": "Optional description of the scenario"
            },
            "modules": {
                "type": "array",
                "description": "Array of modules to include in the scenario",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "Name of this module instance"
                        },
                        "type": {
                            "type": "string",
                            "description": "Type of the module (e.g., \"http\", \"gmail\", \"slack\", etc.)"
                        },
                        "parameters": {
                            "type": "object",
                            "description": "Configuration parameters for this module"
                        },
                        "position": {
                            "type": "object",
                            "description": "Optional position in the visual editor",
                            "properties": {
                                "x": {"type": "number"},
                                "y": {"type": "number"}
                            }
                        }
                    },
                    "required": ["name", "type"]
                }
            },
            "connections": {
                "type": "array",
                "description": "Optional array of connections between modules",
                "items": {
                    "type": "object",
                    "properties": {
                        "from": {
                            "type": "object",
                            "properties": {
                                "moduleId": {"type": "string"},
                                "outputId": {"type": "string"}
                            },
                            "required": ["moduleId"]
                        },
                        "to": {
                            "type": "object",
                            "properties": {
                                "moduleId": {"type": "string"},
                                "inputId": {"type": "string"}
                            },
                            "required": ["moduleId"]
                        }
                    },
                    "required": ["from", "to"]
                }
            },
            "template": {
                "type": "string",
                "description": "Optional template ID to use as a starting point"
            }
        },
        "required": ["name", "modules"]
    })
}

fn create_scenario_from_prompt_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "prompt": {
                "type": "string",
                "description": "Natural language description of the scenario you want to create"
            },
            "name": {
                "type": "string",
                "description": "Name for the new scenario"
            }
        },
        "required": ["prompt", "name"]
    })
}
