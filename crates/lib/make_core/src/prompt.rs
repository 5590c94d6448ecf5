//! Prompt-based module drafting.
//!
//! Produces a starter module list for a scenario described in natural
//! language. The draft is currently a fixed webhook → JSON parser → email
//! pipeline regardless of the prompt.

use serde_json::{Map, Value, json};

use crate::models::{ModuleConfiguration, ModulePosition};

/// Draft the modules for a new scenario named `name` from `prompt`.
pub fn draft_modules(prompt: &str, name: &str) -> Vec<ModuleConfiguration> {
    tracing::debug!(prompt_len = prompt.len(), name, "drafting modules from prompt");

    vec![
        module(
            "Webhook",
            "webhook",
            json!({"url": "", "method": "GET"}),
            100.0,
        ),
        module(
            "JSON Parser",
            "jsonparser",
            json!({"sourceData": "{{1.body}}"}),
            300.0,
        ),
        module(
            "Email Sender",
            "email",
            json!({
                "to": "user@example.com",
                "subject": format!("Scenario {name} result"),
                "body": "Data received from webhook: {{2.result}}",
            }),
            500.0,
        ),
    ]
}

fn module(name: &str, module_type: &str, parameters: Value, x: f64) -> ModuleConfiguration {
    let parameters = match parameters {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    ModuleConfiguration {
        name: name.to_string(),
        module_type: module_type.to_string(),
        parameters,
        position: Some(ModulePosition { x, y: 100.0 }),
    }
}
