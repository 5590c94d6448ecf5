//! In-memory [`MakeApi`] used by the registry and router tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use make_core::models::{
    CreateScenarioRequest, CreatedScenario, Scenario, ScenarioInterface, ScenarioRun, Template,
};
use make_core::{MakeApi, MakeError};

/// Scripted Make API. Unscripted lookups fail with a 404 `MakeError`.
#[derive(Default)]
pub struct FakeMake {
    scenarios: Vec<Scenario>,
    list_error: Option<MakeError>,
    interfaces: HashMap<u64, Value>,
    runs: HashMap<u64, Result<Option<Value>, MakeError>>,
    templates: Vec<Template>,
    interface_calls: Mutex<Vec<u64>>,
    run_calls: Mutex<Vec<(u64, Value)>>,
    template_queries: Mutex<Vec<Option<String>>>,
    created: Mutex<Vec<CreateScenarioRequest>>,
}

impl FakeMake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scenario(
        mut self,
        id: u64,
        name: &str,
        description: Option<&str>,
        scheduling: &str,
    ) -> Self {
        let scenario = serde_json::from_value(json!({
            "id": id,
            "name": name,
            "description": description,
            "scheduling": {"type": scheduling},
        }))
        .expect("valid scenario");
        self.scenarios.push(scenario);
        self
    }

    pub fn failing_list(mut self, error: MakeError) -> Self {
        self.list_error = Some(error);
        self
    }

    pub fn with_interface(mut self, id: u64, input: Value) -> Self {
        self.interfaces.insert(id, input);
        self
    }

    pub fn with_run(mut self, id: u64, outcome: Result<Option<Value>, MakeError>) -> Self {
        self.runs.insert(id, outcome);
        self
    }

    pub fn with_template(mut self, template: Value) -> Self {
        self.templates
            .push(serde_json::from_value(template).expect("valid template"));
        self
    }

    pub fn interface_calls(&self) -> Vec<u64> {
        self.interface_calls.lock().unwrap().clone()
    }

    pub fn run_calls(&self) -> Vec<(u64, Value)> {
        self.run_calls.lock().unwrap().clone()
    }

    pub fn template_queries(&self) -> Vec<Option<String>> {
        self.template_queries.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<CreateScenarioRequest> {
        self.created.lock().unwrap().clone()
    }

    fn not_found(what: &str) -> MakeError {
        MakeError::normalize::<()>(
            reqwest_status(404),
            Ok(format!(r#"{{"message":"{what} not found"}}"#).as_bytes()),
        )
    }
}

fn reqwest_status(code: u16) -> make_core::error::StatusCode {
    make_core::error::StatusCode::from_u16(code).expect("valid status")
}

#[async_trait]
impl MakeApi for FakeMake {
    async fn list_scenarios(&self, _team_id: u64) -> Result<Vec<Scenario>, MakeError> {
        match &self.list_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.scenarios.clone()),
        }
    }

    async fn scenario_interface(&self, scenario_id: u64) -> Result<ScenarioInterface, MakeError> {
        self.interface_calls.lock().unwrap().push(scenario_id);
        let input = self
            .interfaces
            .get(&scenario_id)
            .ok_or_else(|| Self::not_found("Scenario"))?;
        Ok(serde_json::from_value(json!({"input": input, "output": null})).expect("valid interface"))
    }

    async fn run_scenario(&self, scenario_id: u64, data: Value) -> Result<ScenarioRun, MakeError> {
        self.run_calls.lock().unwrap().push((scenario_id, data));
        match self.runs.get(&scenario_id) {
            Some(Ok(outputs)) => Ok(ScenarioRun {
                execution_id: Some(format!("exec-{scenario_id}")),
                outputs: outputs.clone(),
            }),
            Some(Err(err)) => Err(err.clone()),
            None => Err(Self::not_found("Scenario")),
        }
    }

    async fn list_templates(
        &self,
        _team_id: u64,
        category: Option<&str>,
    ) -> Result<Vec<Template>, MakeError> {
        self.template_queries
            .lock()
            .unwrap()
            .push(category.map(str::to_string));
        Ok(self.templates.clone())
    }

    async fn get_template(&self, template_id: &str) -> Result<Template, MakeError> {
        self.templates
            .iter()
            .find(|t| match &t.id {
                Value::String(id) => id == template_id,
                other => other.to_string() == template_id,
            })
            .cloned()
            .ok_or_else(|| Self::not_found("Template"))
    }

    async fn create_scenario(
        &self,
        request: &CreateScenarioRequest,
    ) -> Result<CreatedScenario, MakeError> {
        self.created.lock().unwrap().push(request.clone());
        let id = 1000 + self.created.lock().unwrap().len() as u64;
        Ok(CreatedScenario {
            id,
            name: request.name.clone(),
            url: format!("https://eu1.make.com/scenarios/{id}/edit"),
        })
    }
}
