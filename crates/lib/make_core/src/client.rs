// @zen-component: MAKE-ApiClient
//
//! Make REST API client.
//!
//! [`MakeApi`] is the seam the MCP layer depends on; [`MakeClient`] is the
//! reqwest-backed implementation. Every failure is returned as a
//! [`MakeError`]; no call is retried.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::MakeConfig;
use crate::error::MakeError;
use crate::models::{
    CreateScenarioRequest, CreateScenarioResponse, CreatedScenario, RunScenarioBody, Scenario,
    ScenarioInterface, ScenarioInterfaceResponse, ScenarioRun, ScenariosResponse, Template,
    TemplateResponse, TemplatesResponse,
};

/// Operations the MCP layer needs from Make.
#[async_trait]
pub trait MakeApi: Send + Sync {
    /// List the scenarios of a team.
    async fn list_scenarios(&self, team_id: u64) -> Result<Vec<Scenario>, MakeError>;

    /// Fetch the input/output interface of a scenario.
    async fn scenario_interface(&self, scenario_id: u64) -> Result<ScenarioInterface, MakeError>;

    /// Run a scenario synchronously with the given input data.
    async fn run_scenario(&self, scenario_id: u64, data: Value) -> Result<ScenarioRun, MakeError>;

    /// List scenario templates, optionally filtered by category.
    async fn list_templates(
        &self,
        team_id: u64,
        category: Option<&str>,
    ) -> Result<Vec<Template>, MakeError>;

    /// Fetch a single template.
    async fn get_template(&self, template_id: &str) -> Result<Template, MakeError>;

    /// Create a new scenario.
    async fn create_scenario(
        &self,
        request: &CreateScenarioRequest,
    ) -> Result<CreatedScenario, MakeError>;
}

/// HTTP client for the Make API.
#[derive(Debug, Clone)]
pub struct MakeClient {
    http: Client,
    base_url: Url,
    config: MakeConfig,
}

impl MakeClient {
    /// Create a client for the configured zone.
    pub fn new(config: MakeConfig) -> Result<Self, MakeError> {
        let base_url = config.api_base_url();
        Self::with_base_url(config, &base_url)
    }

    /// Create a client that talks to an explicit base URL (e.g. a proxy).
    pub fn with_base_url(config: MakeConfig, base_url: &str) -> Result<Self, MakeError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| MakeError::new(format!("Invalid base URL {base_url}: {e}")))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder()
            .user_agent(concat!("make-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            config,
        })
    }

    /// Build a request to the API path made of `segments`. Each segment is
    /// percent-encoded, so caller-supplied ids stay a single path segment.
    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, MakeError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| MakeError::new(format!("Invalid base URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        debug!(%method, %url, "make request");
        Ok(self
            .http
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, format!("Token {}", self.config.api_key)))
    }

    /// Send a request and decode a JSON success body, normalizing failures.
    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, MakeError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MakeError::from_response(response).await);
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| MakeError::from(e).with_status(status))
    }
}

#[async_trait]
impl MakeApi for MakeClient {
    async fn list_scenarios(&self, team_id: u64) -> Result<Vec<Scenario>, MakeError> {
        let limit = self.config.scenario_limit.to_string();
        let team = team_id.to_string();
        let request = self
            .request(Method::GET, &["scenarios"])?
            .query(&[("teamId", team.as_str()), ("pg[limit]", limit.as_str())]);
        let response: ScenariosResponse = Self::send(request).await?;
        Ok(response.scenarios)
    }

    async fn scenario_interface(&self, scenario_id: u64) -> Result<ScenarioInterface, MakeError> {
        let id = scenario_id.to_string();
        let request = self.request(Method::GET, &["scenarios", id.as_str(), "interface"])?;
        let response: ScenarioInterfaceResponse = Self::send(request).await?;
        Ok(response.interface)
    }

    async fn run_scenario(&self, scenario_id: u64, data: Value) -> Result<ScenarioRun, MakeError> {
        let id = scenario_id.to_string();
        let request = self
            .request(Method::POST, &["scenarios", id.as_str(), "run"])?
            .json(&RunScenarioBody {
                data: &data,
                responsive: true,
            });
        Self::send(request).await
    }

    async fn list_templates(
        &self,
        team_id: u64,
        category: Option<&str>,
    ) -> Result<Vec<Template>, MakeError> {
        let team = team_id.to_string();
        let mut query = vec![("teamId", team.as_str())];
        if let Some(category) = category {
            query.push(("category", category));
        }
        let request = self.request(Method::GET, &["templates"])?.query(&query);
        let response: TemplatesResponse = Self::send(request).await?;
        Ok(response.templates)
    }

    async fn get_template(&self, template_id: &str) -> Result<Template, MakeError> {
        let request = self.request(Method::GET, &["templates", template_id])?;
        let response: TemplateResponse = Self::send(request).await?;
        Ok(response.template)
    }

    async fn create_scenario(
        &self,
        request: &CreateScenarioRequest,
    ) -> Result<CreatedScenario, MakeError> {
        let builder = self.request(Method::POST, &["scenarios"])?.json(request);
        let response: CreateScenarioResponse = Self::send(builder).await?;
        let mut scenario = response.scenario;
        if scenario.url.is_empty() {
            scenario.url = self.config.scenario_url(scenario.id);
        }
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> MakeClient {
        let config = MakeConfig::new("test-key", "eu1.make.com", "17").unwrap();
        MakeClient::with_base_url(config, &format!("{}/api/v2", server.uri())).unwrap()
    }

    #[tokio::test]
    async fn lists_scenarios_with_team_and_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/scenarios"))
            .and(query_param("teamId", "17"))
            .and(query_param("pg[limit]", "1000"))
            .and(header("authorization", "Token test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "scenarios": [
                    {"id": 1, "name": "Manual", "scheduling": {"type": "on-demand"}},
                    {"id": 2, "name": "Timer", "description": "every hour", "scheduling": {"type": "indefinitely"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let scenarios = client_for(&server).await.list_scenarios(17).await.unwrap();
        assert_eq!(scenarios.len(), 2);
        assert!(scenarios[0].is_on_demand());
        assert_eq!(scenarios[1].description.as_deref(), Some("every hour"));
    }

    #[tokio::test]
    async fn fetches_scenario_interface() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/scenarios/42/interface"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "interface": {
                    "input": [{"name": "q", "type": "text", "required": true}],
                    "output": null
                }
            })))
            .mount(&server)
            .await;

        let interface = client_for(&server).await.scenario_interface(42).await.unwrap();
        assert_eq!(interface.input.len(), 1);
        assert_eq!(interface.input[0].name.as_deref(), Some("q"));
    }

    #[tokio::test]
    async fn runs_scenario_with_responsive_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/scenarios/42/run"))
            .and(body_json(json!({"data": {"q": "x"}, "responsive": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "executionId": "abc",
                "outputs": {"answer": 1}
            })))
            .mount(&server)
            .await;

        let run = client_for(&server)
            .await
            .run_scenario(42, json!({"q": "x"}))
            .await
            .unwrap();
        assert_eq!(run.execution_id.as_deref(), Some("abc"));
        assert_eq!(run.outputs, Some(json!({"answer": 1})));
    }

    #[tokio::test]
    async fn list_templates_forwards_category() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/templates"))
            .and(query_param("teamId", "17"))
            .and(query_param("category", "marketing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "templates": [{"id": 5, "name": "Lead capture", "usedApps": ["gmail"]}]
            })))
            .mount(&server)
            .await;

        let templates = client_for(&server)
            .await
            .list_templates(17, Some("marketing"))
            .await
            .unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].name, "Lead capture");
        assert_eq!(templates[0].details["usedApps"], json!(["gmail"]));
    }

    #[tokio::test]
    async fn create_scenario_derives_editor_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/scenarios"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "scenario": {"id": 925, "name": "New flow", "teamId": 17}
            })))
            .mount(&server)
            .await;

        let request = CreateScenarioRequest {
            name: "New flow".to_string(),
            description: None,
            team_id: 17,
            modules: json!([]),
            connections: None,
            template_id: None,
        };
        let created = client_for(&server)
            .await
            .create_scenario(&request)
            .await
            .unwrap();
        assert_eq!(created.id, 925);
        assert_eq!(created.url, "https://eu1.make.com/scenarios/925/edit");
    }

    #[tokio::test]
    async fn structured_error_body_is_normalized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/templates/999"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": "Template not found",
                "detail": "No template with id 999"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).await.get_template("999").await.unwrap_err();
        assert_eq!(err.message, "Template not found");
        assert_eq!(err.detail.as_deref(), Some("No template with id 999"));
        assert_eq!(err.status_code, Some(404));
    }

    #[tokio::test]
    async fn template_id_stays_one_path_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/templates/..%2Fusers%2Fme"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "template": {"id": "../users/me", "name": "Odd"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let template = client_for(&server)
            .await
            .get_template("../users/me")
            .await
            .unwrap();
        assert_eq!(template.name, "Odd");
    }

    #[tokio::test]
    async fn plain_text_error_body_is_normalized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2/scenarios/1/run"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .run_scenario(1, json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Service Unavailable");
        assert_eq!(err.detail.as_deref(), Some("maintenance"));
        assert_eq!(err.status_code, Some(503));
    }

    #[tokio::test]
    async fn undecodable_success_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/scenarios"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.list_scenarios(17).await.unwrap_err();
        assert!(err.message.starts_with("Failed to decode response"));
        assert_eq!(err.status_code, Some(200));
    }

    #[tokio::test]
    async fn connection_failure_is_normalized() {
        let config = MakeConfig::new("k", "eu1.make.com", "1").unwrap();
        // Port 9 (discard) on localhost is not expected to accept connections.
        let client = MakeClient::with_base_url(config, "http://127.0.0.1:9/api/v2").unwrap();
        let err = client.list_scenarios(1).await.unwrap_err();
        assert!(!err.message.is_empty());
        assert_eq!(err.status_code, None);
    }
}
