//! Make API domain models.
//!
//! Shapes follow the Make REST API v2 payloads. Only the fields this crate
//! reads are typed; everything else is either ignored or carried through
//! opaquely.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Scenarios
// =============================================================================

/// Summary of a scenario as returned by `GET /scenarios`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub scheduling: Scheduling,
}

impl Scenario {
    /// Whether the scenario can be started on demand.
    pub fn is_on_demand(&self) -> bool {
        self.scheduling.kind == Scheduling::ON_DEMAND
    }
}

/// Scenario scheduling settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Scheduling {
    #[serde(rename = "type")]
    pub kind: String,
}

impl Scheduling {
    pub const ON_DEMAND: &'static str = "on-demand";
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScenariosResponse {
    pub scenarios: Vec<Scenario>,
}

/// Input/output interface of a scenario.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScenarioInterface {
    #[serde(default)]
    pub input: Vec<ParamSpec>,
    #[serde(default)]
    pub output: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScenarioInterfaceResponse {
    pub interface: ScenarioInterface,
}

/// Result of `POST /scenarios/{id}/run`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRun {
    #[serde(default)]
    pub execution_id: Option<String>,
    #[serde(default)]
    pub outputs: Option<Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RunScenarioBody<'a> {
    pub data: &'a Value,
    pub responsive: bool,
}

// =============================================================================
// Parameter specs
// =============================================================================

/// Kind of a parameter spec node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Text,
    Number,
    Boolean,
    Date,
    Json,
    Select,
    Array,
    Collection,
    /// Anything Make sends that is not listed above.
    #[default]
    #[serde(other)]
    Unknown,
}

/// Self-describing description of one scenario input field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ParamSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: ParamKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub required: bool,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub help: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub spec: Option<NestedSpec>,
}

/// Treat an explicit `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ParamSpec {
    /// Build a collection node around a list of fields.
    pub fn collection(name: impl Into<String>, fields: Vec<ParamSpec>) -> Self {
        Self {
            name: Some(name.into()),
            kind: ParamKind::Collection,
            spec: Some(NestedSpec::Fields(fields)),
            ..Self::default()
        }
    }
}

/// Nested spec: a row of sub-fields, or a single element spec.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NestedSpec {
    Fields(Vec<ParamSpec>),
    Single(Box<ParamSpec>),
}

/// One choice of a `select` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectOption {
    pub value: Value,
    #[serde(default)]
    pub label: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Scenario template (blueprint starting point).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: Value,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TemplatesResponse {
    pub templates: Vec<Template>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TemplateResponse {
    pub template: Template,
}

// =============================================================================
// Scenario creation
// =============================================================================

/// Position of a module in the visual editor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModulePosition {
    pub x: f64,
    pub y: f64,
}

/// One configured module of a scenario under construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleConfiguration {
    pub name: String,
    #[serde(rename = "type")]
    pub module_type: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<ModulePosition>,
}

/// Body of `POST /scenarios`.
///
/// `modules` and `connections` are forwarded exactly as the caller supplied
/// them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScenarioRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub team_id: u64,
    pub modules: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connections: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

/// A scenario that has just been created.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedScenario {
    pub id: u64,
    pub name: String,
    /// Editor URL; derived from the zone when Make does not return one.
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateScenarioResponse {
    pub scenario: CreatedScenario,
}
