// @zen-component: MCP-SchemaTranslator
//
//! Make parameter spec → JSON Schema translation.
//!
//! Make describes scenario inputs with its own recursive field format
//! ([`ParamSpec`]). MCP tools advertise their input as JSON Schema. The
//! translation is pure and total: unknown field kinds produce a schema without
//! a `type` instead of failing.

use indexmap::IndexMap;
use rmcp::model::JsonObject;
use serde::Serialize;
use serde_json::Value;

use make_core::models::{NestedSpec, ParamKind, ParamSpec};

/// Name given to the implicit collection wrapping a scenario's inputs.
const WRAPPER_NAME: &str = "wrapper";

/// JSON Schema `type` keyword values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Object,
    Array,
    String,
    Number,
    Boolean,
}

/// A JSON Schema fragment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaNode {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl SchemaNode {
    fn bare(schema_type: Option<SchemaType>, description: Option<String>) -> Self {
        Self {
            schema_type,
            description,
            properties: None,
            required: None,
            items: None,
            choices: None,
            default: None,
        }
    }

    pub fn object(
        description: Option<String>,
        properties: IndexMap<String, SchemaNode>,
        required: Vec<String>,
    ) -> Self {
        Self {
            properties: Some(properties),
            required: Some(required),
            ..Self::bare(Some(SchemaType::Object), description)
        }
    }

    pub fn array(description: Option<String>, items: Option<SchemaNode>) -> Self {
        Self {
            items: items.map(Box::new),
            ..Self::bare(Some(SchemaType::Array), description)
        }
    }

    pub fn string_enum(description: Option<String>, choices: Vec<Value>) -> Self {
        Self {
            choices: Some(choices),
            ..Self::bare(Some(SchemaType::String), description)
        }
    }

    pub fn primitive(
        schema_type: Option<SchemaType>,
        description: Option<String>,
        default: Option<Value>,
    ) -> Self {
        Self {
            default,
            ..Self::bare(schema_type, description)
        }
    }

    /// Serialize into the JSON object form used by MCP tool descriptors.
    pub fn into_json_object(self) -> JsonObject {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => JsonObject::new(),
        }
    }
}

/// Translate one parameter spec node into a JSON Schema node.
pub fn translate(spec: &ParamSpec) -> SchemaNode {
    let description = spec
        .help
        .as_deref()
        .filter(|help| !help.is_empty())
        .map(str::to_string);

    match spec.kind {
        ParamKind::Collection => {
            let fields: &[ParamSpec] = match &spec.spec {
                Some(NestedSpec::Fields(fields)) => fields.as_slice(),
                _ => &[],
            };
            object_schema(description, fields)
        }
        ParamKind::Array => {
            // A bare row of fields is an implicit collection.
            let items = match &spec.spec {
                Some(NestedSpec::Fields(fields)) => Some(object_schema(None, fields)),
                Some(NestedSpec::Single(element)) => Some(translate(element)),
                None => None,
            };
            SchemaNode::array(description, items)
        }
        ParamKind::Select => SchemaNode::string_enum(
            description,
            spec.options.iter().map(|option| option.value.clone()).collect(),
        ),
        kind => SchemaNode::primitive(schema_type_of(kind), description, default_of(spec)),
    }
}

/// Build the input schema of a scenario tool from its interface inputs.
pub fn input_schema(inputs: &[ParamSpec]) -> SchemaNode {
    translate(&ParamSpec::collection(WRAPPER_NAME, inputs.to_vec()))
}

fn object_schema(description: Option<String>, fields: &[ParamSpec]) -> SchemaNode {
    let mut properties = IndexMap::new();
    let mut required = Vec::new();

    for field in fields {
        let Some(name) = field.name.as_deref() else {
            continue;
        };
        if field.required {
            required.push(name.to_string());
        }
        properties.insert(name.to_string(), translate(field));
    }

    SchemaNode::object(description, properties, required)
}

fn schema_type_of(kind: ParamKind) -> Option<SchemaType> {
    match kind {
        ParamKind::Text | ParamKind::Date | ParamKind::Json | ParamKind::Select => {
            Some(SchemaType::String)
        }
        ParamKind::Number => Some(SchemaType::Number),
        ParamKind::Boolean => Some(SchemaType::Boolean),
        ParamKind::Array => Some(SchemaType::Array),
        ParamKind::Collection => Some(SchemaType::Object),
        ParamKind::Unknown => None,
    }
}

fn default_of(spec: &ParamSpec) -> Option<Value> {
    match &spec.default {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(value) => Some(value.clone()),
    }
}
