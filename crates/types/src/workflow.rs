//! Create-request payload for `Microsoft.Logic/workflows`.
//!
//! The definition and parameters documents are opaque JSON trees; they are
//! transported as-is and never interpreted here. Parameters preserve authoring
//! order via `IndexMap` so the request body mirrors the input.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::{SkuName, WorkflowContent, WorkflowState};

/// Parameter values keyed by parameter name, in authoring order.
pub type WorkflowParameters = IndexMap<String, WorkflowParameter>;

/// Reference to an externally hosted document.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentLink {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_version: Option<String>,
}

impl ContentLink {
    pub fn new(uri: impl Into<String>, content_version: Option<String>) -> Self {
        Self {
            uri: uri.into(),
            content_version,
        }
    }
}

/// A single workflow parameter value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WorkflowParameter {
    /// Declared parameter type (for example `String` or `SecureString`).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub parameter_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl WorkflowParameter {
    /// Wrap a bare value with no type or metadata.
    pub fn from_value(value: JsonValue) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }
}

/// Reference to another ARM resource by identifier.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct ResourceReference {
    pub id: String,
}

/// Pricing tier plus the hosting plan the workflow is billed against.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Sku {
    pub name: SkuName,
    pub plan: ResourceReference,
}

/// Resource properties of a workflow create request.
///
/// `definition` and `definition_link` are never both populated; neither are
/// `parameters` and `parameters_link`. Use [`WorkflowProperties::with_definition`]
/// and [`WorkflowProperties::with_parameters`] to keep that true.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowProperties {
    pub state: WorkflowState,
    pub sku: Sku,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_link: Option<ContentLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<WorkflowParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters_link: Option<ContentLink>,
}

impl WorkflowProperties {
    pub fn new(state: WorkflowState, sku: Sku) -> Self {
        Self {
            state,
            sku,
            definition: None,
            definition_link: None,
            parameters: None,
            parameters_link: None,
        }
    }

    /// Set the definition, clearing whichever of inline/link is not used.
    pub fn with_definition(mut self, content: Option<WorkflowContent<JsonValue>>) -> Self {
        (self.definition, self.definition_link) = split_content(content);
        self
    }

    /// Set the parameters, clearing whichever of inline/link is not used.
    pub fn with_parameters(mut self, content: Option<WorkflowContent<WorkflowParameters>>) -> Self {
        (self.parameters, self.parameters_link) = split_content(content);
        self
    }
}

fn split_content<T>(content: Option<WorkflowContent<T>>) -> (Option<T>, Option<ContentLink>) {
    match content {
        Some(WorkflowContent::Inline(value)) => (Some(value), None),
        Some(WorkflowContent::Link(link)) => (None, Some(link)),
        None => (None, None),
    }
}

/// The assembled workflow create request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workflow {
    pub location: String,
    pub properties: WorkflowProperties,
}
