//! Shared type definitions for the Logicapp CLI.
//!
//! The wire shapes here follow the Azure Resource Manager payloads for
//! `Microsoft.Logic/workflows` and `Microsoft.Web/serverfarms`. Closed
//! enumerations ([`WorkflowState`], [`SkuName`]) parse case-sensitively and
//! report a typed error on no-match.

use std::{error::Error, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub mod plan;
pub mod source;
pub mod workflow;

pub use plan::{ServicePlan, ServicePlanProperties, ServicePlanReference, ServicePlanSku};
pub use source::{DocumentSource, WorkflowContent};
pub use workflow::{
    ContentLink, ResourceReference, Sku, Workflow, WorkflowParameter, WorkflowParameters, WorkflowProperties,
};

/// Lifecycle state requested for a newly created workflow.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Default, Serialize, Deserialize)]
pub enum WorkflowState {
    #[default]
    Enabled,
    Disabled,
}

impl WorkflowState {
    /// Every accepted spelling, in display order.
    pub const VARIANTS: &'static [&'static str] = &["Enabled", "Disabled"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enabled => "Enabled",
            Self::Disabled => "Disabled",
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkflowState {
    type Err = ParseWorkflowStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Enabled" => Ok(Self::Enabled),
            "Disabled" => Ok(Self::Disabled),
            other => Err(ParseWorkflowStateError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWorkflowStateError(pub String);

impl fmt::Display for ParseWorkflowStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid workflow state '{}'; expected one of {}",
            self.0,
            WorkflowState::VARIANTS.join(", ")
        )
    }
}

impl Error for ParseWorkflowStateError {}

/// Pricing tier assigned to a workflow.
///
/// The name is taken verbatim from the hosting plan's reported tier, so the
/// parse is case-sensitive and anything outside this list is rejected.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum SkuName {
    NotSpecified,
    Free,
    Shared,
    Basic,
    Standard,
    Premium,
}

impl SkuName {
    pub const VARIANTS: &'static [&'static str] = &["NotSpecified", "Free", "Shared", "Basic", "Standard", "Premium"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotSpecified => "NotSpecified",
            Self::Free => "Free",
            Self::Shared => "Shared",
            Self::Basic => "Basic",
            Self::Standard => "Standard",
            Self::Premium => "Premium",
        }
    }
}

impl fmt::Display for SkuName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkuName {
    type Err = ParseSkuNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NotSpecified" => Ok(Self::NotSpecified),
            "Free" => Ok(Self::Free),
            "Shared" => Ok(Self::Shared),
            "Basic" => Ok(Self::Basic),
            "Standard" => Ok(Self::Standard),
            "Premium" => Ok(Self::Premium),
            other => Err(ParseSkuNameError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSkuNameError(pub String);

impl fmt::Display for ParseSkuNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "service plan tier '{}' does not map to a workflow SKU; expected one of {}",
            self.0,
            SkuName::VARIANTS.join(", ")
        )
    }
}

impl Error for ParseSkuNameError {}
