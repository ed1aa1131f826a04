//! Document resolution and create-request assembly.

use logicapp_types::{
    DocumentSource, ResourceReference, ServicePlanReference, Sku, SkuName, Workflow, WorkflowContent,
    WorkflowParameters, WorkflowProperties, WorkflowState,
};
use logicapp_util::{parse_document_text, read_document_file, to_workflow_parameters};
use serde_json::Value;
use tracing::debug;

use crate::{CreateWorkflowError, ValidatedInput};

/// Builds a [`Workflow`] create request from validated inputs.
///
/// Documents are resolved (files read, text parsed) when the builder is
/// created; the service plan is merged in by [`WorkflowRequestBuilder::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowRequestBuilder {
    location: Option<String>,
    state: WorkflowState,
    definition: Option<WorkflowContent<Value>>,
    parameters: Option<WorkflowContent<WorkflowParameters>>,
}

impl WorkflowRequestBuilder {
    pub fn resolve(input: &ValidatedInput) -> Result<Self, CreateWorkflowError> {
        Ok(Self {
            location: input.location.clone(),
            state: input.state,
            definition: resolve_definition(input.definition.as_ref())?,
            parameters: resolve_parameters(input.parameters.as_ref())?,
        })
    }

    /// Merge in the service plan: default the location to the plan's region
    /// and map its tier onto a workflow SKU.
    pub fn build(self, plan: &ServicePlanReference) -> Result<Workflow, CreateWorkflowError> {
        let sku_name = plan.tier.parse::<SkuName>()?;
        let location = self.location.unwrap_or_else(|| plan.region.clone());
        debug!(%location, sku = %sku_name, "assembled workflow request");

        let sku = Sku {
            name: sku_name,
            plan: ResourceReference { id: plan.id.clone() },
        };
        Ok(Workflow {
            location,
            properties: WorkflowProperties::new(self.state, sku)
                .with_definition(self.definition)
                .with_parameters(self.parameters),
        })
    }
}

/// Resolve a definition source. Inline text and files are parsed; links pass
/// through untouched.
pub fn resolve_definition(source: Option<&DocumentSource>) -> Result<Option<WorkflowContent<Value>>, CreateWorkflowError> {
    let Some(source) = source else {
        return Ok(None);
    };
    let content = match source {
        DocumentSource::Inline(text) => WorkflowContent::Inline(parse_document_text(text, "inline definition")?),
        DocumentSource::File(path) => WorkflowContent::Inline(read_document_file(path)?),
        DocumentSource::Link(link) => WorkflowContent::Link(link.clone()),
    };
    Ok(Some(content))
}

/// Resolve a parameters source into named parameters or a link.
pub fn resolve_parameters(
    source: Option<&DocumentSource>,
) -> Result<Option<WorkflowContent<WorkflowParameters>>, CreateWorkflowError> {
    let Some(source) = source else {
        return Ok(None);
    };
    let content = match source {
        DocumentSource::Inline(text) => {
            let origin = "inline parameters";
            WorkflowContent::Inline(to_workflow_parameters(parse_document_text(text, origin)?, origin)?)
        }
        DocumentSource::File(path) => {
            let origin = path.display().to_string();
            WorkflowContent::Inline(to_workflow_parameters(read_document_file(path)?, &origin)?)
        }
        DocumentSource::Link(link) => WorkflowContent::Link(link.clone()),
    };
    Ok(Some(content))
}
