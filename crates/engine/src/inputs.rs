//! Raw invocation inputs and their validation.
//!
//! Validation happens before any file is read or remote call is made. It
//! checks required fields, parses the requested state, and collapses each
//! document's alternate inputs into a single [`DocumentSource`].

use logicapp_types::{ContentLink, DocumentSource, WorkflowState};
use logicapp_util::resolve_input_path;
use tracing::warn;

use crate::CreateWorkflowError;

/// How to treat a document supplied through more than one input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourcePolicy {
    /// File beats inline, and either beats a link. Overridden inputs are
    /// dropped with a warning.
    #[default]
    LastWins,
    /// More than one input for the same document is a validation error.
    RejectConflicts,
}

/// The alternate inputs for one document (definition or parameters).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentInputs {
    pub inline: Option<String>,
    pub file_path: Option<String>,
    pub link_uri: Option<String>,
    pub link_content_version: Option<String>,
}

impl DocumentInputs {
    pub fn inline(text: impl Into<String>) -> Self {
        Self {
            inline: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self {
            file_path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn link(uri: impl Into<String>, content_version: Option<String>) -> Self {
        Self {
            link_uri: Some(uri.into()),
            link_content_version: content_version,
            ..Self::default()
        }
    }

    /// Pick the single source for this document, or `None` when nothing was
    /// supplied. `label` names the document in messages.
    pub fn select(&self, label: &str, policy: SourcePolicy) -> Result<Option<DocumentSource>, CreateWorkflowError> {
        require_non_blank(&self.inline, label, "value")?;
        require_non_blank(&self.file_path, label, "file path")?;
        require_non_blank(&self.link_uri, label, "link URI")?;
        require_non_blank(&self.link_content_version, label, "link content version")?;

        if self.link_uri.is_none() && self.link_content_version.is_some() {
            warn!(document = label, "ignoring link content version given without a link URI");
        }

        let supplied: Vec<&str> = [
            self.inline.as_ref().map(|_| "inline"),
            self.file_path.as_ref().map(|_| "file"),
            self.link_uri.as_ref().map(|_| "link"),
        ]
        .into_iter()
        .flatten()
        .collect();

        if policy == SourcePolicy::RejectConflicts && supplied.len() > 1 {
            return Err(CreateWorkflowError::validation(format!(
                "{label} was supplied more than once ({}); give exactly one source",
                supplied.join(", ")
            )));
        }

        if let Some(path) = &self.file_path {
            for overridden in supplied.iter().filter(|kind| **kind != "file") {
                warn!(document = label, overridden, "file source overrides another source");
            }
            return Ok(Some(DocumentSource::File(resolve_input_path(path))));
        }

        if let Some(text) = &self.inline {
            if self.link_uri.is_some() {
                warn!(document = label, overridden = "link", "inline source overrides another source");
            }
            return Ok(Some(DocumentSource::Inline(text.clone())));
        }

        Ok(self
            .link_uri
            .as_ref()
            .map(|uri| DocumentSource::Link(ContentLink::new(uri.clone(), self.link_content_version.clone()))))
    }
}

fn require_non_blank(value: &Option<String>, label: &str, field: &str) -> Result<(), CreateWorkflowError> {
    match value {
        Some(text) if text.trim().is_empty() => Err(CreateWorkflowError::validation(format!(
            "{label} {field} must not be empty"
        ))),
        _ => Ok(()),
    }
}

/// Everything a caller supplies to create a workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateWorkflowInput {
    pub resource_group: String,
    pub name: String,
    pub app_service_plan: String,
    pub location: Option<String>,
    pub state: Option<String>,
    pub definition: DocumentInputs,
    pub parameters: DocumentInputs,
    pub source_policy: SourcePolicy,
}

/// Inputs that passed validation, with each document reduced to one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    pub resource_group: String,
    pub name: String,
    pub app_service_plan: String,
    pub location: Option<String>,
    pub state: WorkflowState,
    pub definition: Option<DocumentSource>,
    pub parameters: Option<DocumentSource>,
}

impl CreateWorkflowInput {
    pub fn new(resource_group: impl Into<String>, name: impl Into<String>, app_service_plan: impl Into<String>) -> Self {
        Self {
            resource_group: resource_group.into(),
            name: name.into(),
            app_service_plan: app_service_plan.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<ValidatedInput, CreateWorkflowError> {
        require_field(&self.resource_group, "resource group name")?;
        require_field(&self.name, "workflow name")?;
        require_field(&self.app_service_plan, "app service plan")?;
        require_non_blank(&self.location, "workflow", "location")?;

        let state = match &self.state {
            Some(state) => state.parse::<WorkflowState>()?,
            None => WorkflowState::default(),
        };

        Ok(ValidatedInput {
            resource_group: self.resource_group.clone(),
            name: self.name.clone(),
            app_service_plan: self.app_service_plan.clone(),
            location: self.location.clone(),
            state,
            definition: self.definition.select("definition", self.source_policy)?,
            parameters: self.parameters.select("parameters", self.source_policy)?,
        })
    }
}

fn require_field(value: &str, field: &str) -> Result<(), CreateWorkflowError> {
    if value.trim().is_empty() {
        return Err(CreateWorkflowError::validation(format!("{field} is required")));
    }
    Ok(())
}
