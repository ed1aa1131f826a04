//! # Logicapp Engine
//!
//! Turns the inputs of a `create` invocation into a workflow create request
//! and submits it.
//!
//! The flow is linear:
//!
//! 1. [`CreateWorkflowInput::validate`] checks required fields, parses the
//!    state, and reduces each document's inputs to one [`DocumentSource`]
//!    following the [`SourcePolicy`].
//! 2. [`WorkflowRequestBuilder::resolve`] reads and parses local documents.
//! 3. The service plan is looked up through [`ServicePlanLookup`].
//! 4. [`WorkflowRequestBuilder::build`] defaults the location and maps the
//!    plan tier onto a SKU.
//! 5. [`WorkflowService::create_workflow`] submits the request.
//!
//! Any failure stops the flow; see [`CreateWorkflowError`].
//!
//! [`DocumentSource`]: logicapp_types::DocumentSource
//! [`ServicePlanLookup`]: logicapp_api::ServicePlanLookup
//! [`WorkflowService::create_workflow`]: logicapp_api::WorkflowService::create_workflow

pub mod create;
pub mod error;
pub mod inputs;
pub mod request;

pub use create::{PreparedWorkflow, create_workflow, prepare_workflow};
pub use error::CreateWorkflowError;
pub use inputs::{CreateWorkflowInput, DocumentInputs, SourcePolicy, ValidatedInput};
pub use request::{WorkflowRequestBuilder, resolve_definition, resolve_parameters};
