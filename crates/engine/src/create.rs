//! The create operation: validate, resolve, look up the plan, assemble,
//! submit.

use logicapp_api::{ServicePlanLookup, WorkflowService};
use logicapp_types::Workflow;
use serde_json::Value;
use tracing::{debug, info};

use crate::{CreateWorkflowError, CreateWorkflowInput, WorkflowRequestBuilder};

/// A fully assembled request and where it is going.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedWorkflow {
    pub resource_group: String,
    pub name: String,
    pub request: Workflow,
}

/// Run every step short of the create call.
///
/// Validation and document resolution happen before the plan lookup, so bad
/// input never reaches the network.
pub async fn prepare_workflow(
    input: &CreateWorkflowInput,
    plans: &dyn ServicePlanLookup,
) -> Result<PreparedWorkflow, CreateWorkflowError> {
    let validated = input.validate()?;
    debug!(
        definition = validated.definition.as_ref().map(|source| source.kind()),
        parameters = validated.parameters.as_ref().map(|source| source.kind()),
        "validated create inputs"
    );
    let builder = WorkflowRequestBuilder::resolve(&validated)?;

    let plan = plans
        .get_service_plan(&validated.resource_group, &validated.app_service_plan)
        .await?;
    let request = builder.build(&plan)?;

    Ok(PreparedWorkflow {
        resource_group: validated.resource_group,
        name: validated.name,
        request,
    })
}

/// Create a workflow and return the service's representation of it.
pub async fn create_workflow(
    input: &CreateWorkflowInput,
    plans: &dyn ServicePlanLookup,
    workflows: &dyn WorkflowService,
) -> Result<Value, CreateWorkflowError> {
    let prepared = prepare_workflow(input, plans).await?;
    let created = workflows
        .create_workflow(&prepared.resource_group, &prepared.name, &prepared.request)
        .await?;
    info!(resource_group = %prepared.resource_group, workflow = %prepared.name, "workflow created");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DocumentInputs, SourcePolicy};
    use logicapp_api::ApiError;
    use logicapp_types::{ServicePlanReference, SkuName, WorkflowState};
    use serde_json::json;
    use std::fs;
    use std::sync::Mutex;

    const PLAN_ID: &str = "/subscriptions/s/resourceGroups/rg1/providers/Microsoft.Web/serverfarms/plan1";

    struct FakePlans {
        plan: Result<ServicePlanReference, u16>,
        lookups: Mutex<Vec<(String, String)>>,
    }

    impl FakePlans {
        fn with_tier(tier: &str) -> Self {
            Self {
                plan: Ok(ServicePlanReference {
                    id: PLAN_ID.to_string(),
                    region: "westus".to_string(),
                    tier: tier.to_string(),
                }),
                lookups: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                plan: Err(status),
                lookups: Mutex::new(Vec::new()),
            }
        }

        fn lookup_count(&self) -> usize {
            self.lookups.lock().unwrap().len()
        }
    }

    #[async_trait::async_trait]
    impl ServicePlanLookup for FakePlans {
        async fn get_service_plan(&self, resource_group: &str, plan_name: &str) -> Result<ServicePlanReference, ApiError> {
            self.lookups
                .lock()
                .unwrap()
                .push((resource_group.to_string(), plan_name.to_string()));
            self.plan.clone().map_err(|status| ApiError::Status {
                method: "GET".to_string(),
                url: "http://127.0.0.1/plan".to_string(),
                status,
                body: "lookup failed".to_string(),
                hint: None,
            })
        }
    }

    #[derive(Default)]
    struct FakeWorkflows {
        created: Mutex<Vec<(String, String, Workflow)>>,
    }

    impl FakeWorkflows {
        fn created(&self) -> Vec<(String, String, Workflow)> {
            self.created.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl WorkflowService for FakeWorkflows {
        async fn create_workflow(&self, resource_group: &str, name: &str, workflow: &Workflow) -> Result<Value, ApiError> {
            self.created
                .lock()
                .unwrap()
                .push((resource_group.to_string(), name.to_string(), workflow.clone()));
            Ok(json!({ "name": name, "location": workflow.location }))
        }
    }

    fn input() -> CreateWorkflowInput {
        CreateWorkflowInput::new("rg1", "wf1", "plan1")
    }

    #[tokio::test]
    async fn bare_create_uses_plan_region_and_sku() {
        let plans = FakePlans::with_tier("Standard");
        let workflows = FakeWorkflows::default();

        let created = create_workflow(&input(), &plans, &workflows).await.expect("create succeeds");

        assert_eq!(created, json!({ "name": "wf1", "location": "westus" }));
        assert_eq!(*plans.lookups.lock().unwrap(), vec![("rg1".to_string(), "plan1".to_string())]);

        let calls = workflows.created();
        assert_eq!(calls.len(), 1);
        let (group, name, request) = &calls[0];
        assert_eq!((group.as_str(), name.as_str()), ("rg1", "wf1"));
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({
                "location": "westus",
                "properties": {
                    "state": "Enabled",
                    "sku": { "name": "Standard", "plan": { "id": PLAN_ID } }
                }
            })
        );
    }

    #[tokio::test]
    async fn disabled_state_is_forwarded() {
        let plans = FakePlans::with_tier("Basic");
        let mut input = input();
        input.state = Some("Disabled".to_string());

        let prepared = prepare_workflow(&input, &plans).await.expect("prepares");
        assert_eq!(prepared.request.properties.state, WorkflowState::Disabled);
        assert_eq!(prepared.request.properties.sku.name, SkuName::Basic);
    }

    #[tokio::test]
    async fn invalid_state_makes_no_remote_calls() {
        let plans = FakePlans::with_tier("Standard");
        let workflows = FakeWorkflows::default();
        let mut input = input();
        input.state = Some("enabled".to_string());

        let error = create_workflow(&input, &plans, &workflows).await.unwrap_err();

        assert!(matches!(error, CreateWorkflowError::Validation { .. }));
        assert_eq!(plans.lookup_count(), 0);
        assert!(workflows.created().is_empty());
    }

    #[tokio::test]
    async fn missing_name_makes_no_remote_calls() {
        let plans = FakePlans::with_tier("Standard");
        let workflows = FakeWorkflows::default();
        let mut input = input();
        input.name = String::new();

        let error = create_workflow(&input, &plans, &workflows).await.unwrap_err();

        assert!(matches!(error, CreateWorkflowError::Validation { .. }));
        assert_eq!(plans.lookup_count(), 0);
        assert!(workflows.created().is_empty());
    }

    #[tokio::test]
    async fn unreadable_file_makes_no_remote_calls() {
        let dir = tempfile::tempdir().expect("temp dir");
        let plans = FakePlans::with_tier("Standard");
        let workflows = FakeWorkflows::default();
        let mut input = input();
        input.definition = DocumentInputs::file(dir.path().join("missing.json").display().to_string());

        let error = create_workflow(&input, &plans, &workflows).await.unwrap_err();

        assert!(matches!(error, CreateWorkflowError::Io { .. }));
        assert_eq!(plans.lookup_count(), 0);
        assert!(workflows.created().is_empty());
    }

    #[tokio::test]
    async fn unknown_tier_fails_after_lookup_and_before_create() {
        let plans = FakePlans::with_tier("ElasticPremium");
        let workflows = FakeWorkflows::default();

        let error = create_workflow(&input(), &plans, &workflows).await.unwrap_err();

        assert!(matches!(error, CreateWorkflowError::Mapping(_)));
        assert!(error.to_string().contains("ElasticPremium"));
        assert_eq!(plans.lookup_count(), 1);
        assert!(workflows.created().is_empty());
    }

    #[tokio::test]
    async fn lookup_failure_is_propagated_unchanged() {
        let plans = FakePlans::failing(404);
        let workflows = FakeWorkflows::default();

        let error = create_workflow(&input(), &plans, &workflows).await.unwrap_err();

        match error {
            CreateWorkflowError::Remote(api) => assert_eq!(api.status(), Some(404)),
            other => panic!("expected remote error, got {other:?}"),
        }
        assert!(workflows.created().is_empty());
    }

    #[tokio::test]
    async fn definition_file_overrides_inline_definition() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("workflow.json");
        fs::write(&path, r#"{ "source": "file" }"#).expect("write definition");

        let plans = FakePlans::with_tier("Standard");
        let mut input = input();
        input.definition = DocumentInputs {
            inline: Some(r#"{ "source": "inline" }"#.to_string()),
            file_path: Some(path.display().to_string()),
            ..DocumentInputs::default()
        };

        let prepared = prepare_workflow(&input, &plans).await.expect("prepares");
        assert_eq!(prepared.request.properties.definition, Some(json!({ "source": "file" })));
    }

    #[tokio::test]
    async fn parameters_file_overrides_inline_parameters() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("parameters.json");
        fs::write(&path, r#"{ "region": { "value": "from-file" } }"#).expect("write parameters");

        let plans = FakePlans::with_tier("Standard");
        let mut input = input();
        input.parameters = DocumentInputs {
            inline: Some(r#"{ "region": "inline" }"#.to_string()),
            file_path: Some(path.display().to_string()),
            ..DocumentInputs::default()
        };

        let prepared = prepare_workflow(&input, &plans).await.expect("prepares");
        let parameters = prepared.request.properties.parameters.expect("inline parameters");
        assert_eq!(parameters["region"].value, Some(json!("from-file")));
    }

    #[tokio::test]
    async fn each_document_has_exactly_one_form() {
        let plans = FakePlans::with_tier("Premium");
        let mut input = input();
        input.definition = DocumentInputs {
            inline: Some(r#"{ "actions": {} }"#.to_string()),
            link_uri: Some("https://example.com/d.json".to_string()),
            ..DocumentInputs::default()
        };
        input.parameters = DocumentInputs::link("https://example.com/p.json", None);

        let properties = prepare_workflow(&input, &plans).await.expect("prepares").request.properties;

        assert!(properties.definition.is_some());
        assert!(properties.definition_link.is_none());
        assert!(properties.parameters.is_none());
        assert!(properties.parameters_link.is_some());
    }

    #[tokio::test]
    async fn rejecting_conflicts_stops_before_lookup() {
        let plans = FakePlans::with_tier("Standard");
        let mut input = input();
        input.source_policy = SourcePolicy::RejectConflicts;
        input.parameters = DocumentInputs {
            inline: Some("{}".to_string()),
            link_uri: Some("https://example.com/p.json".to_string()),
            ..DocumentInputs::default()
        };

        let error = prepare_workflow(&input, &plans).await.unwrap_err();
        assert!(matches!(error, CreateWorkflowError::Validation { .. }));
        assert_eq!(plans.lookup_count(), 0);
    }
}
