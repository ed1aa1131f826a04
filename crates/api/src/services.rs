//! Collaborator seams and their resource manager implementations.

use logicapp_types::{ServicePlan, ServicePlanReference, Workflow};
use logicapp_util::http::{build_path, parse_response_json_strict, status_error_message};
use reqwest::{Method, RequestBuilder};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{ApiError, ArmClient};

const SERVICE_PLAN_PATH: &str =
    "/subscriptions/{subscription}/resourceGroups/{group}/providers/Microsoft.Web/serverfarms/{plan}";
const SERVICE_PLAN_API_VERSION: &str = "2015-08-01";

const WORKFLOW_PATH: &str =
    "/subscriptions/{subscription}/resourceGroups/{group}/providers/Microsoft.Logic/workflows/{name}";
const WORKFLOW_API_VERSION: &str = "2015-02-01-preview";

/// Looks up an existing app service plan.
#[async_trait::async_trait]
pub trait ServicePlanLookup: Send + Sync {
    /// Fetch the plan's identifier, region and pricing tier.
    async fn get_service_plan(&self, resource_group: &str, plan_name: &str) -> Result<ServicePlanReference, ApiError>;
}

/// Creates workflows in the Logic Apps service.
#[async_trait::async_trait]
pub trait WorkflowService: Send + Sync {
    /// Submit a create request and return the service's representation of
    /// the new resource.
    async fn create_workflow(&self, resource_group: &str, name: &str, workflow: &Workflow) -> Result<Value, ApiError>;
}

impl ArmClient {
    /// Request that creates (or replaces) the named workflow. Exposed so
    /// callers can render it without sending it.
    pub fn create_workflow_request(&self, resource_group: &str, name: &str, workflow: &Workflow) -> RequestBuilder {
        let path = build_path(
            WORKFLOW_PATH,
            &[
                ("subscription", self.subscription_id.as_str()),
                ("group", resource_group),
                ("name", name),
            ],
        );
        self.request(Method::PUT, &path, WORKFLOW_API_VERSION).json(workflow)
    }

    pub fn service_plan_request(&self, resource_group: &str, plan_name: &str) -> RequestBuilder {
        let path = build_path(
            SERVICE_PLAN_PATH,
            &[
                ("subscription", self.subscription_id.as_str()),
                ("group", resource_group),
                ("plan", plan_name),
            ],
        );
        self.request(Method::GET, &path, SERVICE_PLAN_API_VERSION)
    }
}

#[async_trait::async_trait]
impl ServicePlanLookup for ArmClient {
    async fn get_service_plan(&self, resource_group: &str, plan_name: &str) -> Result<ServicePlanReference, ApiError> {
        let (url, body) = send_for_json(self.service_plan_request(resource_group, plan_name)).await?;

        let plan: ServicePlan = serde_json::from_value(body)
            .map_err(|error| ApiError::decode(&url, format!("not a service plan: {error}")))?;
        let reference = plan
            .to_reference()
            .ok_or_else(|| ApiError::decode(&url, "service plan reports no region"))?;

        debug!(plan = plan_name, region = %reference.region, tier = %reference.tier, "resolved service plan");
        Ok(reference)
    }
}

#[async_trait::async_trait]
impl WorkflowService for ArmClient {
    async fn create_workflow(&self, resource_group: &str, name: &str, workflow: &Workflow) -> Result<Value, ApiError> {
        info!(resource_group, workflow = name, location = %workflow.location, "creating workflow");
        let (_, body) = send_for_json(self.create_workflow_request(resource_group, name, workflow)).await?;
        Ok(body)
    }
}

/// Send a request and return its URL and JSON body. Non-2xx statuses and
/// malformed bodies become [`ApiError`]s carrying the response text as-is.
async fn send_for_json(builder: RequestBuilder) -> Result<(String, Value), ApiError> {
    let (client, request) = builder.build_split();
    let request = request.map_err(|source| ApiError::Transport {
        url: source.url().map(|url| url.to_string()).unwrap_or_default(),
        source,
    })?;
    let method = request.method().to_string();
    let url = request.url().to_string();

    let response = client
        .execute(request)
        .await
        .map_err(|source| ApiError::Transport { url: url.clone(), source })?;

    let status = response.status();
    let text = response.text().await.unwrap_or_else(|error| {
        warn!(%url, %error, "failed to read response body");
        "<no body>".into()
    });
    debug!(%method, %url, status = status.as_u16(), "received response");

    if !status.is_success() {
        return Err(ApiError::Status {
            method,
            url,
            status: status.as_u16(),
            body: text,
            hint: status_error_message(status.as_u16()),
        });
    }

    let body = parse_response_json_strict(&text, Some(status)).map_err(|error| ApiError::decode(&url, error.to_string()))?;
    Ok((url, body))
}
