//! Azure Resource Manager client utilities.
//!
//! This crate provides a lightweight client for the two resource manager
//! operations the CLI needs. It focuses on:
//!
//! - Constructing an HTTP client with sensible defaults
//! - Reading the endpoint, subscription and token from the environment
//! - Validating `AZURE_RESOURCE_MANAGER_URL` for safety
//! - Building requests with a consistent User-Agent, Accept header and
//!   `api-version` query parameter
//!
//! The primary entry point is [`ArmClient`]. Build an [`ArmConfig`] with
//! [`ArmConfig::from_env`], then create the client with [`ArmClient::new`].
//! The client implements the [`ServicePlanLookup`] and [`WorkflowService`]
//! seams consumed by the engine.
//!
//! # Example
//!
//! ```ignore
//! use logicapp_api::{ArmClient, ArmConfig, ServicePlanLookup};
//!
//! async fn region_of(plan: &str) -> Result<String, logicapp_api::ApiError> {
//!     let client = ArmClient::new(ArmConfig::from_env())?;
//!     let plan = client.get_service_plan("my-group", plan).await?;
//!     Ok(plan.region)
//! }
//! ```

use std::env;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url, header};
use thiserror::Error;
use tracing::debug;

mod services;

pub use services::{ServicePlanLookup, WorkflowService};

/// Environment variable overriding the resource manager endpoint.
pub const BASE_URL_ENV: &str = "AZURE_RESOURCE_MANAGER_URL";
/// Environment variable holding the subscription identifier.
pub const SUBSCRIPTION_ENV: &str = "AZURE_SUBSCRIPTION_ID";
/// Environment variable holding the bearer token.
pub const ACCESS_TOKEN_ENV: &str = "AZURE_ACCESS_TOKEN";
/// Public cloud endpoint.
pub const DEFAULT_BASE_URL: &str = "https://management.azure.com";

/// Allowed base domains for non-local endpoints. Subdomains are also allowed.
const ALLOWED_ARM_DOMAINS: &[&str] = &["azure.com", "usgovcloudapi.net", "chinacloudapi.cn", "microsoftazure.de"];
/// Hostnames allowed for local development regardless of scheme.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised by the resource manager client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned HTTP {status}: {body}{}", hint_suffix(.hint))]
    Status {
        method: String,
        url: String,
        status: u16,
        body: String,
        hint: Option<String>,
    },

    #[error("unexpected response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl ApiError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn decode(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            url: url.into(),
            message: message.into(),
        }
    }

    /// HTTP status of a rejected request, if that is what this error is.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn hint_suffix(hint: &Option<String>) -> String {
    hint.as_deref().map(|hint| format!(" ({hint})")).unwrap_or_default()
}

/// Connection settings for the resource manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmConfig {
    pub base_url: String,
    pub subscription_id: Option<String>,
    pub access_token: Option<String>,
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            subscription_id: None,
            access_token: None,
        }
    }
}

impl ArmConfig {
    /// Read settings from `AZURE_RESOURCE_MANAGER_URL`,
    /// `AZURE_SUBSCRIPTION_ID` and `AZURE_ACCESS_TOKEN`. Blank values count as
    /// unset.
    pub fn from_env() -> Self {
        let base_url = non_blank_env(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            base_url,
            subscription_id: non_blank_env(SUBSCRIPTION_ENV),
            access_token: non_blank_env(ACCESS_TOKEN_ENV),
        }
    }

    /// Replace the subscription when `subscription_id` is given.
    pub fn with_subscription_id(mut self, subscription_id: Option<String>) -> Self {
        if let Some(subscription_id) = subscription_id.filter(|value| !value.trim().is_empty()) {
            self.subscription_id = Some(subscription_id);
        }
        self
    }

    /// Replace the endpoint when `base_url` is given.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url.filter(|value| !value.trim().is_empty()) {
            self.base_url = base_url;
        }
        self
    }
}

fn non_blank_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Thin wrapper around a configured `reqwest::Client` for resource manager
/// access.
///
/// Every request built by the client carries the bearer token, `Accept` and
/// `User-Agent` itself, so a built request shows exactly what goes out.
#[derive(Debug, Clone)]
pub struct ArmClient {
    pub base_url: String,
    pub subscription_id: String,
    pub http: Client,
    pub user_agent: String,
    authorization: Option<header::HeaderValue>,
}

impl ArmClient {
    /// Construct an [`ArmClient`] from resolved settings.
    ///
    /// Fails when the subscription is missing, the base URL is not allowed,
    /// or the token cannot be used as a header value.
    pub fn new(config: ArmConfig) -> Result<Self, ApiError> {
        let subscription_id = config.subscription_id.ok_or_else(|| {
            ApiError::config(format!(
                "no subscription configured; set {} or pass --subscription-id",
                SUBSCRIPTION_ENV
            ))
        })?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        validate_base_url(&base_url)?;

        let authorization = config
            .access_token
            .map(|access_token| {
                let mut value = header::HeaderValue::from_str(&format!("Bearer {}", access_token))
                    .map_err(|_| ApiError::config(format!("{} contains characters not allowed in a header", ACCESS_TOKEN_ENV)))?;
                value.set_sensitive(true);
                Ok::<_, ApiError>(value)
            })
            .transpose()?;

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|error| ApiError::config(format!("build http client: {error}")))?;

        Ok(Self {
            base_url,
            subscription_id,
            http,
            user_agent: format!("logicapp/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS),
            authorization,
        })
    }

    /// Build a `reqwest::RequestBuilder` for a method, subscription-relative
    /// path and API version.
    pub fn request(&self, method: Method, path: &str, api_version: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, api_version, "building request");

        let builder = self
            .http
            .request(method, url)
            .query(&[("api-version", api_version)])
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, &self.user_agent);
        match &self.authorization {
            Some(authorization) => builder.header(header::AUTHORIZATION, authorization.clone()),
            None => builder,
        }
    }
}

/// Validate that a base URL is acceptable for use by the client.
///
/// Rules:
/// - `localhost` or `127.0.0.1`: any scheme is allowed
/// - otherwise: scheme must be HTTPS, and host must be one of the allowed
///   cloud domains or a subdomain thereof
fn validate_base_url(base: &str) -> Result<(), ApiError> {
    let parsed_base_url =
        Url::parse(base).map_err(|e| ApiError::config(format!("invalid {} '{}': {}", BASE_URL_ENV, base, e)))?;

    let host_name = parsed_base_url
        .host_str()
        .ok_or_else(|| ApiError::config(format!("{} must include a host", BASE_URL_ENV)))?;

    if LOCALHOST_DOMAINS
        .iter()
        .any(|&allowed| host_name.eq_ignore_ascii_case(allowed))
    {
        return Ok(());
    }

    if parsed_base_url.scheme() != "https" {
        return Err(ApiError::config(format!(
            "{} must use https for non-localhost hosts; got '{}://'",
            BASE_URL_ENV,
            parsed_base_url.scheme()
        )));
    }

    let is_allowed_domain = ALLOWED_ARM_DOMAINS.iter().any(|&allowed_domain| {
        host_name.eq_ignore_ascii_case(allowed_domain) || host_name.ends_with(&format!(".{}", allowed_domain))
    });
    if !is_allowed_domain {
        return Err(ApiError::config(format!(
            "{} host '{}' is not allowed; must be one of {:?} or a subdomain, or localhost",
            BASE_URL_ENV, host_name, ALLOWED_ARM_DOMAINS
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(base_url: &str) -> ArmConfig {
        ArmConfig {
            base_url: base_url.to_string(),
            subscription_id: Some("sub".to_string()),
            access_token: None,
        }
    }

    #[test]
    fn accepts_public_and_sovereign_clouds() {
        assert!(validate_base_url("https://management.azure.com").is_ok());
        assert!(validate_base_url("https://management.usgovcloudapi.net").is_ok());
        assert!(validate_base_url("https://management.chinacloudapi.cn").is_ok());
    }

    #[test]
    fn accepts_localhost_over_http() {
        assert!(validate_base_url("http://127.0.0.1:8080").is_ok());
        assert!(validate_base_url("http://localhost:3000").is_ok());
    }

    #[test]
    fn rejects_plain_http_for_remote_hosts() {
        let error = validate_base_url("http://management.azure.com").unwrap_err();
        assert!(error.to_string().contains("https"));
    }

    #[test]
    fn rejects_unknown_domains() {
        assert!(validate_base_url("https://management.azure.com.evil.example").is_err());
        assert!(validate_base_url("https://notazure.com").is_err());
    }

    #[test]
    fn new_requires_a_subscription() {
        let mut config = config_for(DEFAULT_BASE_URL);
        config.subscription_id = None;

        let error = ArmClient::new(config).unwrap_err();
        assert!(matches!(error, ApiError::Config(_)));
        assert!(error.to_string().contains(SUBSCRIPTION_ENV));
    }

    #[test]
    fn new_trims_trailing_slash() {
        let client = ArmClient::new(config_for("https://management.azure.com/")).expect("client builds");
        assert_eq!(client.base_url, "https://management.azure.com");
    }

    #[test]
    fn request_adds_api_version_and_user_agent() {
        let client = ArmClient::new(config_for(DEFAULT_BASE_URL)).expect("client builds");
        let request = client
            .request(Method::GET, "/subscriptions/sub/resourceGroups", "2020-01-01")
            .build()
            .expect("request builds");

        assert_eq!(
            request.url().as_str(),
            "https://management.azure.com/subscriptions/sub/resourceGroups?api-version=2020-01-01"
        );
        let agent = request.headers()[header::USER_AGENT].to_str().expect("ascii user agent");
        assert!(agent.starts_with("logicapp/"));
        assert_eq!(request.headers()[header::ACCEPT], "application/json");
        assert!(request.headers().get(header::AUTHORIZATION).is_none());
    }

    #[test]
    fn built_requests_carry_the_bearer_token() {
        let mut config = config_for(DEFAULT_BASE_URL);
        config.access_token = Some("token-1".to_string());
        let client = ArmClient::new(config).expect("client builds");

        let request = client
            .request(Method::GET, "/subscriptions/sub/resourceGroups", "2020-01-01")
            .build()
            .expect("request builds");

        let authorization = &request.headers()[header::AUTHORIZATION];
        assert_eq!(authorization, "Bearer token-1");
        assert!(authorization.is_sensitive());
    }

    #[test]
    fn tokens_with_control_characters_are_rejected() {
        let mut config = config_for(DEFAULT_BASE_URL);
        config.access_token = Some("bad\ntoken".to_string());

        let error = ArmClient::new(config).unwrap_err();
        assert!(error.to_string().contains(ACCESS_TOKEN_ENV));
    }

    #[test]
    fn from_env_reads_and_ignores_blank_values() {
        temp_env::with_vars(
            [
                (BASE_URL_ENV, Some("https://management.usgovcloudapi.net")),
                (SUBSCRIPTION_ENV, Some("1234")),
                (ACCESS_TOKEN_ENV, Some("  ")),
            ],
            || {
                let config = ArmConfig::from_env();
                assert_eq!(config.base_url, "https://management.usgovcloudapi.net");
                assert_eq!(config.subscription_id.as_deref(), Some("1234"));
                assert!(config.access_token.is_none());
            },
        );
    }

    #[test]
    fn from_env_defaults_to_public_cloud() {
        temp_env::with_vars_unset([BASE_URL_ENV, SUBSCRIPTION_ENV, ACCESS_TOKEN_ENV], || {
            assert_eq!(ArmConfig::from_env(), ArmConfig::default());
        });
    }

    #[test]
    fn overrides_replace_only_when_present() {
        let config = config_for(DEFAULT_BASE_URL)
            .with_subscription_id(Some("override".to_string()))
            .with_base_url(None);
        assert_eq!(config.subscription_id.as_deref(), Some("override"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        let config = config.with_subscription_id(Some("".to_string()));
        assert_eq!(config.subscription_id.as_deref(), Some("override"));
    }

    #[test]
    fn status_errors_render_hints() {
        let error = ApiError::Status {
            method: "GET".to_string(),
            url: "https://management.azure.com/x".to_string(),
            status: 401,
            body: "{}".to_string(),
            hint: Some("set a token".to_string()),
        };
        assert_eq!(error.status(), Some(401));
        assert!(error.to_string().ends_with("HTTP 401: {} (set a token)"));
    }
}
