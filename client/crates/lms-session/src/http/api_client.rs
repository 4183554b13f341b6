use crate::{ApiError, ApiResult, CredentialsInterceptor, OutgoingRequest};

use std::sync::Arc;
use std::time::Duration;

use lms_config::ApiConfig;
use log::debug;
use reqwest::cookie::Jar;
use reqwest::{Client as ReqwestClient, Method, Url};
use serde_json::Value;

/// HTTP transport for the platform API.
///
/// Credentialed requests go through a client sharing the session cookie jar;
/// uncredentialed requests use a client without a cookie store. Every request passes
/// through the [`CredentialsInterceptor`] first.
pub struct ApiClient {
    base_url: String,
    api_prefix: String,
    credentials: CredentialsInterceptor,
    credentialed: ReqwestClient,
    anonymous: ReqwestClient,
    jar: Arc<Jar>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|_| ApiError::invalid_url(&base_url))?;

        let timeout = Duration::from_secs(config.timeout_secs);
        let jar = Arc::new(Jar::default());

        let credentialed = ReqwestClient::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(timeout)
            .build()?;
        let anonymous = ReqwestClient::builder().timeout(timeout).build()?;

        Ok(Self {
            credentials: CredentialsInterceptor::new(&base_url, &config.api_prefix),
            api_prefix: config.api_prefix.trim_end_matches('/').to_string(),
            base_url,
            credentialed,
            anonymous,
            jar,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials_interceptor(&self) -> &CredentialsInterceptor {
        &self.credentials
    }

    /// Shared cookie jar holding the backend session cookie
    pub fn cookie_jar(&self) -> Arc<Jar> {
        Arc::clone(&self.jar)
    }

    /// Path of an endpoint under the API prefix (e.g. "/api/auth/me")
    pub fn api_path(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_prefix, endpoint)
    }

    pub fn request(&self, method: Method, target: &str) -> OutgoingRequest {
        OutgoingRequest::new(method, target)
    }

    /// Resolves a relative target against the API origin.
    pub fn resolve_url(&self, target: &str) -> ApiResult<Url> {
        let absolute = if target.starts_with('/') {
            format!("{}{}", self.base_url, target)
        } else {
            target.to_string()
        };
        Url::parse(&absolute).map_err(|_| ApiError::invalid_url(absolute))
    }

    /// Execute request and map non-success responses to [`ApiError::Status`]
    pub async fn execute(&self, request: OutgoingRequest) -> ApiResult<Value> {
        let request = self.credentials.intercept(request);
        let url = self.resolve_url(&request.url)?;

        let client = if request.with_credentials {
            &self.credentialed
        } else {
            &self.anonymous
        };

        let mut builder = client.request(request.method.clone(), url);
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        debug!(
            "{} {} -> {}",
            request.method,
            request.url,
            status.as_u16()
        );

        if !status.is_success() {
            let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
            let (code, message) = error_details(&body, status.canonical_reason());
            return Err(ApiError::status_error(status.as_u16(), code, message));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// Pulls `code`/`message` out of `{"error": {...}}`, `{"message": ...}` or
/// `{"error": "..."}` bodies.
fn error_details(body: &Value, reason: Option<&str>) -> (String, String) {
    let nested = body.get("error").filter(|e| e.is_object());

    let code = nested
        .and_then(|e| e.get("code"))
        .or_else(|| body.get("code"))
        .and_then(Value::as_str)
        .unwrap_or("UNKNOWN")
        .to_string();

    let message = nested
        .and_then(|e| e.get("message"))
        .or_else(|| body.get("message"))
        .or_else(|| body.get("error"))
        .and_then(Value::as_str)
        .or(reason)
        .unwrap_or("Unknown error")
        .to_string();

    (code, message)
}
