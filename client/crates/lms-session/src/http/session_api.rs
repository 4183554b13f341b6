use crate::{ApiClient, ApiResult, Credentials, OutgoingRequest};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lms_config::ApiConfig;
use log::debug;
use reqwest::Method;
use serde_json::Value;

/// Backend session endpoints.
///
/// Payloads are returned raw; shape normalization happens in
/// [`IdentityNormalizer`](crate::IdentityNormalizer), away from the network call.
#[async_trait]
pub trait SessionApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> ApiResult<Value>;

    async fn check_session(&self) -> ApiResult<Value>;

    async fn logout(&self) -> ApiResult<()>;
}

/// [`SessionApi`] over the platform HTTP API.
///
/// These calls go straight to the transport and never through the error
/// interceptor, so a failing logout cannot trigger another forced logout.
pub struct HttpSessionApi {
    client: Arc<ApiClient>,
    login_path: String,
    session_path: String,
    logout_path: String,
}

impl HttpSessionApi {
    pub fn new(client: Arc<ApiClient>, config: &ApiConfig) -> Self {
        Self {
            login_path: client.api_path(&config.login_path),
            session_path: client.api_path(&config.session_path),
            logout_path: client.api_path(&config.logout_path),
            client,
        }
    }
}

#[async_trait]
impl SessionApi for HttpSessionApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<Value> {
        let body = serde_json::to_value(credentials)?;
        let request = OutgoingRequest::post(&self.login_path)
            .json(body)
            .with_credentials(true);
        self.client.execute(request).await
    }

    async fn check_session(&self) -> ApiResult<Value> {
        let request = self
            .client
            .request(Method::GET, &self.session_path)
            .with_credentials(true);
        self.client.execute(request).await
    }

    async fn logout(&self) -> ApiResult<()> {
        let request = OutgoingRequest::post(&self.logout_path).with_credentials(true);
        self.client.execute(request).await.map(|_| ())
    }
}

/// Calls `logout` bounded by `timeout`; failures are logged and ignored.
pub(crate) async fn best_effort_logout(api: &dyn SessionApi, timeout: Duration) {
    match tokio::time::timeout(timeout, api.logout()).await {
        Ok(Ok(())) => debug!("Backend session closed"),
        Ok(Err(e)) => debug!("Ignoring backend logout failure: {e}"),
        Err(_) => debug!("Backend logout timed out after {}ms", timeout.as_millis()),
    }
}
