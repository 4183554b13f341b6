use crate::{ApiClient, ApiResult, ErrorInterceptor, OutgoingRequest};

use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;

/// Client for feature calls: platform requests with the error interceptor applied.
pub struct PortalClient {
    api: Arc<ApiClient>,
    interceptor: ErrorInterceptor,
}

impl PortalClient {
    pub fn new(api: Arc<ApiClient>, interceptor: ErrorInterceptor) -> Self {
        Self { api, interceptor }
    }

    pub async fn send(&self, request: OutgoingRequest) -> ApiResult<Value> {
        match self.api.execute(request).await {
            Ok(value) => Ok(value),
            Err(e) => Err(self.interceptor.handle(e).await),
        }
    }

    pub async fn get(&self, target: &str) -> ApiResult<Value> {
        self.send(OutgoingRequest::get(target)).await
    }

    pub async fn post(&self, target: &str, body: Value) -> ApiResult<Value> {
        self.send(OutgoingRequest::post(target).json(body)).await
    }

    pub async fn put(&self, target: &str, body: Value) -> ApiResult<Value> {
        self.send(OutgoingRequest::new(Method::PUT, target).json(body))
            .await
    }

    pub async fn delete(&self, target: &str) -> ApiResult<Value> {
        self.send(OutgoingRequest::new(Method::DELETE, target)).await
    }
}
