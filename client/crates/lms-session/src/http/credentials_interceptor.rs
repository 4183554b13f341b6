use crate::OutgoingRequest;

use log::debug;

/// Forces credentialed transport for requests aimed at the platform API.
///
/// A request targets the platform when its URL starts with the API origin (on a
/// path boundary) or is a relative path under the reserved API prefix. Anything
/// else passes through unchanged.
#[derive(Debug, Clone)]
pub struct CredentialsInterceptor {
    api_origin: String,
    reserved_prefix: String,
}

impl CredentialsInterceptor {
    pub fn new(api_origin: &str, reserved_prefix: &str) -> Self {
        Self {
            api_origin: api_origin.trim_end_matches('/').to_string(),
            reserved_prefix: reserved_prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn intercept(&self, mut request: OutgoingRequest) -> OutgoingRequest {
        if !request.with_credentials && self.targets_platform(&request.url) {
            debug!("Forcing credentials for {} {}", request.method, request.url);
            request.with_credentials = true;
        }
        request
    }

    pub fn targets_platform(&self, url: &str) -> bool {
        has_boundary_prefix(url, &self.api_origin)
            || (url.starts_with('/') && has_boundary_prefix(url, &self.reserved_prefix))
    }
}

/// `prefix` matches only when followed by nothing, `/`, `?` or `#`.
fn has_boundary_prefix(url: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return false;
    }
    match url.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with(['/', '?', '#']),
        None => false,
    }
}
