pub(crate) mod api_client;
pub(crate) mod credentials;
pub(crate) mod credentials_interceptor;
pub(crate) mod error;
pub(crate) mod error_interceptor;
pub(crate) mod outgoing_request;
pub(crate) mod portal_client;
pub(crate) mod session_api;

pub use api_client::ApiClient;
pub use credentials::Credentials;
pub use credentials_interceptor::CredentialsInterceptor;
pub use error::{ApiError, Result as ApiResult};
pub use error_interceptor::ErrorInterceptor;
pub use outgoing_request::OutgoingRequest;
pub use portal_client::PortalClient;
pub use session_api::{HttpSessionApi, SessionApi};
