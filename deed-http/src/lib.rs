//! REST client for the deed backend.
//!
//! | Call                      | Endpoint                              |
//! |---------------------------|---------------------------------------|
//! | submit a completed form   | `POST {api_base}/api/{form-type}`     |
//! | initialise payment        | `POST {api_base}/api/payment/initialize` |
//!
//! Both send `Authorization: Bearer <token>` when an access token is stored.
//! Any non-2xx response becomes [`RemoteError::Status`] carrying the body's
//! `message`, if there is one.

mod response;

use async_trait::async_trait;
use deed_core::remote::{PaymentGateway, RemoteError, SubmissionBackend, SubmissionReceipt};
use deed_core::workflow::{GatewayParams, PaymentRequest};
use deed_core::WorkflowSubmission;
use serde::Serialize;
use tracing::{debug, warn};

pub use response::{interpret_gateway_response, interpret_submission_response};

/// Environment variable holding the backend base URL.
pub const API_BASE_ENV: &str = "NEXT_PUBLIC_API_BASE";

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Talks to the backend over HTTP. Implements both collaborator traits so
/// one client serves the whole workflow.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    api_base: String,
}

impl HttpBackend {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_base)
    }

    pub fn with_client(
        client: reqwest::Client,
        api_base: impl Into<String>,
    ) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self { client, api_base }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn endpoint(
        &self,
        path: &str,
    ) -> String {
        format!("{}/api/{}", self.api_base, path.trim_start_matches('/'))
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
        access_token: Option<&str>,
    ) -> Result<(u16, String), RemoteError> {
        let mut request = self.client.post(url).json(body);
        if let Some(token) = access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            warn!(%url, error = %e, "request failed");
            RemoteError::Network(e.to_string())
        })?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        debug!(%url, status, bytes = text.len(), "response received");
        Ok((status, text))
    }
}

#[async_trait]
impl SubmissionBackend for HttpBackend {
    async fn submit(
        &self,
        submission: &WorkflowSubmission,
        access_token: Option<&str>,
    ) -> Result<SubmissionReceipt, RemoteError> {
        let url = self.endpoint(submission.form_type().slug());
        let (status, body) = self.post_json(&url, submission, access_token).await?;
        interpret_submission_response(status, &body)
    }
}

#[async_trait]
impl PaymentGateway for HttpBackend {
    async fn initialize(
        &self,
        request: &PaymentRequest,
        access_token: Option<&str>,
    ) -> Result<GatewayParams, RemoteError> {
        let url = self.endpoint("payment/initialize");
        let (status, body) = self.post_json(&url, request, access_token).await?;
        interpret_gateway_response(status, &body)
    }
}
