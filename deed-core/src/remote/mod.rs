//! Collaborators reached over the network: the submission backend and the
//! payment gateway.

mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::forms::WorkflowSubmission;
use crate::workflow::{GatewayParams, PaymentRequest};

pub use memory::{MemoryBackend, MemoryGateway};

/// Message shown when a failure carries nothing more specific.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// A failed round trip, reduced to one display string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response. Displays the backend's `message` when it sent one.
    #[error("{}", .message.as_deref().unwrap_or(GENERIC_FAILURE_MESSAGE))]
    Status { status: u16, message: Option<String> },

    #[error("Unexpected response from server: {0}")]
    InvalidResponse(String),
}

/// What the backend returns for an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub form_id: String,
}

/// Persists a completed submission and issues its form identifier.
#[async_trait]
pub trait SubmissionBackend: Send + Sync {
    async fn submit(
        &self,
        submission: &WorkflowSubmission,
        access_token: Option<&str>,
    ) -> Result<SubmissionReceipt, RemoteError>;
}

/// Obtains signed parameters for the hosted payment page.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn initialize(
        &self,
        request: &PaymentRequest,
        access_token: Option<&str>,
    ) -> Result<GatewayParams, RemoteError>;
}
