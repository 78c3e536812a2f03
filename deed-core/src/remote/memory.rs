use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use super::{PaymentGateway, RemoteError, SubmissionBackend, SubmissionReceipt};
use crate::forms::WorkflowSubmission;
use crate::workflow::{GatewayParams, PaymentRequest};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
struct BackendInner {
    received: Vec<(WorkflowSubmission, Option<String>)>,
    failure: Option<RemoteError>,
    next_id: u64,
}

/// In-process backend that accepts every submission and numbers them.
///
/// Clones share state, so a test can keep a handle after passing one to the
/// workflow.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<BackendInner>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that rejects every submission with `error`.
    pub fn failing(error: RemoteError) -> Self {
        let backend = Self::new();
        backend.fail_with(Some(error));
        backend
    }

    /// Sets (or clears) the error returned by subsequent submissions.
    pub fn fail_with(
        &self,
        error: Option<RemoteError>,
    ) {
        lock(&self.inner).failure = error;
    }

    /// Submissions received so far with the access token sent alongside each.
    pub fn received(&self) -> Vec<(WorkflowSubmission, Option<String>)> {
        lock(&self.inner).received.clone()
    }
}

#[async_trait]
impl SubmissionBackend for MemoryBackend {
    async fn submit(
        &self,
        submission: &WorkflowSubmission,
        access_token: Option<&str>,
    ) -> Result<SubmissionReceipt, RemoteError> {
        let mut inner = lock(&self.inner);
        inner
            .received
            .push((submission.clone(), access_token.map(str::to_owned)));

        if let Some(error) = &inner.failure {
            return Err(error.clone());
        }

        inner.next_id += 1;
        let form_id = format!("local-{}", inner.next_id);
        debug!(form_type = %submission.form_type(), %form_id, "memory backend accepted submission");
        Ok(SubmissionReceipt { form_id })
    }
}

#[derive(Debug, Default)]
struct GatewayInner {
    requests: Vec<PaymentRequest>,
    failure: Option<RemoteError>,
}

/// In-process gateway that signs nothing and points at a placeholder URL.
#[derive(Debug, Clone)]
pub struct MemoryGateway {
    payment_url: String,
    inner: Arc<Mutex<GatewayInner>>,
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new("http://localhost/pay")
    }
}

impl MemoryGateway {
    pub fn new(payment_url: impl Into<String>) -> Self {
        Self {
            payment_url: payment_url.into(),
            inner: Arc::default(),
        }
    }

    pub fn failing(error: RemoteError) -> Self {
        let gateway = Self::default();
        lock(&gateway.inner).failure = Some(error);
        gateway
    }

    pub fn requests(&self) -> Vec<PaymentRequest> {
        lock(&self.inner).requests.clone()
    }
}

#[async_trait]
impl PaymentGateway for MemoryGateway {
    async fn initialize(
        &self,
        request: &PaymentRequest,
        _access_token: Option<&str>,
    ) -> Result<GatewayParams, RemoteError> {
        let mut inner = lock(&self.inner);
        inner.requests.push(request.clone());

        if let Some(error) = &inner.failure {
            return Err(error.clone());
        }

        Ok(GatewayParams {
            payment_url: self.payment_url.clone(),
            txnid: format!("TXN-{}", request.form_id),
            amount: format!("{:.2}", request.amount),
            surl: format!("{}/success", self.payment_url),
            furl: format!("{}/failure", self.payment_url),
            hash: String::new(),
            extra: Default::default(),
        })
    }
}
