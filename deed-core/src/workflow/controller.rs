use std::time::Duration;

use tracing::{debug, info, warn};

use super::payment::{GatewayHandoff, PaymentRequest};
use super::state::{WorkflowPhase, WorkflowState};
use super::WorkflowError;
use crate::forms::{FormType, WorkflowSubmission};
use crate::notify::{Notice, Notifier, TracingNotifier};
use crate::remote::{PaymentGateway, SubmissionBackend};
use crate::store::{ACCESS_TOKEN_KEY, KeyValueStore, draft_key};

/// How long a failure stays on screen before the form comes back.
pub const DEFAULT_RETURN_TO_FORM_DELAY: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowConfig {
    pub return_to_form_delay: Duration,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            return_to_form_delay: DEFAULT_RETURN_TO_FORM_DELAY,
        }
    }
}

/// Drives one drafting session through its phases.
///
/// Every transition takes `&mut self`, so a second transition cannot start
/// while a submission is in flight.
pub struct WorkflowController {
    state: WorkflowState,
    backend: Box<dyn SubmissionBackend>,
    gateway: Box<dyn PaymentGateway>,
    store: Box<dyn KeyValueStore>,
    notifier: Box<dyn Notifier>,
    config: WorkflowConfig,
}

impl WorkflowController {
    pub fn new(
        backend: Box<dyn SubmissionBackend>,
        gateway: Box<dyn PaymentGateway>,
        store: Box<dyn KeyValueStore>,
    ) -> Self {
        Self {
            state: WorkflowState::default(),
            backend,
            gateway,
            store,
            notifier: Box::new(TracingNotifier),
            config: WorkflowConfig::default(),
        }
    }

    pub fn with_notifier(
        mut self,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_config(
        mut self,
        config: WorkflowConfig,
    ) -> Self {
        self.config = config;
        self
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.state.phase
    }

    pub fn submission(&self) -> Option<&WorkflowSubmission> {
        self.state.submission.as_ref()
    }

    /// Rendered document, available while previewing.
    pub fn preview(&self) -> Option<String> {
        match (self.state.phase, &self.state.submission) {
            (WorkflowPhase::Preview, Some(submission)) => Some(submission.to_string()),
            _ => None,
        }
    }

    fn require_phase(
        &self,
        expected: WorkflowPhase,
        action: &'static str,
    ) -> Result<(), WorkflowError> {
        if self.state.phase == expected {
            Ok(())
        } else {
            Err(WorkflowError::InvalidTransition {
                phase: self.state.phase,
                action,
            })
        }
    }

    fn enter(
        &mut self,
        phase: WorkflowPhase,
    ) {
        debug!(from = %self.state.phase, to = %phase, "workflow transition");
        self.state.phase = phase;
    }

    /// `form → preview`, once the form's required fields are present.
    ///
    /// The submission is kept either way so nothing typed is lost.
    pub async fn submit_form(
        &mut self,
        submission: WorkflowSubmission,
    ) -> Result<(), WorkflowError> {
        self.require_phase(WorkflowPhase::Form, "submit the form")?;

        let checked = submission.data.validate_fields();
        self.state.submission = Some(submission);

        if let Err(errors) = checked {
            warn!(errors = errors.len(), "form has missing or invalid fields");
            let message = errors.to_string();
            self.state.message = Some(message.clone());
            self.state.errors = Some(errors.clone());
            self.notifier.notify(Notice::error(message));
            return Err(WorkflowError::Validation(errors));
        }

        self.state.message = None;
        self.state.errors = None;
        self.save_draft().await;
        self.enter(WorkflowPhase::Preview);
        info!(form_type = ?self.state.submission.as_ref().map(|s| s.form_type()), "form ready for preview");
        Ok(())
    }

    /// `preview → form` with the submission untouched.
    pub fn edit(&mut self) -> Result<(), WorkflowError> {
        self.require_phase(WorkflowPhase::Preview, "edit")?;
        self.enter(WorkflowPhase::Form);
        Ok(())
    }

    /// `preview → processing → payment`.
    ///
    /// Checks the document's structure, then sends it to the backend. On any
    /// failure the message stays up for the configured delay and the
    /// workflow returns to `form` with the submission preserved.
    pub async fn confirm(&mut self) -> Result<&PaymentRequest, WorkflowError> {
        self.require_phase(WorkflowPhase::Preview, "confirm")?;
        let Some(submission) = self.state.submission.clone() else {
            return Err(WorkflowError::NoSubmission("confirm"));
        };

        self.enter(WorkflowPhase::Processing);
        self.state.message = Some("Submitting your document...".to_string());

        if let Err(errors) = submission.data.validate_structure() {
            warn!(form_type = %submission.form_type(), errors = errors.len(), "structural validation failed");
            self.state.errors = Some(errors.clone());
            self.fail_back_to_form(errors.to_string()).await;
            return Err(WorkflowError::Validation(errors));
        }

        let token = self.access_token().await;
        let receipt = match self.backend.submit(&submission, token.as_deref()).await {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(form_type = %submission.form_type(), error = %e, "submission failed");
                self.fail_back_to_form(e.to_string()).await;
                return Err(e.into());
            }
        };

        info!(form_type = %submission.form_type(), form_id = %receipt.form_id, "submission accepted");
        self.clear_draft(submission.form_type()).await;

        let message = "Document submitted. Proceed to payment.".to_string();
        self.notifier.notify(Notice::success(message.clone()));
        self.state.message = Some(message);
        self.state.errors = None;
        self.enter(WorkflowPhase::Payment);

        let request = self
            .state
            .payment
            .insert(PaymentRequest::new(receipt.form_id, &submission));
        Ok(&*request)
    }

    async fn fail_back_to_form(
        &mut self,
        message: String,
    ) {
        self.notifier.notify(Notice::error(message.clone()));
        self.state.message = Some(message);
        tokio::time::sleep(self.config.return_to_form_delay).await;
        self.enter(WorkflowPhase::Form);
    }

    /// Requests gateway parameters for the accepted submission.
    ///
    /// A failure leaves the workflow in `payment` with the message set.
    pub async fn initialize_payment(&mut self) -> Result<GatewayHandoff, WorkflowError> {
        self.require_phase(WorkflowPhase::Payment, "initialise payment")?;
        let Some(request) = self.state.payment.clone() else {
            return Err(WorkflowError::NoSubmission("pay for"));
        };

        let token = self.access_token().await;
        match self.gateway.initialize(&request, token.as_deref()).await {
            Ok(params) => {
                info!(form_id = %request.form_id, txnid = %params.txnid, "payment initialised");
                self.state.message = Some("Redirecting to payment gateway...".to_string());
                Ok(params.into_handoff())
            }
            Err(e) => {
                warn!(form_id = %request.form_id, error = %e, "payment initialisation failed");
                let message = e.to_string();
                self.notifier.notify(Notice::error(message.clone()));
                self.state.message = Some(message);
                Err(e.into())
            }
        }
    }

    /// Back to an empty form from any phase.
    pub fn reset(&mut self) {
        info!(from = %self.state.phase, "workflow reset");
        self.state = WorkflowState::default();
    }

    /// Loads the saved draft for `form_type` into the form.
    ///
    /// Returns `false` when there is no usable draft.
    pub async fn restore_draft(
        &mut self,
        form_type: FormType,
    ) -> Result<bool, WorkflowError> {
        self.require_phase(WorkflowPhase::Form, "restore a draft")?;

        let raw = match self.store.get(&draft_key(form_type)).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(false),
            Err(e) => {
                warn!(%form_type, error = %e, "could not read draft");
                return Ok(false);
            }
        };

        match serde_json::from_str::<WorkflowSubmission>(&raw) {
            Ok(submission) if submission.form_type() == form_type => {
                debug!(%form_type, "draft restored");
                self.state.submission = Some(submission);
                Ok(true)
            }
            Ok(submission) => {
                warn!(%form_type, found = %submission.form_type(), "draft holds a different form type");
                Ok(false)
            }
            Err(e) => {
                warn!(%form_type, error = %e, "discarding unreadable draft");
                Ok(false)
            }
        }
    }

    async fn access_token(&self) -> Option<String> {
        match self.store.get(ACCESS_TOKEN_KEY).await {
            Ok(token) => token.filter(|t| !t.trim().is_empty()),
            Err(e) => {
                warn!(error = %e, "could not read access token");
                None
            }
        }
    }

    async fn save_draft(&self) {
        let Some(submission) = &self.state.submission else {
            return;
        };
        let key = draft_key(submission.form_type());
        let result = match serde_json::to_string(submission) {
            Ok(json) => self.store.set(&key, &json).await,
            Err(e) => {
                warn!(%key, error = %e, "could not serialise draft");
                return;
            }
        };
        if let Err(e) = result {
            warn!(%key, error = %e, "could not save draft");
        }
    }

    async fn clear_draft(
        &self,
        form_type: FormType,
    ) {
        if let Err(e) = self.store.remove(&draft_key(form_type)).await {
            warn!(%form_type, error = %e, "could not clear draft");
        }
    }
}
