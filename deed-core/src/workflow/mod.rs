//! The `form → preview → processing → payment` state machine.

mod controller;
mod payment;
mod state;

use thiserror::Error;

pub use controller::{DEFAULT_RETURN_TO_FORM_DELAY, WorkflowConfig, WorkflowController};
pub use payment::{GatewayHandoff, GatewayParams, PaymentRequest};
pub use state::{WorkflowPhase, WorkflowState};

use crate::forms::ValidationErrors;
use crate::remote::RemoteError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("cannot {action} while in {phase}")]
    InvalidTransition {
        phase: WorkflowPhase,
        action: &'static str,
    },

    #[error("no submission to {0}")]
    NoSubmission(&'static str),

    #[error("{0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}
