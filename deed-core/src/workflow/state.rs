use std::fmt;

use serde::{Deserialize, Serialize};

use super::PaymentRequest;
use crate::forms::{ValidationErrors, WorkflowSubmission};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowPhase {
    #[default]
    Form,
    Preview,
    Processing,
    Payment,
}

impl WorkflowPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Form => "form",
            Self::Preview => "preview",
            Self::Processing => "processing",
            Self::Payment => "payment",
        }
    }
}

impl fmt::Display for WorkflowPhase {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything one drafting session holds. Only the controller mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowState {
    pub phase: WorkflowPhase,
    /// Submission being drafted. Kept across edits and failed confirms.
    pub submission: Option<WorkflowSubmission>,
    /// Status line for the current phase.
    pub message: Option<String>,
    /// Field problems from the last validation that failed.
    pub errors: Option<ValidationErrors>,
    /// Set once the backend has accepted the submission.
    pub payment: Option<PaymentRequest>,
}
