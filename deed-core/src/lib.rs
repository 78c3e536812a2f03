//! Core domain for the deed drafting service.
//!
//! Holds the property valuation calculator, the per-form validators, and the
//! `form → preview → processing → payment` workflow together with the
//! collaborator traits it is driven through.

pub mod calculations;
pub mod forms;
pub mod models;
pub mod notify;
pub mod remote;
pub mod store;
pub mod workflow;

pub use calculations::{ValuationError, ValuationWorksheet};
pub use forms::{FormData, FormType, ValidationErrors, WorkflowSubmission};
pub use models::*;
pub use notify::{Notice, NoticeLevel, Notifier, TracingNotifier};
pub use remote::{PaymentGateway, RemoteError, SubmissionBackend, SubmissionReceipt};
pub use store::{KeyValueStore, StoreError};
pub use workflow::{WorkflowController, WorkflowError, WorkflowPhase, WorkflowState};
