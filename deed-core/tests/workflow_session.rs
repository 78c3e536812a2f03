//! A drafting session driven from the outside, with in-memory collaborators.

use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::time::Instant;

use deed_core::forms::TrustDeedForm;
use deed_core::remote::{MemoryBackend, MemoryGateway};
use deed_core::store::{ACCESS_TOKEN_KEY, KeyValueStore, MemoryStore};
use deed_core::workflow::DEFAULT_RETURN_TO_FORM_DELAY;
use deed_core::{
    FormData, PersonRecord, RemoteError, WorkflowController, WorkflowError, WorkflowPhase,
    WorkflowSubmission,
};

fn trust_deed(trustee_mobile: &str) -> WorkflowSubmission {
    WorkflowSubmission::new(FormData::TrustDeed(TrustDeedForm {
        trust_name: "Annapurna Trust".into(),
        settlor: PersonRecord::new("Shyam Sundar", "Mathura", "9876501234"),
        trustees: vec![PersonRecord::new("Radha Sundar", "Mathura", trustee_mobile)],
        witnesses: vec![PersonRecord::new("Gopal Das", "Vrindavan", "9090909090")],
        objectives: vec!["Free meals for pilgrims".into()],
        ..Default::default()
    }))
}

fn controller(
    backend: &MemoryBackend,
    store: &MemoryStore,
) -> WorkflowController {
    WorkflowController::new(
        Box::new(backend.clone()),
        Box::new(MemoryGateway::new("https://pay.example/_payment")),
        Box::new(store.clone()),
    )
}

#[tokio::test]
async fn trust_deed_without_complete_trustee_is_held_in_form() {
    let backend = MemoryBackend::new();
    let mut workflow = controller(&backend, &MemoryStore::new());

    let err = workflow.submit_form(trust_deed("")).await.unwrap_err();

    let WorkflowError::Validation(errors) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert!(errors.field("trustees").is_some());
    assert_eq!(workflow.phase(), WorkflowPhase::Form);
}

#[tokio::test]
async fn full_session_reaches_gateway_handoff() {
    let backend = MemoryBackend::new();
    let store = MemoryStore::new();
    store.set(ACCESS_TOKEN_KEY, "jwt-123").await.unwrap();
    let mut workflow = controller(&backend, &store);

    workflow.submit_form(trust_deed("9123456780")).await.unwrap();
    assert_eq!(workflow.phase(), WorkflowPhase::Preview);
    assert!(workflow.preview().unwrap().contains("Annapurna Trust"));

    let request = workflow.confirm().await.unwrap().clone();
    assert_eq!(request.form_id, "local-1");

    let handoff = workflow.initialize_payment().await.unwrap();
    assert_eq!(handoff.action, "https://pay.example/_payment");
    assert_eq!(handoff.field("amount"), Some("1999.00"));
    assert!(handoff.to_html().contains("name=\"txnid\" value=\"TXN-local-1\""));

    let received = backend.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].1.as_deref(), Some("jwt-123"));
}

#[tokio::test(start_paused = true)]
async fn server_error_returns_to_form_within_delay_and_keeps_submission() {
    let backend = MemoryBackend::failing(RemoteError::Status {
        status: 500,
        message: None,
    });
    let mut workflow = controller(&backend, &MemoryStore::new());
    let submission = trust_deed("9123456780");
    workflow.submit_form(submission.clone()).await.unwrap();

    let started = Instant::now();
    let err = workflow.confirm().await.unwrap_err();
    let waited = started.elapsed();

    assert!(matches!(
        err,
        WorkflowError::Remote(RemoteError::Status { status: 500, .. })
    ));
    assert!(waited >= DEFAULT_RETURN_TO_FORM_DELAY);
    assert!(waited < DEFAULT_RETURN_TO_FORM_DELAY + Duration::from_millis(100));
    assert_eq!(workflow.phase(), WorkflowPhase::Form);
    assert_eq!(workflow.submission(), Some(&submission));
    assert_eq!(
        workflow.state().message.as_deref(),
        Some("Something went wrong. Please try again.")
    );
}

#[tokio::test]
async fn draft_survives_into_a_new_session() {
    let store = MemoryStore::new();
    let submission = trust_deed("9123456780");

    let mut first = controller(&MemoryBackend::new(), &store);
    first.submit_form(submission.clone()).await.unwrap();
    drop(first);

    let mut second = controller(&MemoryBackend::new(), &store);
    let restored = second
        .restore_draft(deed_core::FormType::TrustDeed)
        .await
        .unwrap();

    assert!(restored);
    assert_eq!(second.submission(), Some(&submission));
}
