//! A file-backed store keeps drafts across reopenings.

use std::path::PathBuf;

use deed_core::forms::TrustDeedForm;
use deed_core::remote::{MemoryBackend, MemoryGateway};
use deed_core::store::{KeyValueStore, draft_key};
use deed_core::{FormData, FormType, WorkflowController, WorkflowSubmission};
use deed_store_sqlite::SqliteStore;
use pretty_assertions::assert_eq;

fn temp_db(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("{name}-{}.db", std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

async fn open(path: &PathBuf) -> SqliteStore {
    let store = SqliteStore::new(path.to_str().expect("temp path is utf-8"))
        .await
        .expect("Failed to open database file");
    store
        .run_migrations()
        .await
        .expect("Failed to run migrations");
    store
}

#[tokio::test]
async fn draft_written_by_workflow_is_read_after_reopen() {
    let path = temp_db("deed-store-draft");
    let submission = WorkflowSubmission::new(FormData::TrustDeed(TrustDeedForm {
        trust_name: "Jal Seva Trust".into(),
        trustees: vec![deed_core::PersonRecord::new("Usha", "Patna", "9876543210")],
        witnesses: vec![deed_core::PersonRecord::new("Manoj", "Patna", "9123456789")],
        ..Default::default()
    }));

    {
        let mut workflow = WorkflowController::new(
            Box::new(MemoryBackend::new()),
            Box::new(MemoryGateway::default()),
            Box::new(open(&path).await),
        );
        workflow.submit_form(submission.clone()).await.unwrap();
    }

    let reopened = open(&path).await;
    let raw = reopened
        .get(&draft_key(FormType::TrustDeed))
        .await
        .unwrap()
        .expect("draft should be stored");
    let restored: WorkflowSubmission = serde_json::from_str(&raw).unwrap();

    assert_eq!(restored, submission);

    reopened.pool().close().await;
    let _ = std::fs::remove_file(&path);
}
