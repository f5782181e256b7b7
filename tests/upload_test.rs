//! Tests for the clear-then-batch upload path and the HTTP store client

use async_trait::async_trait;
use company_directory::models::{OrgRow, NAME_FIELD};
use company_directory::store::{DocumentStore, HttpDocumentStore, StoreError, StoreResult};
use company_directory::upload::UploadService;
use serde_json::json;
use std::sync::Arc;
use std::sync::Mutex;

/// In-memory store recording the operations performed against it.
#[derive(Default)]
struct RecordingStore {
    ops: Mutex<Vec<Op>>,
    existing: usize,
    fail_delete: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum Op {
    DeleteAll,
    InsertBatch(Vec<OrgRow>),
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn fetch_all(&self) -> StoreResult<Vec<OrgRow>> {
        Ok(Vec::new())
    }

    async fn delete_all(&self) -> StoreResult<usize> {
        if self.fail_delete {
            return Err(StoreError::Request("connection refused".to_string()));
        }
        self.ops.lock().unwrap().push(Op::DeleteAll);
        Ok(self.existing)
    }

    async fn insert_batch(&self, documents: &[OrgRow]) -> StoreResult<()> {
        self.ops
            .lock()
            .unwrap()
            .push(Op::InsertBatch(documents.to_vec()));
        Ok(())
    }
}

fn org(name: &str) -> OrgRow {
    OrgRow::from_fields([(NAME_FIELD, json!(name))])
}

#[tokio::test]
async fn uploads_in_capped_batches_with_progress() {
    let store = Arc::new(RecordingStore {
        existing: 3,
        ..Default::default()
    });
    let uploader = UploadService::new(store.clone()).with_batch_size(500);

    let rows: Vec<OrgRow> = (0..1200).map(|i| org(&format!("Company {i}"))).collect();
    let mut progress = Vec::new();
    let report = uploader
        .replace_collection(&rows, |p| progress.push(p))
        .await
        .unwrap();

    assert_eq!(report.cleared, 3);
    assert_eq!(report.uploaded, 1200);
    assert_eq!(report.skipped, 0);

    let ops = store.ops.lock().unwrap();
    assert_eq!(ops[0], Op::DeleteAll, "clear must precede every insert");
    let batch_sizes: Vec<usize> = ops[1..]
        .iter()
        .map(|op| match op {
            Op::InsertBatch(batch) => batch.len(),
            other => panic!("unexpected op {other:?}"),
        })
        .collect();
    assert_eq!(batch_sizes, vec![500, 500, 200]);

    // Cumulative fractions in (0, 1], ending at exactly 1.
    assert_eq!(progress.len(), 3);
    assert!(progress.windows(2).all(|w| w[0] < w[1]));
    assert!((progress[0] - 500.0 / 1200.0).abs() < 1e-9);
    assert_eq!(*progress.last().unwrap(), 1.0);
}

#[tokio::test]
async fn null_fields_are_stripped_and_empty_rows_skipped() {
    let store = Arc::new(RecordingStore::default());
    let uploader = UploadService::new(store.clone());

    let rows = vec![
        OrgRow::from_fields([(NAME_FIELD, json!("Acme Corp")), ("County", json!(null))]),
        OrgRow::from_fields([("County", json!(null))]),
        OrgRow::new(),
    ];
    let report = uploader.replace_collection(&rows, |_| {}).await.unwrap();

    assert_eq!(report.uploaded, 1);
    assert_eq!(report.skipped, 2);

    let ops = store.ops.lock().unwrap();
    match &ops[1] {
        Op::InsertBatch(batch) => {
            assert_eq!(batch.len(), 1);
            assert_eq!(batch[0].len(), 1, "null field must be stripped");
        }
        other => panic!("unexpected op {other:?}"),
    }
}

#[tokio::test]
async fn a_failed_clear_aborts_before_any_insert() {
    let store = Arc::new(RecordingStore {
        fail_delete: true,
        ..Default::default()
    });
    let uploader = UploadService::new(store.clone());

    let err = uploader
        .replace_collection(&[org("Acme Corp")], |_| {})
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Request(_)));
    assert!(store.ops.lock().unwrap().is_empty());
}

#[tokio::test]
async fn http_store_round_trip() {
    let mut server = mockito::Server::new_async().await;

    let fetch = server
        .mock("GET", "/companies")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"Organisation Name":"Acme Corp","County":"Kent"}]"#)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/companies")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"deleted":2}"#)
        .create_async()
        .await;
    let insert = server
        .mock("POST", "/companies/batch")
        .match_body(mockito::Matcher::Json(json!({
            "documents": [{"Organisation Name": "Acme Corp"}]
        })))
        .with_status(200)
        .create_async()
        .await;

    let store = HttpDocumentStore::new(&server.url(), "companies", 5).unwrap();

    let documents = store.fetch_all().await.unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].display_name().as_deref(), Some("Acme Corp"));
    assert_eq!(documents[0].field_str("County").as_deref(), Some("Kent"));

    assert_eq!(store.delete_all().await.unwrap(), 2);

    store.insert_batch(&[org("Acme Corp")]).await.unwrap();

    fetch.assert_async().await;
    delete.assert_async().await;
    insert.assert_async().await;
}

#[tokio::test]
async fn http_store_surfaces_server_errors() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/companies")
        .with_status(503)
        .with_body("maintenance")
        .create_async()
        .await;

    let store = HttpDocumentStore::new(&server.url(), "companies", 5).unwrap();
    let err = store.fetch_all().await.unwrap_err();
    match err {
        StoreError::Status { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("unexpected error {other:?}"),
    }
}
