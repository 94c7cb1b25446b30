//! The request pipeline.
//!
//! Unwrap the envelope, validate, build the record, write it to the table,
//! archive it, then compose the response. Only validation failures
//! short-circuit; store failures are logged and reported in the body.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::Instrument;

use comentario_core::comment::{
    build_record, prepare_archive, unwrap_envelope, validate_fields, CommentRecord,
};
use comentario_core::response::ApiResponse;
use comentario_core::storage::{ArchiveReceipt, StoreError, TableReceipt, WriteOutcome};

use crate::state::AppState;

/// Lambda entry point: returns the API Gateway proxy response as JSON.
pub async fn function_handler(state: &AppState, event: LambdaEvent<Value>) -> Result<Value, Error> {
    let LambdaEvent { payload, context } = event;
    let span = tracing::info_span!("comentario", request_id = %context.request_id);

    let response = handle_event(state, payload).instrument(span).await?;

    Ok(serde_json::to_value(response)?)
}

/// Runs the pipeline on a raw inbound event.
pub async fn handle_event(state: &AppState, event: Value) -> anyhow::Result<ApiResponse> {
    tracing::debug!(event = %event, "Received event");

    let request = match unwrap_envelope(event).and_then(|payload| validate_fields(&payload)) {
        Ok(request) => request,
        Err(err) => {
            tracing::warn!(error = %err, details = err.details(), "Rejected request");
            return Ok(ApiResponse::rejected(&err)?);
        }
    };

    let record = build_record(request, state.ids.as_ref());

    let table = write_table(state, &record).await;
    let archive = write_archive(state, &record).await;

    Ok(ApiResponse::processed(&record, &table, &archive)?)
}

async fn write_table(state: &AppState, record: &CommentRecord) -> WriteOutcome<TableReceipt> {
    let result = state.table.put_comment(record).await;

    match &result {
        Ok(receipt) => tracing::info!(
            id = %record.id,
            tenant_id = %record.tenant_id,
            table = %receipt.table,
            request_id = receipt.request_id.as_deref(),
            "Stored comment in table"
        ),
        Err(err) => tracing::error!(
            id = %record.id,
            tenant_id = %record.tenant_id,
            error = %err,
            "Failed to write comment to table"
        ),
    }

    result.into()
}

async fn write_archive(state: &AppState, record: &CommentRecord) -> WriteOutcome<ArchiveReceipt> {
    let result = match prepare_archive(record, state.clock.now(), &state.stage) {
        Ok(object) => state.archive.put_archive(&object).await,
        Err(err) => Err(StoreError::from(err)),
    };

    match &result {
        Ok(receipt) => tracing::info!(
            id = %record.id,
            bucket = %receipt.bucket,
            key = %receipt.key,
            "Archived comment"
        ),
        Err(err) => tracing::error!(
            id = %record.id,
            error = %err,
            "Failed to archive comment"
        ),
    }

    result.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::json;
    use uuid::Uuid;

    use comentario_core::comment::{ArchiveObject, Clock, IdGenerator};
    use comentario_core::storage::{ArchiveStore, CommentTable, Result as StoreResult};

    use crate::storage::inmemory::{InMemoryArchiveStore, InMemoryCommentTable};

    // Mock table that tracks calls and optionally fails
    struct MockTable {
        calls: AtomicUsize,
        fail_with: Option<StoreError>,
    }

    impl MockTable {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_with: None,
            }
        }

        fn failing(error: StoreError) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_with: Some(error),
            }
        }
    }

    #[async_trait]
    impl CommentTable for MockTable {
        async fn put_comment(&self, _record: &CommentRecord) -> StoreResult<TableReceipt> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(TableReceipt {
                    table: "comentarios".to_string(),
                    request_id: Some("REQ1".to_string()),
                }),
            }
        }
    }

    // Mock archive that tracks calls and optionally fails
    struct MockArchive {
        calls: AtomicUsize,
        fail_with: Option<StoreError>,
    }

    impl MockArchive {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_with: None,
            }
        }

        fn failing(error: StoreError) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_with: Some(error),
            }
        }
    }

    #[async_trait]
    impl ArchiveStore for MockArchive {
        async fn put_archive(&self, object: &ArchiveObject) -> StoreResult<ArchiveReceipt> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(ArchiveReceipt {
                    bucket: "ingest".to_string(),
                    key: object.key.clone(),
                }),
            }
        }
    }

    struct SequentialIds(AtomicU64);

    impl IdGenerator for SequentialIds {
        fn generate(&self) -> Uuid {
            Uuid::from_u128(u128::from(self.0.fetch_add(1, Ordering::SeqCst)) + 1)
        }
    }

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 5).unwrap()
    }

    fn state_with(table: Arc<dyn CommentTable>, archive: Arc<dyn ArchiveStore>) -> AppState {
        AppState::new(table, archive, "test")
            .with_ids(Arc::new(SequentialIds(AtomicU64::new(0))))
            .with_clock(Arc::new(FixedClock(fixed_time())))
    }

    fn body_of(response: &ApiResponse) -> Value {
        serde_json::from_str(&response.body).unwrap()
    }

    fn valid_event() -> Value {
        json!({ "body": "{\"tenant_id\": \"tenant-1\", \"texto\": \"hola\"}" })
    }

    #[tokio::test]
    async fn test_valid_request_is_stored_and_archived() {
        let table = Arc::new(InMemoryCommentTable::new("comentarios"));
        let archive = Arc::new(InMemoryArchiveStore::new("ingest"));
        let state = state_with(table.clone(), archive.clone());

        let response = handle_event(&state, valid_event()).await.unwrap();
        let body = body_of(&response);

        assert_eq!(response.status_code, 200);
        assert_eq!(body["message"], "Comentario procesado");
        assert_eq!(body["comentario"]["tenant_id"], "tenant-1");
        assert_eq!(body["comentario"]["detalle"]["texto"], "hola");

        let id = Uuid::from_u128(1);
        assert_eq!(body["comentario"]["uuid"], id.to_string());
        assert_eq!(
            body["dynamo_response"],
            json!({ "table": "comentarios", "request_id": null })
        );

        let key = format!("20240615T103005_{id}.json");
        assert_eq!(body["s3_result"], json!({ "bucket": "ingest", "key": key }));

        let stored = table.get(&json!("tenant-1"), id).await.unwrap();
        assert_eq!(stored.detail.text, "hola");

        let object = archive.get(&key).await.unwrap();
        assert_eq!(object.content_type, "application/json");
        let archived: Value = serde_json::from_slice(&object.body).unwrap();
        assert_eq!(archived["_ingest_meta"]["stage"], "test");
        assert_eq!(
            archived["_ingest_meta"]["uploaded_at"],
            "2024-06-15T10:30:05.000000Z"
        );
    }

    #[tokio::test]
    async fn test_structured_body_and_bare_payload() {
        for event in [
            json!({ "body": { "tenant_id": "tenant-1", "texto": "hola" } }),
            json!({ "tenant_id": "tenant-1", "texto": "hola" }),
        ] {
            let state = state_with(Arc::new(MockTable::new()), Arc::new(MockArchive::new()));
            let response = handle_event(&state, event).await.unwrap();
            assert_eq!(response.status_code, 200);
            assert_eq!(body_of(&response)["comentario"]["tenant_id"], "tenant-1");
        }
    }

    #[tokio::test]
    async fn test_missing_fields_skip_both_stores() {
        for event in [
            json!({ "body": "{\"texto\": \"hola\"}" }),
            json!({ "body": "{\"tenant_id\": \"tenant-1\", \"texto\": null}" }),
            json!({ "tenant_id": "", "texto": "hola" }),
        ] {
            let table = Arc::new(MockTable::new());
            let archive = Arc::new(MockArchive::new());
            let state = state_with(table.clone(), archive.clone());

            let response = handle_event(&state, event).await.unwrap();

            assert_eq!(response.status_code, 400);
            assert_eq!(
                body_of(&response),
                json!({ "error": "Faltan campos tenant_id o texto" })
            );
            assert_eq!(table.calls.load(Ordering::SeqCst), 0);
            assert_eq!(archive.calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_truthy_non_string_fields_are_accepted() {
        let table = Arc::new(InMemoryCommentTable::new("comentarios"));
        let archive = Arc::new(InMemoryArchiveStore::new("ingest"));
        let state = state_with(table.clone(), archive.clone());

        let event = json!({ "body": "{\"tenant_id\": 7, \"texto\": \"hola\"}" });
        let response = handle_event(&state, event).await.unwrap();
        let body = body_of(&response);

        assert_eq!(response.status_code, 200);
        assert_eq!(body["comentario"]["tenant_id"], json!(7));

        let stored = table.get(&json!(7), Uuid::from_u128(1)).await.unwrap();
        assert_eq!(stored.tenant_id, json!(7));
        assert_eq!(archive.keys().await.len(), 1);
    }

    #[tokio::test]
    async fn test_falsy_fields_skip_both_stores() {
        for event in [
            json!({ "tenant_id": 0, "texto": "hola" }),
            json!({ "tenant_id": false, "texto": "hola" }),
            json!({ "tenant_id": "tenant-1", "texto": [] }),
        ] {
            let table = Arc::new(MockTable::new());
            let archive = Arc::new(MockArchive::new());
            let state = state_with(table.clone(), archive.clone());

            let response = handle_event(&state, event).await.unwrap();

            assert_eq!(response.status_code, 400);
            assert_eq!(table.calls.load(Ordering::SeqCst), 0);
            assert_eq!(archive.calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_malformed_body_skips_both_stores() {
        let table = Arc::new(MockTable::new());
        let archive = Arc::new(MockArchive::new());
        let state = state_with(table.clone(), archive.clone());

        let response = handle_event(&state, json!({ "body": "{not json" }))
            .await
            .unwrap();
        let body = body_of(&response);

        assert_eq!(response.status_code, 400);
        assert_eq!(body["error"], "body inválido");
        assert!(body["details"].as_str().is_some_and(|d| !d.is_empty()));
        assert_eq!(table.calls.load(Ordering::SeqCst), 0);
        assert_eq!(archive.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_table_failure_still_archives() {
        let table = Arc::new(MockTable::failing(StoreError::WriteFailed(
            "Throughput exceeded".to_string(),
        )));
        let archive = Arc::new(MockArchive::new());
        let state = state_with(table.clone(), archive.clone());

        let response = handle_event(&state, valid_event()).await.unwrap();
        let body = body_of(&response);

        assert_eq!(response.status_code, 200);
        assert_eq!(
            body["dynamo_response"],
            json!({ "error": "Write failed: Throughput exceeded" })
        );
        assert_eq!(body["s3_result"]["bucket"], "ingest");
        assert_eq!(table.calls.load(Ordering::SeqCst), 1);
        assert_eq!(archive.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_archive_failure_keeps_status_200() {
        let table = Arc::new(MockTable::new());
        let archive = Arc::new(MockArchive::failing(StoreError::ConnectionFailed(
            "dispatch failure".to_string(),
        )));
        let state = state_with(table, archive);

        let response = handle_event(&state, valid_event()).await.unwrap();
        let body = body_of(&response);

        assert_eq!(response.status_code, 200);
        assert_eq!(
            body["dynamo_response"],
            json!({ "table": "comentarios", "request_id": "REQ1" })
        );
        assert_eq!(
            body["s3_result"],
            json!({ "error": "Connection failed: dispatch failure" })
        );
    }

    #[tokio::test]
    async fn test_both_stores_failing_keeps_status_200() {
        let state = state_with(
            Arc::new(MockTable::failing(StoreError::WriteFailed(
                "Table not found".to_string(),
            ))),
            Arc::new(MockArchive::failing(StoreError::WriteFailed(
                "PutObject failed: NoSuchBucket: The specified bucket does not exist".to_string(),
            ))),
        );

        let response = handle_event(&state, valid_event()).await.unwrap();
        let body = body_of(&response);

        assert_eq!(response.status_code, 200);
        assert!(body["dynamo_response"]["error"].is_string());
        assert!(body["s3_result"]["error"].is_string());
        assert_eq!(body["comentario"]["detalle"]["texto"], "hola");
    }

    #[tokio::test]
    async fn test_archive_matches_table_record_with_non_ascii_text() {
        let table = Arc::new(InMemoryCommentTable::new("comentarios"));
        let archive = Arc::new(InMemoryArchiveStore::new("ingest"));
        let state = state_with(table.clone(), archive.clone());

        let event = json!({ "body": "{\"tenant_id\": \"tenant-ñ\", \"texto\": \"café ñ\"}" });
        let response = handle_event(&state, event).await.unwrap();

        assert!(response.body.contains("café ñ"));
        assert!(!response.body.contains("\\u"));

        let id = Uuid::from_u128(1);
        let stored = table.get(&json!("tenant-ñ"), id).await.unwrap();

        let keys = archive.keys().await;
        assert_eq!(keys.len(), 1);
        let object = archive.get(&keys[0]).await.unwrap();
        let text = String::from_utf8(object.body).unwrap();
        assert!(text.contains("café ñ"));
        assert!(!text.contains("\\u"));

        let mut archived: Value = serde_json::from_str(&text).unwrap();
        archived.as_object_mut().unwrap().remove("_ingest_meta");
        let archived: CommentRecord = serde_json::from_value(archived).unwrap();
        assert_eq!(archived, stored);
    }

    #[tokio::test]
    async fn test_ids_are_unique_across_invocations() {
        let state = AppState::new(
            Arc::new(MockTable::new()),
            Arc::new(MockArchive::new()),
            "test",
        );

        let mut ids = HashSet::new();
        for _ in 0..1000 {
            let response = handle_event(&state, valid_event()).await.unwrap();
            let body = body_of(&response);
            ids.insert(body["comentario"]["uuid"].as_str().unwrap().to_string());
        }

        assert_eq!(ids.len(), 1000);
    }

    #[tokio::test]
    async fn test_function_handler_returns_proxy_response() {
        let state = state_with(Arc::new(MockTable::new()), Arc::new(MockArchive::new()));
        let event = LambdaEvent::new(valid_event(), lambda_runtime::Context::default());

        let response = function_handler(&state, event).await.unwrap();

        assert_eq!(response["statusCode"], 200);
        let body: Value = serde_json::from_str(response["body"].as_str().unwrap()).unwrap();
        assert_eq!(body["comentario"]["tenant_id"], "tenant-1");
    }
}
