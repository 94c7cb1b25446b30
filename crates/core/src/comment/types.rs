use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Format used for `_ingest_meta.uploaded_at`.
pub const UPLOADED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// A validated comment submission.
///
/// Values are kept exactly as submitted, JSON type included, without trimming
/// or normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRequest {
    pub tenant_id: Value,
    pub text: Value,
}

/// Free-form content of a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDetail {
    #[serde(rename = "texto")]
    pub text: Value,
}

/// The canonical comment record written to both stores.
///
/// The table item is keyed by `tenant_id` and `uuid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub tenant_id: Value,
    #[serde(rename = "uuid")]
    pub id: Uuid,
    #[serde(rename = "detalle")]
    pub detail: CommentDetail,
}

impl CommentRecord {
    /// Builds a record from a validated request and a freshly generated id.
    pub fn new(request: CommentRequest, id: Uuid) -> Self {
        Self {
            tenant_id: request.tenant_id,
            id,
            detail: CommentDetail { text: request.text },
        }
    }
}

/// Ingestion metadata attached to archived records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestMeta {
    pub uploaded_at: String,
    pub stage: String,
}

impl IngestMeta {
    pub fn new(uploaded_at: DateTime<Utc>, stage: impl Into<String>) -> Self {
        Self {
            uploaded_at: uploaded_at.format(UPLOADED_AT_FORMAT).to_string(),
            stage: stage.into(),
        }
    }
}

/// A comment record plus its `_ingest_meta` block, as written to the archive.
///
/// Borrows the record so the archived fields are the exact ones sent to the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveEnvelope<'a> {
    #[serde(flatten)]
    pub record: &'a CommentRecord,
    #[serde(rename = "_ingest_meta")]
    pub ingest_meta: IngestMeta,
}
