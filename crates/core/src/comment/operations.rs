use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::generators::IdGenerator;
use super::types::{ArchiveEnvelope, CommentRecord, CommentRequest, IngestMeta};

/// Content type declared for archived objects.
pub const ARCHIVE_CONTENT_TYPE: &str = "application/json";

/// Compact timestamp used as the archive key prefix.
pub const ARCHIVE_KEY_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// A serialized archive envelope ready to be put in the object store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveObject {
    pub key: String,
    pub body: Vec<u8>,
    pub content_type: &'static str,
}

/// Builds a comment record with a fresh identifier.
pub fn build_record(request: CommentRequest, ids: &dyn IdGenerator) -> CommentRecord {
    CommentRecord::new(request, ids.generate())
}

/// Derives the object key for an archived record.
///
/// Pattern: `<YYYYMMDDTHHMMSS>_<uuid>.json`
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use comentario_core::comment::archive_key;
/// use uuid::Uuid;
///
/// let at = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 5).unwrap();
/// let id = Uuid::parse_str("6ba7b810-9dad-11d1-80b4-00c04fd430c8").unwrap();
/// assert_eq!(
///     archive_key(at, id),
///     "20240615T103005_6ba7b810-9dad-11d1-80b4-00c04fd430c8.json"
/// );
/// ```
pub fn archive_key(at: DateTime<Utc>, id: Uuid) -> String {
    format!("{}_{id}.json", at.format(ARCHIVE_KEY_TIMESTAMP_FORMAT))
}

/// Wraps a record with its ingestion metadata.
pub fn archive_envelope<'a>(
    record: &'a CommentRecord,
    at: DateTime<Utc>,
    stage: &str,
) -> ArchiveEnvelope<'a> {
    ArchiveEnvelope {
        record,
        ingest_meta: IngestMeta::new(at, stage),
    }
}

/// Serializes the archive envelope for `record` as UTF-8 JSON.
///
/// Non-ASCII text is written as-is, never as `\u` escapes. The same instant
/// `at` is used for `uploaded_at` and for the key prefix.
pub fn prepare_archive(
    record: &CommentRecord,
    at: DateTime<Utc>,
    stage: &str,
) -> Result<ArchiveObject, serde_json::Error> {
    let body = serde_json::to_vec(&archive_envelope(record, at, stage))?;

    Ok(ArchiveObject {
        key: archive_key(at, record.id),
        body,
        content_type: ARCHIVE_CONTENT_TYPE,
    })
}
