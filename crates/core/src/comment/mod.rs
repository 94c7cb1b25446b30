mod error;
mod generators;
mod operations;
mod requests;
mod types;

pub use error::RequestError;
pub use generators::{Clock, IdGenerator, SystemClock, TimeUuidGenerator};
pub use operations::{
    archive_envelope, archive_key, build_record, prepare_archive, ArchiveObject,
    ARCHIVE_CONTENT_TYPE, ARCHIVE_KEY_TIMESTAMP_FORMAT,
};
pub use requests::{is_truthy, unwrap_envelope, validate_fields, TENANT_ID_FIELD, TEXT_FIELD};
pub use types::{
    ArchiveEnvelope, CommentDetail, CommentRecord, CommentRequest, IngestMeta, UPLOADED_AT_FORMAT,
};
