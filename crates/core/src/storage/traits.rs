use async_trait::async_trait;

use crate::comment::{ArchiveObject, CommentRecord};

use super::{ArchiveReceipt, Result, TableReceipt};

/// Key-value table holding comment records.
#[async_trait]
pub trait CommentTable: Send + Sync {
    /// Puts the record as a single item, keyed by `tenant_id` and `uuid`.
    async fn put_comment(&self, record: &CommentRecord) -> Result<TableReceipt>;
}

/// Object store receiving archived comment envelopes.
#[async_trait]
pub trait ArchiveStore: Send + Sync {
    /// Puts a serialized envelope under its key.
    async fn put_archive(&self, object: &ArchiveObject) -> Result<ArchiveReceipt>;
}
