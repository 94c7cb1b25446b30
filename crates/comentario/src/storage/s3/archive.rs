use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use comentario_core::comment::ArchiveObject;
use comentario_core::storage::{ArchiveReceipt, ArchiveStore, Result};

use super::error::map_put_object_error;

/// S3-backed archive of comment envelopes.
pub struct S3ArchiveStore {
    client: Client,
    bucket: String,
}

impl S3ArchiveStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ArchiveStore for S3ArchiveStore {
    async fn put_archive(&self, object: &ArchiveObject) -> Result<ArchiveReceipt> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&object.key)
            .body(ByteStream::from(object.body.clone()))
            .content_type(object.content_type)
            .send()
            .await
            .map_err(map_put_object_error)?;

        Ok(ArchiveReceipt {
            bucket: self.bucket.clone(),
            key: object.key.clone(),
        })
    }
}
