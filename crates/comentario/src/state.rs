//! Process-wide handler state.
//!
//! Built once at start-up and shared, read-only, by every invocation. Store
//! backends and generators are trait objects so tests can swap them out.

use std::sync::Arc;

use comentario_core::comment::{Clock, IdGenerator, SystemClock, TimeUuidGenerator};
use comentario_core::storage::{ArchiveStore, CommentTable};

use crate::config::Config;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    /// Table receiving comment records.
    pub table: Arc<dyn CommentTable>,
    /// Object store receiving archived envelopes.
    pub archive: Arc<dyn ArchiveStore>,
    /// Source of record identifiers.
    pub ids: Arc<dyn IdGenerator>,
    /// Source of archive timestamps.
    pub clock: Arc<dyn Clock>,
    /// Deployment stage label written to `_ingest_meta.stage`.
    pub stage: Arc<str>,
}

impl AppState {
    /// Creates a state with version-1 UUIDs and the system clock.
    pub fn new(
        table: Arc<dyn CommentTable>,
        archive: Arc<dyn ArchiveStore>,
        stage: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            table,
            archive,
            ids: Arc::new(TimeUuidGenerator::default()),
            clock: Arc::new(SystemClock),
            stage: stage.into(),
        }
    }

    /// Replaces the identifier generator.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Replaces the clock.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Creates the state for the DynamoDB and S3 backends.
    ///
    /// Uses the AWS SDK default credential chain; both clients share one
    /// SDK configuration.
    #[cfg(feature = "aws")]
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        use crate::storage::{dynamodb::DynamoDbCommentTable, s3::S3ArchiveStore};

        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

        let table = DynamoDbCommentTable::new(
            aws_sdk_dynamodb::Client::new(&sdk_config),
            config.table_name.clone(),
        );
        let archive = S3ArchiveStore::new(
            aws_sdk_s3::Client::new(&sdk_config),
            config.ingest_bucket.clone(),
        );

        tracing::info!(
            table = table.table_name(),
            bucket = archive.bucket(),
            stage = %config.stage,
            "Initialized AWS stores"
        );

        Ok(Self::new(
            Arc::new(table),
            Arc::new(archive),
            config.stage.as_str(),
        ))
    }

    /// Creates the state for the in-memory backends.
    #[cfg(feature = "inmemory")]
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        use crate::storage::inmemory::{InMemoryArchiveStore, InMemoryCommentTable};

        tracing::info!(
            table = %config.table_name,
            bucket = %config.ingest_bucket,
            stage = %config.stage,
            "Initialized in-memory stores"
        );

        Ok(Self::new(
            Arc::new(InMemoryCommentTable::new(config.table_name.clone())),
            Arc::new(InMemoryArchiveStore::new(config.ingest_bucket.clone())),
            config.stage.as_str(),
        ))
    }
}
