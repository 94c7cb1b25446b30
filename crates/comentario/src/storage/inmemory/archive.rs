//! In-memory archive store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use comentario_core::comment::ArchiveObject;
use comentario_core::storage::{ArchiveReceipt, ArchiveStore, Result};

/// An object held by [`InMemoryArchiveStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: String,
}

/// In-memory archive store keyed by object key.
#[derive(Debug, Clone)]
pub struct InMemoryArchiveStore {
    bucket: String,
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
}

impl InMemoryArchiveStore {
    /// Creates a new empty store.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Gets an object by key.
    pub async fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }

    /// Lists the stored keys in ascending order.
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl ArchiveStore for InMemoryArchiveStore {
    async fn put_archive(&self, object: &ArchiveObject) -> Result<ArchiveReceipt> {
        let mut objects = self.objects.write().await;
        objects.insert(
            object.key.clone(),
            StoredObject {
                body: object.body.clone(),
                content_type: object.content_type.to_string(),
            },
        );

        Ok(ArchiveReceipt {
            bucket: self.bucket.clone(),
            key: object.key.clone(),
        })
    }
}
