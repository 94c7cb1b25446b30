//! In-memory comment table.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use comentario_core::comment::CommentRecord;
use comentario_core::storage::{CommentTable, Result, TableReceipt};

/// In-memory comment table.
///
/// Uses a HashMap wrapped in `Arc<RwLock<_>>`, keyed like the DynamoDB table
/// by `(tenant_id, uuid)`. The tenant id is held as its JSON text, so `"7"`
/// and `7` are distinct tenants. A put on an existing key replaces the item.
#[derive(Debug, Clone)]
pub struct InMemoryCommentTable {
    table_name: String,
    items: Arc<RwLock<HashMap<(String, Uuid), CommentRecord>>>,
}

impl InMemoryCommentTable {
    /// Creates a new empty table.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            items: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Gets a record by its composite key.
    pub async fn get(&self, tenant_id: &Value, id: Uuid) -> Option<CommentRecord> {
        let items = self.items.read().await;
        items.get(&(tenant_id.to_string(), id)).cloned()
    }

    /// Number of stored records.
    pub async fn count(&self) -> usize {
        self.items.read().await.len()
    }
}

#[async_trait]
impl CommentTable for InMemoryCommentTable {
    async fn put_comment(&self, record: &CommentRecord) -> Result<TableReceipt> {
        let mut items = self.items.write().await;
        items.insert((record.tenant_id.to_string(), record.id), record.clone());

        Ok(TableReceipt {
            table: self.table_name.clone(),
            request_id: None,
        })
    }
}
