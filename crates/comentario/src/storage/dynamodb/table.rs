//! DynamoDB comment table.

use async_trait::async_trait;
use aws_sdk_dynamodb::operation::RequestId;
use aws_sdk_dynamodb::Client;

use comentario_core::comment::CommentRecord;
use comentario_core::storage::{CommentTable, Result, TableReceipt};

use super::conversions::record_to_item;
use super::error::map_put_item_error;

/// DynamoDB-backed comment table.
///
/// Items are keyed by `tenant_id` (partition) and `uuid` (sort).
pub struct DynamoDbCommentTable {
    client: Client,
    table_name: String,
}

impl DynamoDbCommentTable {
    /// Creates a new table with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl CommentTable for DynamoDbCommentTable {
    async fn put_comment(&self, record: &CommentRecord) -> Result<TableReceipt> {
        let output = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record_to_item(record)))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(TableReceipt {
            table: self.table_name.clone(),
            request_id: output.request_id().map(str::to_string),
        })
    }
}
