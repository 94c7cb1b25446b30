//! DynamoDB table backend.
//!
//! Implements [`CommentTable`](comentario_core::storage::CommentTable) using
//! `aws-sdk-dynamodb`.

mod conversions;
mod error;
mod table;

pub use table::DynamoDbCommentTable;
