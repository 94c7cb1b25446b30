use serde::{Deserialize, Serialize};

use crate::comment::{CommentRecord, RequestError};
use crate::storage::{ArchiveReceipt, TableReceipt, WriteOutcome};

use super::http_mapping::{request_error_to_status_code, PROCESSED_STATUS_CODE};

/// Message returned with every processed comment.
pub const PROCESSED_MESSAGE: &str = "Comentario procesado";

/// API Gateway proxy response.
///
/// `body` holds a JSON document serialized as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

/// Body of a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Body of a processed request.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedBody<'a> {
    pub message: &'static str,
    pub comentario: &'a CommentRecord,
    pub dynamo_response: &'a WriteOutcome<TableReceipt>,
    pub s3_result: &'a WriteOutcome<ArchiveReceipt>,
}

impl ApiResponse {
    /// Builds a response with `body` serialized as JSON.
    ///
    /// Non-ASCII text is kept as-is.
    pub fn json<T: Serialize>(status_code: u16, body: &T) -> serde_json::Result<Self> {
        Ok(Self {
            status_code,
            body: serde_json::to_string(body)?,
        })
    }

    /// Response for a request rejected before any write.
    pub fn rejected(error: &RequestError) -> serde_json::Result<Self> {
        let body = ErrorBody {
            error: error.to_string(),
            details: error.details().map(str::to_string),
        };
        Self::json(request_error_to_status_code(error), &body)
    }

    /// Response for a processed request.
    ///
    /// Always 200: store failures are reported inside the body.
    pub fn processed(
        record: &CommentRecord,
        table: &WriteOutcome<TableReceipt>,
        archive: &WriteOutcome<ArchiveReceipt>,
    ) -> serde_json::Result<Self> {
        let body = ProcessedBody {
            message: PROCESSED_MESSAGE,
            comentario: record,
            dynamo_response: table,
            s3_result: archive,
        };
        Self::json(PROCESSED_STATUS_CODE, &body)
    }
}
