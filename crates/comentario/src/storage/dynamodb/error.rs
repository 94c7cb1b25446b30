//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StoreError` from `comentario_core::storage`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use comentario_core::storage::StoreError;

/// Map a PutItem SDK error to StoreError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
) -> StoreError {
    if matches!(
        err,
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_)
    ) {
        return map_connection_error(DisplayErrorContext(&err));
    }

    match err.into_service_error() {
        PutItemError::ResourceNotFoundException(_) => {
            StoreError::WriteFailed("Table not found".to_string())
        }
        PutItemError::ProvisionedThroughputExceededException(_) => {
            StoreError::WriteFailed("Throughput exceeded".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            StoreError::WriteFailed("Request limit exceeded".to_string())
        }
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            StoreError::WriteFailed("Item collection size limit exceeded".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            StoreError::WriteFailed("Transaction conflict".to_string())
        }
        PutItemError::InternalServerError(_) => {
            StoreError::WriteFailed("DynamoDB internal server error".to_string())
        }
        err => StoreError::WriteFailed(format!(
            "PutItem failed: {}: {}",
            err.code().unwrap_or("Unknown"),
            err.message().unwrap_or_default()
        )),
    }
}

/// Map a generic connection/config error to StoreError.
pub fn map_connection_error(err: impl std::fmt::Display) -> StoreError {
    StoreError::ConnectionFailed(err.to_string())
}
