//! S3 error mapping.

use std::fmt::Debug;

use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::put_object::PutObjectError;
use comentario_core::storage::StoreError;

/// Map a PutObject SDK error to StoreError.
///
/// S3 reports most PutObject failures (`NoSuchBucket`, `AccessDenied`, ...)
/// through the error code rather than a modeled variant.
pub fn map_put_object_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutObjectError, R>,
) -> StoreError {
    if matches!(
        err,
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_)
    ) {
        return StoreError::ConnectionFailed(DisplayErrorContext(&err).to_string());
    }

    let err = err.into_service_error();
    StoreError::WriteFailed(format!(
        "PutObject failed: {}: {}",
        err.code().unwrap_or("Unknown"),
        err.message().unwrap_or_default()
    ))
}
