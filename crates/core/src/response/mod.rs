mod http_mapping;
mod types;

pub use http_mapping::{request_error_to_status_code, PROCESSED_STATUS_CODE};
pub use types::{ApiResponse, ErrorBody, ProcessedBody, PROCESSED_MESSAGE};
