//! Pure functions for mapping request errors to HTTP status codes.

use crate::comment::RequestError;

/// Status code of a fully processed request, whatever the store outcomes.
pub const PROCESSED_STATUS_CODE: u16 = 200;

/// Maps a [`RequestError`] to an HTTP status code.
///
/// - `MalformedRequest` -> 400 (Bad Request)
/// - `MissingFields` -> 400 (Bad Request)
///
/// # Examples
///
/// ```
/// use comentario_core::comment::RequestError;
/// use comentario_core::response::request_error_to_status_code;
///
/// assert_eq!(request_error_to_status_code(&RequestError::MissingFields), 400);
/// ```
pub fn request_error_to_status_code(error: &RequestError) -> u16 {
    match error {
        RequestError::MalformedRequest(_) => 400,
        RequestError::MissingFields => 400,
    }
}
