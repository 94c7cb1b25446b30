//! Inbound request handling: envelope unwrapping and field validation.
//!
//! Following the Functional Core pattern, these are pure functions with no I/O.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{Map, Value};

use super::error::RequestError;
use super::types::CommentRequest;

/// Key holding the forwarded body in an API Gateway proxy event.
pub const BODY_KEY: &str = "body";
/// Flag set by API Gateway when `body` is base64 encoded.
pub const BASE64_FLAG_KEY: &str = "isBase64Encoded";
pub const TENANT_ID_FIELD: &str = "tenant_id";
pub const TEXT_FIELD: &str = "texto";

/// Extracts the JSON payload from an inbound event.
///
/// - A string `body` is parsed as JSON (base64-decoded first when
///   `isBase64Encoded` is `true`).
/// - Any other `body` value is used as-is.
/// - Without a `body` key the whole event is the payload.
///
/// The payload must be a JSON object.
///
/// # Examples
///
/// ```
/// use comentario_core::comment::unwrap_envelope;
/// use serde_json::json;
///
/// let event = json!({ "body": "{\"tenant_id\": \"t1\", \"texto\": \"hola\"}" });
/// let payload = unwrap_envelope(event).unwrap();
/// assert_eq!(payload["tenant_id"], "t1");
/// ```
pub fn unwrap_envelope(event: Value) -> Result<Map<String, Value>, RequestError> {
    let payload = match event {
        Value::Object(mut envelope) if envelope.contains_key(BODY_KEY) => {
            let base64_encoded = envelope
                .get(BASE64_FLAG_KEY)
                .and_then(Value::as_bool)
                .unwrap_or(false);

            match envelope.remove(BODY_KEY) {
                Some(Value::String(body)) if base64_encoded => parse_base64_body(&body)?,
                Some(Value::String(body)) => parse_body(&body)?,
                Some(body) => body,
                None => Value::Null,
            }
        }
        other => other,
    };

    match payload {
        Value::Object(map) => Ok(map),
        _ => Err(RequestError::malformed("payload must be a JSON object")),
    }
}

fn parse_body(body: &str) -> Result<Value, RequestError> {
    serde_json::from_str(body).map_err(RequestError::malformed)
}

fn parse_base64_body(body: &str) -> Result<Value, RequestError> {
    let bytes = STANDARD.decode(body).map_err(RequestError::malformed)?;
    let text = String::from_utf8(bytes).map_err(RequestError::malformed)?;
    parse_body(&text)
}

/// Checks that `tenant_id` and `texto` are present and truthy.
///
/// Returns the values unchanged, whatever their JSON type.
pub fn validate_fields(payload: &Map<String, Value>) -> Result<CommentRequest, RequestError> {
    let tenant_id = required_field(payload, TENANT_ID_FIELD);
    let text = required_field(payload, TEXT_FIELD);

    match (tenant_id, text) {
        (Some(tenant_id), Some(text)) => Ok(CommentRequest {
            tenant_id: tenant_id.clone(),
            text: text.clone(),
        }),
        _ => Err(RequestError::MissingFields),
    }
}

fn required_field<'a>(payload: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    payload.get(field).filter(|value| is_truthy(value))
}

/// Returns `false` for `null`, `false`, zero, `""`, `[]` and `{}`.
///
/// # Examples
///
/// ```
/// use comentario_core::comment::is_truthy;
/// use serde_json::json;
///
/// assert!(is_truthy(&json!(7)));
/// assert!(!is_truthy(&json!([])));
/// ```
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
