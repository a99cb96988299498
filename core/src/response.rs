//! Response processor: turns a transport outcome into a `CfsslError` result.
//!
//! Every reply from the CA is wrapped in an envelope:
//!
//! ```json
//! {"success": true, "result": {...}, "errors": [], "messages": []}
//! {"success": false, "result": null, "errors": [{"code": 1000, "message": "..."}]}
//! ```
//!
//! Classification is one-shot and never retries.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{CfsslError, TransportError};

/// The response envelope. `errors` entries must carry a `message`; any other
/// top-level field (such as `messages`) is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub success: bool,
    /// `None` when the field is absent, `Some(Value::Null)` for an explicit null.
    #[serde(default, deserialize_with = "present")]
    pub result: Option<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub errors: Vec<ServiceMessage>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServiceMessage {
    /// Only integer codes are kept.
    #[serde(default, deserialize_with = "integer_code")]
    pub code: Option<i64>,
    pub message: String,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn integer_code<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Value::deserialize(deserializer).map(|code| code.as_i64())
}

/// Decode a raw body into an envelope.
pub fn parse_envelope(body: &str) -> Result<Envelope, CfsslError> {
    if body.trim().is_empty() {
        return Err(CfsslError::EmptyResponse);
    }
    serde_json::from_str(body).map_err(|e| CfsslError::InvalidResponse(e.to_string()))
}

/// Error for a `success: false` envelope: the first reported error, if any.
pub fn extract_error(envelope: &Envelope) -> CfsslError {
    match envelope.errors.first() {
        Some(first) => CfsslError::Service {
            code: first.code,
            message: first.message.clone(),
        },
        None => CfsslError::GenericError,
    }
}

fn checked(raw: Result<String, TransportError>) -> Result<Envelope, CfsslError> {
    let body = raw?;
    let envelope = parse_envelope(&body).inspect_err(|e| {
        tracing::warn!(error = %e, "unreadable response from CA");
    })?;
    if !envelope.success {
        let err = extract_error(&envelope);
        tracing::warn!(error = %err, "CA reported failure");
        return Err(err);
    }
    Ok(envelope)
}

/// Process a reply that must carry a `result` payload.
///
/// An explicit `null` result is returned as `Value::Null`; a successful
/// envelope without any `result` field is rejected as `InvalidResponse`.
pub fn process(raw: Result<String, TransportError>) -> Result<Value, CfsslError> {
    let envelope = checked(raw)?;
    match envelope.result {
        None => Err(CfsslError::InvalidResponse(
            "successful response without a result".to_string(),
        )),
        Some(result) => {
            tracing::debug!("CA request succeeded");
            Ok(result)
        }
    }
}

/// Process a reply whose payload is irrelevant; only success matters.
pub fn process_ack(raw: Result<String, TransportError>) -> Result<(), CfsslError> {
    checked(raw).map(|_| ())
}
