//! Notification Decoder
//!
//! Decodes raw queue messages into structured log notifications.
//! Expects the Solana `logsNotification` JSON-RPC envelope shape:
//! `params` → `result` → `value` → `{ signature, err, logs }`.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur during notification decoding
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Empty message payload")]
    EmptyInput,

    #[error("Notification missing params.result.value.logs")]
    MissingLogs,
}

/// Decoded log notification with extracted fields
///
/// A transient projection of the raw queue message; built once by
/// [`decode_notification`] and discarded after classification.
#[derive(Debug, Clone, PartialEq)]
pub struct LogsNotification {
    /// Transaction signature, if the envelope carried one
    pub signature: Option<String>,
    /// Transaction error value, `None` for successful transactions
    pub err: Option<serde_json::Value>,
    /// Execution log lines in emission order; may be empty
    pub logs: Vec<String>,
    /// Subscription id from the notification envelope
    pub subscription: Option<u64>,
}

impl LogsNotification {
    /// Check whether the underlying transaction succeeded
    pub fn is_success(&self) -> bool {
        self.err.is_none()
    }
}

// Wire-format envelope. Every level is optional so a structurally
// incomplete message parses and is rejected in one place.
#[derive(Debug, Deserialize)]
struct Envelope {
    params: Option<Params>,
}

#[derive(Debug, Deserialize)]
struct Params {
    result: Option<NotificationResult>,
    subscription: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct NotificationResult {
    value: Option<NotificationValue>,
}

#[derive(Debug, Deserialize)]
struct NotificationValue {
    signature: Option<String>,
    err: Option<serde_json::Value>,
    logs: Option<Vec<String>>,
}

/// Decode a raw queue message into a [`LogsNotification`]
///
/// # Arguments
/// * `raw` - The raw message bytes as popped from the queue
///
/// # Returns
/// A `LogsNotification` with all relevant fields extracted, or a
/// `DecodeError` if the payload is malformed or any structural field
/// along the `params.result.value.logs` path is absent. Decode failures
/// are never fatal to the caller and the message is not retried.
pub fn decode_notification(raw: &[u8]) -> Result<LogsNotification, DecodeError> {
    if raw.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    let envelope: Envelope = serde_json::from_slice(raw)?;

    let params = envelope.params.ok_or(DecodeError::MissingLogs)?;
    let subscription = params.subscription;
    let value = params
        .result
        .and_then(|r| r.value)
        .ok_or(DecodeError::MissingLogs)?;
    let logs = value.logs.ok_or(DecodeError::MissingLogs)?;

    Ok(LogsNotification {
        signature: value.signature,
        err: value.err,
        logs,
        subscription,
    })
}
