//! Unwrapping of the backend's JSON response envelope.
//!
//! Every JSON endpoint answers with `{"status": "ok", ...}` on success or
//! `{"status": "error", "error": "<message>"}` on an application-level
//! failure. Transport-level failures (non-2xx, non-JSON) are folded into the
//! same error type so the caller only ever sees one failure kind.

use serde_json::Value;
use thiserror::Error;

/// How much of a non-JSON error body is kept for the user-facing message.
const BODY_SNIPPET_LEN: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("HTTP {status}: {snippet}")]
    Http { status: u16, snippet: String },
    #[error("Invalid JSON response")]
    InvalidJson,
    #[error("{0}")]
    Application(String),
}

/// Validates the HTTP status and the `{status, error}` envelope, returning
/// the parsed response document on success.
pub fn unwrap_envelope(status_code: u16, body: &str) -> Result<Value, EnvelopeError> {
    if !(200..300).contains(&status_code) {
        return Err(EnvelopeError::Http {
            status: status_code,
            snippet: snippet(body),
        });
    }

    let doc: Value = serde_json::from_str(body).map_err(|_| EnvelopeError::InvalidJson)?;

    if doc.get("status").and_then(Value::as_str) == Some("error") {
        let message = doc
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error")
            .to_string();
        return Err(EnvelopeError::Application(message));
    }

    Ok(doc)
}

fn snippet(body: &str) -> String {
    if body.chars().count() <= BODY_SNIPPET_LEN {
        body.to_string()
    } else {
        body.chars().take(BODY_SNIPPET_LEN).collect()
    }
}
