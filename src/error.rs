use thiserror::Error;

/// The single error kind surfaced by the client boundary.
///
/// Transport failures, non-2xx statuses, non-JSON bodies and application
/// error envelopes all collapse into this. The contract is "show the
/// message, abort the in-flight action": the API client has already raised
/// the host alert by the time a caller sees this value, so callers only
/// abandon whatever they were doing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct RequestFailed {
    pub message: String,
}

impl RequestFailed {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
