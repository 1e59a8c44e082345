//! Error types for heliograph.

use thiserror::Error;

/// Result type alias using heliograph's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for notification handling.
///
/// Only two variants are allowed to fail an inbound webhook request:
/// [`Error::Unauthorized`] (credential resolution failed) and
/// [`Error::InsertFailed`] (the timeline write itself errored). Everything
/// else is absorbed inside the handlers as a logged degradation.
#[derive(Error, Debug)]
pub enum Error {
    /// Credential resolution failed for the user token in the payload
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Inbound payload is missing or has unexpected fields
    #[error("Malformed notification: {0}")]
    MalformedNotification(String),

    /// Third-party content fetch returned an error or non-200
    #[error("Upstream fetch failed: {0}")]
    UpstreamFetch(String),

    /// Attachment content fetch returned a non-200 status
    #[error("Attachment unavailable: upstream returned {status}")]
    AttachmentUnavailable { status: u16 },

    /// The timeline insert call itself errored
    #[error("Insert failed: {0}")]
    InsertFailed(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

impl Error {
    /// True if this error must fail the whole webhook request.
    ///
    /// Webhook senders retry on failure responses, so only errors a retry
    /// could plausibly help with (or that represent a real downstream outage
    /// worth signaling) are surfaced; the rest degrade to a logged no-op.
    pub fn is_request_fatal(&self) -> bool {
        matches!(self, Error::Unauthorized(_) | Error::InsertFailed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unauthorized() {
        let err = Error::Unauthorized("no credentials for token u1".to_string());
        assert_eq!(err.to_string(), "Unauthorized: no credentials for token u1");
    }

    #[test]
    fn test_error_display_malformed() {
        let err = Error::MalformedNotification("missing itemId".to_string());
        assert_eq!(err.to_string(), "Malformed notification: missing itemId");
    }

    #[test]
    fn test_error_display_upstream_fetch() {
        let err = Error::UpstreamFetch("events feed returned 503".to_string());
        assert_eq!(err.to_string(), "Upstream fetch failed: events feed returned 503");
    }

    #[test]
    fn test_error_display_attachment_unavailable() {
        let err = Error::AttachmentUnavailable { status: 404 };
        assert_eq!(err.to_string(), "Attachment unavailable: upstream returned 404");
    }

    #[test]
    fn test_error_display_insert_failed() {
        let err = Error::InsertFailed("timeline returned 500".to_string());
        assert_eq!(err.to_string(), "Insert failed: timeline returned 500");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>(r#"{"invalid": json}"#);
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        assert!(err.to_string().contains("Serialization error:"));
    }

    #[test]
    fn test_request_fatal_classification() {
        assert!(Error::Unauthorized("x".into()).is_request_fatal());
        assert!(Error::InsertFailed("x".into()).is_request_fatal());
        assert!(!Error::MalformedNotification("x".into()).is_request_fatal());
        assert!(!Error::UpstreamFetch("x".into()).is_request_fatal());
        assert!(!Error::AttachmentUnavailable { status: 500 }.is_request_fatal());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
