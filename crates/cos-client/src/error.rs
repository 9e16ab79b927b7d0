//! Client error types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ClientError>;

/// Envelope code for "the server answered but carried no data payload"
pub const NO_DATA_CODE: i64 = -1;

/// Client errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server-reported error, or a success envelope delivered with a non-200 status
    #[error("COS error (code: {code}): {message}")]
    Api { code: i64, message: String },

    /// Response envelope could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Token signing error
    #[error("Signing error: {0}")]
    Auth(#[from] cos_auth::AuthError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A file handle whose escaped name is empty
    #[error("Invalid file name: {0:?}")]
    InvalidName(String),

    /// The server answered a slice with a different session than the one in flight
    #[error("session corrupt: expected {expected:?}, got {actual:?}")]
    SessionCorrupt { expected: String, actual: String },

    /// Every byte was sent but the server never reported the file complete
    #[error("unexpected end of data at offset {offset} of {size}")]
    UnexpectedEof { offset: u64, size: u64 },

    /// The server asked to resume past the end of the file
    #[error("offset {offset} out of range for file of {size} bytes")]
    OffsetOutOfRange { offset: u64, size: u64 },
}

impl ClientError {
    /// The "no data" error raised when a result was requested but the envelope had none
    pub fn no_data() -> Self {
        Self::Api {
            code: NO_DATA_CODE,
            message: "no data".to_string(),
        }
    }

    /// Check if this is a server error with the given code
    pub fn is_api_error(&self, code: i64) -> bool {
        matches!(self, Self::Api { code: c, .. } if *c == code)
    }

    /// Whether a resumable upload that failed with this error may be continued
    /// with the session it was using
    pub fn is_resumable(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Api { .. } | Self::Json(_) | Self::UnexpectedEof { .. }
        )
    }
}

/// Failure of a resumable slice upload
///
/// Carries the session that is still safe to resume with, if any. Local I/O
/// failures before negotiation and session corruption leave it empty.
#[derive(Error, Debug)]
#[error("{source}")]
pub struct SliceUploadError {
    #[source]
    pub source: ClientError,
    pub session: Option<String>,
}

impl SliceUploadError {
    /// An error that cannot be resumed
    pub fn fatal(source: impl Into<ClientError>) -> Self {
        Self {
            source: source.into(),
            session: None,
        }
    }

    /// An error that may be resumed with `session`
    pub fn resumable(source: impl Into<ClientError>, session: &str) -> Self {
        Self {
            source: source.into(),
            session: (!session.is_empty()).then(|| session.to_string()),
        }
    }

    /// The session to pass back on the next attempt
    pub fn resume_session(&self) -> Option<&str> {
        self.session.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_error() {
        let err = ClientError::no_data();
        assert!(err.is_api_error(NO_DATA_CODE));
        assert_eq!(err.to_string(), "COS error (code: -1): no data");
    }

    #[test]
    fn test_resumable_classification() {
        assert!(ClientError::UnexpectedEof { offset: 4, size: 4 }.is_resumable());
        assert!(!ClientError::SessionCorrupt {
            expected: "a".into(),
            actual: "b".into(),
        }
        .is_resumable());
        assert!(!ClientError::OffsetOutOfRange {
            offset: 5,
            size: 4
        }
        .is_resumable());
        assert!(!ClientError::Io(std::io::Error::other("disk")).is_resumable());
    }

    #[test]
    fn test_slice_error_session() {
        let err = SliceUploadError::resumable(ClientError::no_data(), "sess");
        assert_eq!(err.resume_session(), Some("sess"));

        let err = SliceUploadError::resumable(ClientError::no_data(), "");
        assert_eq!(err.resume_session(), None);

        let err = SliceUploadError::fatal(std::io::Error::other("gone"));
        assert_eq!(err.resume_session(), None);
        assert!(matches!(err.source, ClientError::Io(_)));
    }
}
