/*
[INPUT]:  Error sources (transport, JSON decode, token verification, config)
[OUTPUT]: Structured error types with context for the entire crate
[POS]:    Error handling layer - unified error types
[UPDATE]: When adding new error sources or improving error messages
*/

use thiserror::Error;

/// Main error type for the Stream feeds client
#[derive(Error, Debug)]
pub enum StreamError {
    /// Required configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP transport failed; carries the transport failure unchanged
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body is not valid JSON
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Scope token failed signature verification or is malformed
    #[error("Token verification failed: {0}")]
    SignatureVerification(#[from] jsonwebtoken::errors::Error),

    /// URL construction failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Request carries material that cannot go on the wire
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl StreamError {
    /// Check if the error is worth retrying at the caller's discretion
    ///
    /// Retry policy itself lives with the caller; this layer never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StreamError::Transport(_))
    }

    /// Check if the error came from token verification
    pub fn is_auth_error(&self) -> bool {
        matches!(self, StreamError::SignatureVerification(_))
    }
}

/// Result type alias for Stream client operations
pub type Result<T> = std::result::Result<T, StreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_is_not_retryable() {
        let err = StreamError::Config("missing api_key".to_string());
        assert!(!err.is_retryable());
        assert!(!err.is_auth_error());
    }

    #[test]
    fn test_decode_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = StreamError::from(json_err);
        assert!(matches!(err, StreamError::Decode(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_verification_error_is_auth_error() {
        let jwt_err = jsonwebtoken::errors::Error::from(
            jsonwebtoken::errors::ErrorKind::InvalidSignature,
        );
        let err = StreamError::from(jwt_err);
        assert!(err.is_auth_error());
        assert!(!err.is_retryable());
    }
}
