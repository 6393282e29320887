use thiserror::Error;

/// Main error type for TripIt API operations
#[derive(Debug, Error)]
pub enum TripitError {
    /// Network or connection failure while talking to the API
    #[error("transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Response body was declared as JSON but did not parse
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response body was declared as XML but did not parse
    #[error("XML parse error: {0}")]
    Xml(String),

    /// Malformed command name or invalid credential setup
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl TripitError {
    /// Create a new transport error
    pub fn transport(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        TripitError::Transport {
            message: message.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        TripitError::Configuration(message.into())
    }

    /// Check if the response body could not be decoded
    pub fn is_parse_error(&self) -> bool {
        matches!(self, TripitError::Json(_) | TripitError::Xml(_))
    }

    /// Check if this error was raised before any request was sent
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, TripitError::Configuration(_))
    }

    /// Check if this is a network level failure
    pub fn is_transport_error(&self) -> bool {
        matches!(self, TripitError::Transport { .. })
    }
}

impl From<reqwest::Error> for TripitError {
    fn from(err: reqwest::Error) -> Self {
        TripitError::transport(err.to_string(), Some(Box::new(err)))
    }
}

/// Result type for TripIt operations
pub type Result<T> = std::result::Result<T, TripitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let err = TripitError::Xml("unexpected end of document".to_string());
        assert!(err.is_parse_error());
        assert!(!err.is_configuration_error());

        let err = TripitError::configuration("unknown verb: fetch");
        assert!(err.is_configuration_error());
        assert_eq!(err.to_string(), "configuration error: unknown verb: fetch");
    }

    #[test]
    fn test_json_error_is_parse_error() {
        let err: TripitError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_transport_error_keeps_source() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = TripitError::transport("connection failed", Some(Box::new(io)));
        assert!(err.is_transport_error());
        assert!(err.source().is_some());
    }
}
