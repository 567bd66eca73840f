use std::fmt;

/// Error types surfaced by the screening client.
#[derive(Debug)]
pub enum ScreeningError {
    /// Invalid client configuration (empty token, bad endpoint, transport build failure).
    Config(String),
    /// A required argument of a convenience operation was empty.
    Validation(String),
    /// The HTTP call could not complete (DNS, TCP, TLS, timeout, body read).
    Transport(reqwest::Error),
    /// The response body was not a JSON array of results. Only returned in strict mode.
    Parse {
        /// HTTP status the service answered with.
        status: u16,
        /// The underlying decoding error.
        source: serde_json::Error,
    },
    /// A single-result operation received an empty result sequence.
    EmptyResponse,
    /// The service reported a failure for the requested screening.
    ///
    /// `Display` adds a prefix; use [`ScreeningError::remote_message`] for the
    /// exact text the service returned.
    Remote(String),
}

impl fmt::Display for ScreeningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreeningError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ScreeningError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ScreeningError::Transport(e) => write!(f, "Screening request failed: {}", e),
            ScreeningError::Parse { status, source } => write!(
                f,
                "Failed to parse screening response (HTTP {}): {}",
                status, source
            ),
            ScreeningError::EmptyResponse => {
                write!(f, "Screening service returned no results")
            }
            ScreeningError::Remote(msg) => write!(f, "Screening service error: {}", msg),
        }
    }
}

impl std::error::Error for ScreeningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScreeningError::Transport(e) => Some(e),
            ScreeningError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ScreeningError {
    /// Converts a `reqwest::Error` into a `ScreeningError`.
    fn from(err: reqwest::Error) -> Self {
        ScreeningError::Transport(err)
    }
}

impl ScreeningError {
    /// The message reported by the remote service, if this is a remote failure.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            ScreeningError::Remote(msg) => Some(msg),
            _ => None,
        }
    }

    /// Whether the error was raised locally before any network call was made.
    pub fn is_validation(&self) -> bool {
        matches!(self, ScreeningError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keeps_remote_message() {
        let err = ScreeningError::Remote("invalid license".to_string());
        assert_eq!(err.to_string(), "Screening service error: invalid license");
        assert_eq!(err.remote_message(), Some("invalid license"));
    }

    #[test]
    fn test_parse_error_exposes_source() {
        let source = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = ScreeningError::Parse {
            status: 502,
            source,
        };
        assert!(err.to_string().contains("HTTP 502"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_validation_flag() {
        let err = ScreeningError::Validation("missing".to_string());
        assert!(err.is_validation());
        assert_eq!(err.remote_message(), None);
    }
}
