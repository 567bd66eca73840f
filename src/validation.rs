//! Pre-flight argument checks and interpretation of remote failure messages.

use crate::errors::ScreeningError;
use crate::models::ScreeningResult;

/// Message returned when a convenience operation is called with an empty argument.
pub const REQUIRED_ARGUMENTS_MESSAGE: &str = "all arguments are required to have a non-empty value";

/// Marker the service puts in the error text when the issuing state has no DLV coverage yet.
const UNSUPPORTED_STATE_MARKER: &str = "is not yet supported";

/// Used when the service reports a failure but leaves `error` empty.
const MISSING_ERROR_MESSAGE: &str = "screening service reported failure without an error message";

/// Fails with a validation error if any argument is empty.
pub fn require_non_empty(args: &[&str]) -> Result<(), ScreeningError> {
    if args.iter().any(|arg| arg.is_empty()) {
        return Err(ScreeningError::Validation(
            REQUIRED_ARGUMENTS_MESSAGE.to_string(),
        ));
    }
    Ok(())
}

/// Whether a remote error message says the requested state is not supported yet.
///
/// The service exposes no error code for this, so the check is a substring match.
pub fn is_unsupported_state_error(message: &str) -> bool {
    message.contains(UNSUPPORTED_STATE_MARKER)
}

/// Turns a non-success result into a `ScreeningError::Remote`.
pub fn remote_failure(result: &ScreeningResult) -> Option<ScreeningError> {
    if result.success {
        return None;
    }
    let message = result
        .error
        .as_deref()
        .filter(|msg| !msg.is_empty())
        .unwrap_or(MISSING_ERROR_MESSAGE);
    Some(ScreeningError::Remote(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty(&["CA", "D1234567", "Jane", "Doe"]).is_ok());
        assert!(require_non_empty(&[]).is_ok());

        match require_non_empty(&["CA", "", "Jane", "Doe"]) {
            Err(ScreeningError::Validation(msg)) => assert_eq!(msg, REQUIRED_ARGUMENTS_MESSAGE),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_whitespace_is_not_empty() {
        // Only literally empty strings are rejected; the service judges the rest.
        assert!(require_non_empty(&[" "]).is_ok());
    }

    #[test]
    fn test_unsupported_state_predicate() {
        assert!(is_unsupported_state_error("CA is not yet supported"));
        assert!(is_unsupported_state_error(
            "State WY is not yet supported by DLDV"
        ));
        assert!(!is_unsupported_state_error("invalid license"));
        assert!(!is_unsupported_state_error("Is Not Yet Supported"));
        assert!(!is_unsupported_state_error(""));
    }

    #[test]
    fn test_remote_failure() {
        let ok = ScreeningResult {
            success: true,
            error: Some("ignored".to_string()),
            ..Default::default()
        };
        assert!(remote_failure(&ok).is_none());

        let failed = ScreeningResult {
            success: false,
            error: Some("invalid license".to_string()),
            ..Default::default()
        };
        let err = remote_failure(&failed).unwrap();
        assert_eq!(err.remote_message(), Some("invalid license"));

        let silent = ScreeningResult::default();
        let err = remote_failure(&silent).unwrap();
        assert_eq!(err.remote_message(), Some(MISSING_ERROR_MESSAGE));
    }
}
