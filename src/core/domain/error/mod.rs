use thiserror::Error;

/// The main error type for auth form operations.
///
/// A server that answers with a readable message is not an error: it is
/// reported as [`SubmitOutcome::Rejected`](crate::SubmitOutcome::Rejected).
/// This enum covers everything that prevents such an answer from existing.
#[derive(Error, Debug)]
pub enum AuthFormError {
    /// The request never produced a response (DNS, TLS, refused, timeout)
    ///
    /// # Fields
    /// * `0` - A description of what went wrong while sending the request
    #[error("Connection error: {0}")]
    Connection(String),

    /// Represents validation failures of configuration or form input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The server answered, but the body does not honour the response contract
    ///
    /// # Fields
    /// * `status` - The HTTP status code of the response
    /// * `reason` - Why the body could not be used
    #[error("Malformed response ({status}): {reason}")]
    MalformedResponse { status: u16, reason: String },

    /// The controller could not be assembled from the given settings
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Type alias for Results that may fail with an AuthFormError
pub type AuthFormResult<T> = Result<T, AuthFormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_converts() {
        let err: AuthFormError = ValidationError::Format("bad".to_string()).into();
        assert!(matches!(err, AuthFormError::Validation(ValidationError::Format(_))));
        assert_eq!(err.to_string(), "Validation error: Format error: bad");
    }

    #[test]
    fn test_malformed_response_display() {
        let err = AuthFormError::MalformedResponse {
            status: 500,
            reason: "response carries no messages".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed response (500): response carries no messages"
        );
    }
}
