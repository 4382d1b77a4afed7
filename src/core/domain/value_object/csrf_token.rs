use crate::core::domain::error::{AuthFormResult, ValidationError};
use reqwest::header::HeaderValue;

const MAX_TOKEN_LENGTH: usize = 512;

/// An anti-forgery token attached to state-changing requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    /// Creates a validated token.
    ///
    /// # Errors
    /// Returns `AuthFormError::Validation` if the token is empty, too long,
    /// or contains whitespace or control characters.
    pub fn new(value: impl Into<String>) -> AuthFormResult<Self> {
        let value = value.into();
        validate_csrf_token(&value)?;
        Ok(Self(value))
    }

    /// Returns the token value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the token into an HTTP header value, marked sensitive.
    pub(crate) fn header_value(&self) -> AuthFormResult<HeaderValue> {
        let mut value = HeaderValue::from_str(&self.0).map_err(|e| ValidationError::Field {
            field: "csrf_token".to_string(),
            message: format!("Token is not a valid header value: {}", e),
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

/// Validates the format of a CSRF token string.
pub(crate) fn validate_csrf_token(token: &str) -> Result<(), ValidationError> {
    if token.is_empty() {
        return Err(ValidationError::Field {
            field: "csrf_token".to_string(),
            message: "CSRF token cannot be empty".to_string(),
        });
    }
    if token.len() > MAX_TOKEN_LENGTH {
        return Err(ValidationError::Format(format!(
            "CSRF token cannot exceed {} characters",
            MAX_TOKEN_LENGTH
        )));
    }
    if token
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || !c.is_ascii())
    {
        return Err(ValidationError::Format(
            "CSRF token must be printable ASCII without whitespace".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_csrf_token_valid() {
        assert!(validate_csrf_token("IjY2ZDk4YzQ5.ZxYw.abc-123_").is_ok());
        assert!(validate_csrf_token("a").is_ok());
    }

    #[test]
    fn test_validate_csrf_token_invalid() {
        assert!(validate_csrf_token("").is_err());
        assert!(validate_csrf_token("has space").is_err());
        assert!(validate_csrf_token("line\nbreak").is_err());
        assert!(validate_csrf_token("naïve").is_err());
        assert!(validate_csrf_token(&"x".repeat(513)).is_err());
    }

    #[test]
    fn test_header_value_is_sensitive() {
        let token = CsrfToken::new("abc123").unwrap();
        let value = token.header_value().unwrap();
        assert!(value.is_sensitive());
        assert_eq!(value.to_str().unwrap(), "abc123");
    }
}
