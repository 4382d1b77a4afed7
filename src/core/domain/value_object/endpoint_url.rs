use crate::core::domain::error::{AuthFormResult, ValidationError};
use std::fmt;
use url::Url;

const ALLOWED_SCHEMES: [&str; 2] = ["https", "http"];
const MAX_URL_LENGTH: usize = 2083;

/// A validated, absolute endpoint URL (`login_url`, `logout_url`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointUrl(Url);

impl EndpointUrl {
    /// Parses and validates an endpoint URL.
    ///
    /// # Errors
    /// Returns `AuthFormError::Validation` if the URL is empty, too long,
    /// not absolute, or uses a scheme other than http/https.
    pub fn parse(value: impl AsRef<str>) -> AuthFormResult<Self> {
        Ok(Self(validate_endpoint_url(value.as_ref())?))
    }

    /// Returns a copy with `key=value` appended to the query string.
    #[must_use]
    pub fn with_query(&self, key: &str, value: &str) -> Self {
        let mut url = self.0.clone();
        url.query_pairs_mut().append_pair(key, value);
        Self(url)
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the parsed URL.
    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for EndpointUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validates an endpoint URL string and returns the parsed form.
pub(crate) fn validate_endpoint_url(url: &str) -> Result<Url, ValidationError> {
    if url.trim().is_empty() {
        return Err(ValidationError::Field {
            field: "url".to_string(),
            message: "URL cannot be empty".to_string(),
        });
    }
    if url.len() > MAX_URL_LENGTH {
        return Err(ValidationError::Format(format!(
            "URL exceeds maximum length of {} characters",
            MAX_URL_LENGTH
        )));
    }
    let parsed =
        Url::parse(url).map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))?;
    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return Err(ValidationError::ConstraintViolation(format!(
            "Invalid scheme '{}'. Must be one of: {}",
            parsed.scheme(),
            ALLOWED_SCHEMES.join(", ")
        )));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::Format("URL must contain a host".to_string()));
    }
    Ok(parsed)
}
