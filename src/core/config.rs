//! Controller configuration.

use crate::core::domain::{
    error::{AuthFormError, AuthFormResult},
    model::form_layout::{FieldLocator, SuccessAction},
    value_object::EndpointUrl,
};
use std::num::NonZeroU32;
use std::time::Duration;

/// Header carrying the anti-forgery token.
pub const DEFAULT_CSRF_HEADER: &str = "X-CSRFToken";
/// Text shown when a failure carries no message of its own.
pub const DEFAULT_FALLBACK_MESSAGE: &str = "Request failed";

/// Throttles how fast interactions may reach the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub requests_per_second: NonZeroU32,
    pub burst_size: NonZeroU32,
}

impl RateLimitConfig {
    /// # Errors
    /// Returns `AuthFormError::Config` if either value is zero.
    pub fn new(requests_per_second: u32, burst_size: u32) -> AuthFormResult<Self> {
        let requests_per_second = NonZeroU32::new(requests_per_second)
            .ok_or_else(|| AuthFormError::Config("requests_per_second must be > 0".to_string()))?;
        let burst_size = NonZeroU32::new(burst_size)
            .ok_or_else(|| AuthFormError::Config("burst_size must be > 0".to_string()))?;
        Ok(Self {
            requests_per_second,
            burst_size,
        })
    }
}

/// Everything the controller needs besides the page itself.
#[derive(Debug, Clone)]
pub struct AuthFormConfig {
    pub login_url: EndpointUrl,
    pub logout_url: EndpointUrl,
    pub register_url: Option<EndpointUrl>,
    pub confirmation_url: Option<EndpointUrl>,
    pub field_locator: FieldLocator,
    pub success_action: SuccessAction,
    pub csrf_header: String,
    pub fallback_message: String,
    /// Appends `web=1` to the login URL so the server answers with a
    /// cookie session instead of bearer tokens.
    pub web_session: bool,
    /// No timeout when `None`.
    pub timeout: Option<Duration>,
    pub rate_limit: Option<RateLimitConfig>,
    pub accept_invalid_certs: bool,
}

impl AuthFormConfig {
    pub fn new(login_url: EndpointUrl, logout_url: EndpointUrl) -> Self {
        Self {
            login_url,
            logout_url,
            register_url: None,
            confirmation_url: None,
            field_locator: FieldLocator::default(),
            success_action: SuccessAction::default(),
            csrf_header: DEFAULT_CSRF_HEADER.to_string(),
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
            web_session: false,
            timeout: None,
            rate_limit: None,
            accept_invalid_certs: false,
        }
    }

    /// The URL the login form posts to.
    pub fn login_target(&self) -> EndpointUrl {
        if self.web_session {
            self.login_url.with_query("web", "1")
        } else {
            self.login_url.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthFormConfig {
        AuthFormConfig::new(
            EndpointUrl::parse("https://example.com/api/user/login").unwrap(),
            EndpointUrl::parse("https://example.com/api/user/logout").unwrap(),
        )
    }

    #[test]
    fn test_defaults() {
        let config = config();
        assert_eq!(config.field_locator, FieldLocator::Id);
        assert_eq!(config.success_action, SuccessAction::Reload);
        assert_eq!(config.csrf_header, "X-CSRFToken");
        assert_eq!(config.fallback_message, "Request failed");
        assert!(config.timeout.is_none());
        assert!(config.register_url.is_none());
        assert!(config.confirmation_url.is_none());
    }

    #[test]
    fn test_login_target_web_session() {
        let mut config = config();
        assert_eq!(
            config.login_target().as_str(),
            "https://example.com/api/user/login"
        );
        config.web_session = true;
        assert_eq!(
            config.login_target().as_str(),
            "https://example.com/api/user/login?web=1"
        );
    }

    #[test]
    fn test_rate_limit_rejects_zero() {
        assert!(RateLimitConfig::new(0, 1).is_err());
        assert!(RateLimitConfig::new(1, 0).is_err());
        let limit = RateLimitConfig::new(2, 4).unwrap();
        assert_eq!(limit.burst_size.get(), 4);
    }
}
