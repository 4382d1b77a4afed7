//! The hosting page, as seen by the controller.
//!
//! A browser binding implements these over the DOM; [`memory::InMemoryPage`]
//! implements them for headless use and tests.

pub mod memory;

use crate::core::domain::{model::form_layout::FieldSelector, value_object::CsrfToken};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Read access to form inputs.
#[cfg_attr(test, mockall::automock)]
pub trait FormSource: Send + Sync {
    /// Returns the current value of the input, or `None` if the page has no
    /// such input.
    fn field_value(&self, selector: &FieldSelector) -> Option<String>;
}

/// The element that shows error and status text (`#error`).
#[cfg_attr(test, mockall::automock)]
pub trait StatusDisplay: Send + Sync {
    /// Replaces the element's text.
    fn set_text(&self, text: &str);
}

/// Page-level navigation.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    fn reload(&self);
}

/// The native event that triggered a handler (form submit, link click).
#[cfg_attr(test, mockall::automock)]
pub trait SubmitEvent {
    /// Stops the browser from performing its default action.
    fn prevent_default(&mut self);
}

/// Supplies the anti-forgery token for state-changing requests.
///
/// Looked up on every request so a page can rotate its token.
#[async_trait]
pub trait CsrfTokenSource: Send + Sync {
    async fn csrf_token(&self) -> Option<CsrfToken>;
}

#[async_trait]
impl CsrfTokenSource for CsrfToken {
    async fn csrf_token(&self) -> Option<CsrfToken> {
        Some(self.clone())
    }
}

/// A token slot shared with the page, which may replace or clear it.
#[derive(Debug, Default)]
pub struct SharedCsrfToken {
    token: RwLock<Option<CsrfToken>>,
}

impl SharedCsrfToken {
    pub fn new(token: Option<CsrfToken>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }

    pub async fn replace(&self, token: Option<CsrfToken>) {
        *self.token.write().await = token;
    }
}

#[async_trait]
impl CsrfTokenSource for SharedCsrfToken {
    async fn csrf_token(&self) -> Option<CsrfToken> {
        self.token.read().await.clone()
    }
}
