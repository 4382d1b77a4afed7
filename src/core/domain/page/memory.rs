//! A page kept entirely in memory.

use super::{FormSource, Navigator, StatusDisplay, SubmitEvent};
use crate::core::domain::model::form_layout::FieldSelector;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// An in-memory page: a set of inputs, a status element and a reload counter.
///
/// # Examples
///
/// ```
/// use authform::{FieldLocator, FieldSelector, InMemoryPage, StatusDisplay};
///
/// let page = InMemoryPage::new()
///     .with_field(FieldSelector::new("login", FieldLocator::Id, "username"), "alice");
/// page.set_text("hello");
/// assert_eq!(page.status_text(), "hello");
/// ```
#[derive(Debug, Default)]
pub struct InMemoryPage {
    fields: Mutex<HashMap<FieldSelector, String>>,
    status: Mutex<String>,
    reloads: AtomicUsize,
}

impl InMemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an input with an initial value.
    #[must_use]
    pub fn with_field(self, selector: FieldSelector, value: impl Into<String>) -> Self {
        self.set_field(selector, value);
        self
    }

    /// Sets (or creates) an input's value, as a user typing would.
    pub fn set_field(&self, selector: FieldSelector, value: impl Into<String>) {
        self.fields
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(selector, value.into());
    }

    /// Returns the current text of the status element.
    pub fn status_text(&self) -> String {
        self.status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns how many times the page was reloaded.
    pub fn reload_count(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }
}

impl FormSource for InMemoryPage {
    fn field_value(&self, selector: &FieldSelector) -> Option<String> {
        self.fields
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(selector)
            .cloned()
    }
}

impl StatusDisplay for InMemoryPage {
    fn set_text(&self, text: &str) {
        let mut status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        status.clear();
        status.push_str(text);
    }
}

impl Navigator for InMemoryPage {
    fn reload(&self) {
        self.reloads.fetch_add(1, Ordering::SeqCst);
    }
}

/// A native submit/click event that records whether its default was prevented.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NativeEvent {
    default_prevented: bool,
}

impl NativeEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

impl SubmitEvent for NativeEvent {
    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::model::form_layout::{FieldLocator, LOGIN_FORM};

    #[test]
    fn test_fields_are_keyed_by_locator() {
        let by_id = FieldSelector::new(LOGIN_FORM, FieldLocator::Id, "username");
        let by_name = FieldSelector::new(LOGIN_FORM, FieldLocator::Name, "username");
        let page = InMemoryPage::new().with_field(by_id.clone(), "alice");

        assert_eq!(page.field_value(&by_id).as_deref(), Some("alice"));
        assert_eq!(page.field_value(&by_name), None);
    }

    #[test]
    fn test_status_is_overwritten() {
        let page = InMemoryPage::new();
        page.set_text("first");
        page.set_text("second");
        assert_eq!(page.status_text(), "second");
    }

    #[test]
    fn test_reload_counter_and_event() {
        let page = InMemoryPage::new();
        page.reload();
        page.reload();
        assert_eq!(page.reload_count(), 2);

        let mut event = NativeEvent::new();
        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());
    }
}
