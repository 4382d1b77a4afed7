//! How the controller finds its inputs on the hosting page and what a
//! successful login does to it.

use std::fmt;

/// Id of the login form element.
pub const LOGIN_FORM: &str = "login";
/// Id of the registration form element.
pub const REGISTER_FORM: &str = "register";
/// Id of the "resend confirmation email" form element.
pub const CONFIRMATION_FORM: &str = "confirmation";

/// The attribute used to locate an input inside a form.
///
/// Pages in the wild identify inputs either by `id` or by `name`; the
/// controller uses exactly one strategy, chosen at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FieldLocator {
    /// `#login input[id=username]`
    #[default]
    Id,
    /// `#login input[name=username]`
    Name,
}

impl FieldLocator {
    /// Returns the attribute name used in selectors.
    #[must_use]
    pub fn attribute(self) -> &'static str {
        match self {
            FieldLocator::Id => "id",
            FieldLocator::Name => "name",
        }
    }
}

impl std::str::FromStr for FieldLocator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(FieldLocator::Id),
            "name" => Ok(FieldLocator::Name),
            other => Err(format!("unknown field locator '{}' (expected id or name)", other)),
        }
    }
}

/// A single input inside a form, e.g. `#login input[id=username]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldSelector {
    form: String,
    locator: FieldLocator,
    key: String,
}

impl FieldSelector {
    pub fn new(form: impl Into<String>, locator: FieldLocator, key: impl Into<String>) -> Self {
        Self {
            form: form.into(),
            locator,
            key: key.into(),
        }
    }

    pub fn form(&self) -> &str {
        &self.form
    }

    pub fn locator(&self) -> FieldLocator {
        self.locator
    }

    /// The value of the `id`/`name` attribute, e.g. `username`.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for FieldSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} input[{}={}]",
            self.form,
            self.locator.attribute(),
            self.key
        )
    }
}

/// What the controller does after a successful login.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SuccessAction {
    /// Reload the page; the server-side session takes over from there.
    #[default]
    Reload,
    /// Stay on the page, log the returned messages and show the
    /// returned `username` in the status element.
    Echo,
}

impl std::str::FromStr for SuccessAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reload" => Ok(SuccessAction::Reload),
            "echo" => Ok(SuccessAction::Echo),
            other => Err(format!("unknown success action '{}' (expected reload or echo)", other)),
        }
    }
}
