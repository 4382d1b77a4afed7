use crate::core::domain::{
    error::{AuthFormResult, ValidationError},
    model::form_layout::{
        CONFIRMATION_FORM, FieldLocator, FieldSelector, LOGIN_FORM, REGISTER_FORM,
    },
    page::FormSource,
};
use secrecy::{ExposeSecret, SecretString};

/// Username and password as typed into the login form.
///
/// Values are taken as-is; an empty field is still sent.
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password.into().into_boxed_str()),
        }
    }

    /// Reads the login form's `username` and `password` inputs.
    ///
    /// # Errors
    /// Returns `ValidationError::Field` if either input is missing from the page.
    pub fn read(form: &dyn FormSource, locator: FieldLocator) -> AuthFormResult<Self> {
        Ok(Self {
            username: read_field(form, LOGIN_FORM, locator, "username")?,
            password: SecretString::new(
                read_field(form, LOGIN_FORM, locator, "password")?.into_boxed_str(),
            ),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// The registration form: username, email and password.
pub struct Registration {
    credentials: Credentials,
    email: String,
}

impl Registration {
    /// Reads the register form's `username`, `email` and `password` inputs.
    ///
    /// # Errors
    /// Returns `ValidationError::Field` if any input is missing from the page.
    pub fn read(form: &dyn FormSource, locator: FieldLocator) -> AuthFormResult<Self> {
        let username = read_field(form, REGISTER_FORM, locator, "username")?;
        let email = read_field(form, REGISTER_FORM, locator, "email")?;
        let password = read_field(form, REGISTER_FORM, locator, "password")?;
        Ok(Self {
            credentials: Credentials::new(username, password),
            email,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Reads the confirmation form's `email` input.
///
/// # Errors
/// Returns `ValidationError::Field` if the input is missing from the page.
pub fn read_confirmation_email(form: &dyn FormSource, locator: FieldLocator) -> AuthFormResult<String> {
    Ok(read_field(form, CONFIRMATION_FORM, locator, "email")?)
}

fn read_field(
    form: &dyn FormSource,
    form_id: &str,
    locator: FieldLocator,
    key: &str,
) -> Result<String, ValidationError> {
    let selector = FieldSelector::new(form_id, locator, key);
    form.field_value(&selector)
        .ok_or_else(|| ValidationError::Field {
            field: key.to_string(),
            message: format!("No input matches '{}'", selector),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::{error::AuthFormError, page::memory::InMemoryPage};

    fn login_page(locator: FieldLocator) -> InMemoryPage {
        InMemoryPage::new()
            .with_field(FieldSelector::new(LOGIN_FORM, locator, "username"), "alice")
            .with_field(FieldSelector::new(LOGIN_FORM, locator, "password"), "")
    }

    #[test]
    fn test_read_credentials_by_id() {
        let page = login_page(FieldLocator::Id);
        let credentials = Credentials::read(&page, FieldLocator::Id).unwrap();
        assert_eq!(credentials.username(), "alice");
        // empty values are not rejected
        assert_eq!(credentials.password(), "");
    }

    #[test]
    fn test_read_credentials_wrong_locator() {
        let page = login_page(FieldLocator::Name);
        let result = Credentials::read(&page, FieldLocator::Id);
        match result {
            Err(AuthFormError::Validation(ValidationError::Field { field, message })) => {
                assert_eq!(field, "username");
                assert!(message.contains("#login input[id=username]"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_debug_redacts_password() {
        let credentials = Credentials::new("bob", "hunter22");
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("bob"));
        assert!(!debug.contains("hunter22"));
    }

    #[test]
    fn test_read_confirmation_email() {
        let page = InMemoryPage::new().with_field(
            FieldSelector::new(CONFIRMATION_FORM, FieldLocator::Id, "email"),
            "dave@example.org",
        );
        assert_eq!(
            read_confirmation_email(&page, FieldLocator::Id).unwrap(),
            "dave@example.org"
        );
        assert!(read_confirmation_email(&page, FieldLocator::Name).is_err());
    }

    #[test]
    fn test_read_registration() {
        let page = InMemoryPage::new()
            .with_field(FieldSelector::new(REGISTER_FORM, FieldLocator::Name, "username"), "carol")
            .with_field(FieldSelector::new(REGISTER_FORM, FieldLocator::Name, "email"), "c@x.org")
            .with_field(FieldSelector::new(REGISTER_FORM, FieldLocator::Name, "password"), "pw");
        let registration = Registration::read(&page, FieldLocator::Name).unwrap();
        assert_eq!(registration.credentials().username(), "carol");
        assert_eq!(registration.email(), "c@x.org");
        assert_eq!(registration.credentials().password(), "pw");
    }
}
