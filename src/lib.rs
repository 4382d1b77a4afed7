//! An async controller for login/logout forms backed by a JSON
//! authentication API.
//!
//! The hosting page is reached through small traits ([`FormSource`],
//! [`StatusDisplay`], [`Navigator`], [`SubmitEvent`]) so the same controller
//! drives a browser binding, a terminal front-end or a test harness.

mod auth;
mod core;


pub use crate::{
    auth::application::response::auth_response::AuthResponse,
    core::{
        config::{AuthFormConfig, DEFAULT_CSRF_HEADER, DEFAULT_FALLBACK_MESSAGE, RateLimitConfig},
        domain::{
            error::{AuthFormError, AuthFormResult, ValidationError},
            model::{
                credentials::{Credentials, Registration, read_confirmation_email},
                form_layout::{
                    CONFIRMATION_FORM, FieldLocator, FieldSelector, LOGIN_FORM, REGISTER_FORM,
                    SuccessAction,
                },
                submit_outcome::{ControllerState, SubmitOutcome},
            },
            page::{
                CsrfTokenSource, FormSource, Navigator, SharedCsrfToken, StatusDisplay,
                SubmitEvent,
                memory::{InMemoryPage, NativeEvent},
            },
            value_object::{CsrfToken, EndpointUrl},
        },
    },
};

use crate::{
    auth::application::service::{
        confirmation_service::ConfirmationService, login_service::LoginService,
        logout_service::LogoutService, register_service::RegisterService,
    },
    core::infrastructure::api_client::ApiClient,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Drives the login, logout and registration forms of a page.
///
/// Each handler cancels the native event, talks to the configured endpoint,
/// and then either acts on the page (reload, status text) or writes the
/// server's first message into the status element.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use authform::{AuthFormController, AuthFormResult, InMemoryPage, NativeEvent};
///
/// #[tokio::main]
/// async fn main() -> AuthFormResult<()> {
///     let page = Arc::new(InMemoryPage::new());
///     let controller = AuthFormController::builder()
///         .login_url("https://example.com/api/user/login")?
///         .logout_url("https://example.com/api/user/logout")?
///         .csrf_token("IjY2ZDk4YzQ5")?
///         .page(page.clone())
///         .build()?;
///
///     let mut event = NativeEvent::new();
///     let outcome = controller.on_login_submit(&mut event).await?;
///     println!("{:?} / status: {}", outcome, page.status_text());
///     Ok(())
/// }
/// ```
pub struct AuthFormController {
    api_client: ApiClient,
    config: AuthFormConfig,
    form: Arc<dyn FormSource>,
    display: Arc<dyn StatusDisplay>,
    navigator: Arc<dyn Navigator>,
    in_flight: AtomicUsize,
}

/// Builder for AuthFormController configuration
#[derive(Default)]
pub struct AuthFormControllerBuilder {
    login_url: Option<EndpointUrl>,
    logout_url: Option<EndpointUrl>,
    register_url: Option<EndpointUrl>,
    confirmation_url: Option<EndpointUrl>,
    field_locator: FieldLocator,
    success_action: SuccessAction,
    csrf_source: Option<Arc<dyn CsrfTokenSource>>,
    csrf_header: Option<String>,
    fallback_message: Option<String>,
    web_session: bool,
    timeout: Option<Duration>,
    rate_limit: Option<RateLimitConfig>,
    accept_invalid_certs: bool,
    form: Option<Arc<dyn FormSource>>,
    display: Option<Arc<dyn StatusDisplay>>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl AuthFormControllerBuilder {
    pub fn login_url(mut self, url: impl AsRef<str>) -> AuthFormResult<Self> {
        self.login_url = Some(EndpointUrl::parse(url)?);
        Ok(self)
    }

    pub fn logout_url(mut self, url: impl AsRef<str>) -> AuthFormResult<Self> {
        self.logout_url = Some(EndpointUrl::parse(url)?);
        Ok(self)
    }

    /// Enables [`AuthFormController::on_register_submit`].
    pub fn register_url(mut self, url: impl AsRef<str>) -> AuthFormResult<Self> {
        self.register_url = Some(EndpointUrl::parse(url)?);
        Ok(self)
    }

    /// Enables [`AuthFormController::on_confirmation_submit`].
    pub fn confirmation_url(mut self, url: impl AsRef<str>) -> AuthFormResult<Self> {
        self.confirmation_url = Some(EndpointUrl::parse(url)?);
        Ok(self)
    }

    pub fn field_locator(mut self, locator: FieldLocator) -> Self {
        self.field_locator = locator;
        self
    }

    pub fn success_action(mut self, action: SuccessAction) -> Self {
        self.success_action = action;
        self
    }

    /// Uses a fixed anti-forgery token for every state-changing request.
    pub fn csrf_token(mut self, token: impl Into<String>) -> AuthFormResult<Self> {
        let source: Arc<dyn CsrfTokenSource> = Arc::new(CsrfToken::new(token)?);
        self.csrf_source = Some(source);
        Ok(self)
    }

    /// Looks the anti-forgery token up on every state-changing request.
    pub fn csrf_source(mut self, source: Arc<dyn CsrfTokenSource>) -> Self {
        self.csrf_source = Some(source);
        self
    }

    pub fn csrf_header(mut self, name: impl Into<String>) -> Self {
        self.csrf_header = Some(name.into());
        self
    }

    /// Text shown when a failure carries no message of its own.
    pub fn fallback_message(mut self, message: impl Into<String>) -> Self {
        self.fallback_message = Some(message.into());
        self
    }

    pub fn web_session(mut self, enabled: bool) -> Self {
        self.web_session = enabled;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }

    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Uses one object as form source, status display and navigator.
    pub fn page<P>(mut self, page: Arc<P>) -> Self
    where
        P: FormSource + StatusDisplay + Navigator + 'static,
    {
        let form: Arc<dyn FormSource> = page.clone();
        let display: Arc<dyn StatusDisplay> = page.clone();
        let navigator: Arc<dyn Navigator> = page;
        self.form = Some(form);
        self.display = Some(display);
        self.navigator = Some(navigator);
        self
    }

    pub fn form(mut self, form: Arc<dyn FormSource>) -> Self {
        self.form = Some(form);
        self
    }

    pub fn display(mut self, display: Arc<dyn StatusDisplay>) -> Self {
        self.display = Some(display);
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Applies the `AUTHFORM_*` environment variables that are set.
    ///
    /// Recognised: `AUTHFORM_LOGIN_URL`, `AUTHFORM_LOGOUT_URL`,
    /// `AUTHFORM_REGISTER_URL`, `AUTHFORM_CONFIRMATION_URL`,
    /// `AUTHFORM_FIELD_LOCATOR` (`id`/`name`), `AUTHFORM_SUCCESS_ACTION`
    /// (`reload`/`echo`), `AUTHFORM_CSRF_TOKEN`, `AUTHFORM_CSRF_HEADER`,
    /// `AUTHFORM_WEB_SESSION`, `AUTHFORM_TIMEOUT_SECS` and
    /// `AUTHFORM_ACCEPT_INVALID_CERTS`.
    pub fn env(self) -> AuthFormResult<Self> {
        self.apply_vars(env_var)
    }

    fn apply_vars<F>(mut self, lookup: F) -> AuthFormResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("AUTHFORM_LOGIN_URL") {
            self = self.login_url(url)?;
        }
        if let Some(url) = lookup("AUTHFORM_LOGOUT_URL") {
            self = self.logout_url(url)?;
        }
        if let Some(url) = lookup("AUTHFORM_REGISTER_URL") {
            self = self.register_url(url)?;
        }
        if let Some(url) = lookup("AUTHFORM_CONFIRMATION_URL") {
            self = self.confirmation_url(url)?;
        }
        if let Some(locator) = lookup("AUTHFORM_FIELD_LOCATOR") {
            self.field_locator = locator.parse().map_err(AuthFormError::Config)?;
        }
        if let Some(action) = lookup("AUTHFORM_SUCCESS_ACTION") {
            self.success_action = action.parse().map_err(AuthFormError::Config)?;
        }
        if let Some(token) = lookup("AUTHFORM_CSRF_TOKEN") {
            self = self.csrf_token(token)?;
        }
        if let Some(header) = lookup("AUTHFORM_CSRF_HEADER") {
            self.csrf_header = Some(header);
        }
        if let Some(flag) = lookup("AUTHFORM_WEB_SESSION") {
            self.web_session = parse_flag(&flag);
        }
        if let Some(secs) = lookup("AUTHFORM_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|e| {
                AuthFormError::Config(format!("AUTHFORM_TIMEOUT_SECS '{}': {}", secs, e))
            })?;
            self.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(flag) = lookup("AUTHFORM_ACCEPT_INVALID_CERTS") {
            self.accept_invalid_certs = parse_flag(&flag);
        }
        Ok(self)
    }

    pub fn build(self) -> AuthFormResult<AuthFormController> {
        let login_url = self.login_url.ok_or_else(|| ValidationError::Field {
            field: "login_url".to_string(),
            message: "Login URL is required".to_string(),
        })?;
        let logout_url = self.logout_url.ok_or_else(|| ValidationError::Field {
            field: "logout_url".to_string(),
            message: "Logout URL is required".to_string(),
        })?;
        let form = self
            .form
            .ok_or_else(|| AuthFormError::Config("A form source is required".to_string()))?;
        let display = self
            .display
            .ok_or_else(|| AuthFormError::Config("A status display is required".to_string()))?;
        let navigator = self
            .navigator
            .ok_or_else(|| AuthFormError::Config("A navigator is required".to_string()))?;

        let mut config = AuthFormConfig::new(login_url, logout_url);
        config.register_url = self.register_url;
        config.confirmation_url = self.confirmation_url;
        config.field_locator = self.field_locator;
        config.success_action = self.success_action;
        if let Some(header) = self.csrf_header {
            config.csrf_header = header;
        }
        if let Some(message) = self.fallback_message {
            config.fallback_message = message;
        }
        config.web_session = self.web_session;
        config.timeout = self.timeout;
        config.rate_limit = self.rate_limit;
        config.accept_invalid_certs = self.accept_invalid_certs;

        AuthFormController::new(config, self.csrf_source, form, display, navigator)
    }
}

impl AuthFormController {
    /// Creates a new builder for AuthFormController configuration
    pub fn builder() -> AuthFormControllerBuilder {
        AuthFormControllerBuilder::default()
    }

    /// Creates a controller from an already assembled configuration.
    ///
    /// # Errors
    /// Returns `AuthFormError::Config` or `AuthFormError::Connection` if the
    /// HTTP client cannot be built from `config`.
    pub fn new(
        config: AuthFormConfig,
        csrf_source: Option<Arc<dyn CsrfTokenSource>>,
        form: Arc<dyn FormSource>,
        display: Arc<dyn StatusDisplay>,
        navigator: Arc<dyn Navigator>,
    ) -> AuthFormResult<Self> {
        let api_client = ApiClient::new(&config, csrf_source)?;
        Ok(Self {
            api_client,
            config,
            form,
            display,
            navigator,
            in_flight: AtomicUsize::new(0),
        })
    }

    pub fn config(&self) -> &AuthFormConfig {
        &self.config
    }

    /// `AwaitingResponse` while at least one request is outstanding.
    pub fn state(&self) -> ControllerState {
        if self.in_flight() > 0 {
            ControllerState::AwaitingResponse
        } else {
            ControllerState::Idle
        }
    }

    /// Number of requests currently outstanding.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Handles submission of the login form.
    ///
    /// The native submission is cancelled before anything else. The
    /// credentials are posted as JSON; on success the configured
    /// [`SuccessAction`] runs, on failure the server's first message (or the
    /// fallback text) is written to the status element.
    ///
    /// # Errors
    ///
    /// - `Validation` if an input is missing or no CSRF token is available
    /// - `Connection` if the server cannot be reached
    /// - `MalformedResponse` if the answer carries no usable body
    pub async fn on_login_submit<E>(&self, event: &mut E) -> AuthFormResult<SubmitOutcome>
    where
        E: SubmitEvent + ?Sized,
    {
        event.prevent_default();
        let credentials = Credentials::read(self.form.as_ref(), self.config.field_locator)?;
        let url = self.config.login_target();
        tracing::debug!(username = credentials.username(), url = %url, "submitting login form");

        let result = {
            let _pending = PendingRequest::start(&self.in_flight);
            LoginService::new(&self.api_client)
                .execute(&url, &credentials)
                .await
        };
        self.settle(result, |response| self.on_login_success(response))
    }

    /// Handles activation of the logout control with a body-less GET.
    ///
    /// Any 2xx answer reloads the page; failures are shown like login failures.
    pub async fn on_logout_click<E>(&self, event: &mut E) -> AuthFormResult<SubmitOutcome>
    where
        E: SubmitEvent + ?Sized,
    {
        event.prevent_default();
        tracing::debug!(url = %self.config.logout_url, "logging out");

        let result = {
            let _pending = PendingRequest::start(&self.in_flight);
            LogoutService::new(&self.api_client)
                .execute(&self.config.logout_url)
                .await
        };
        self.settle(result, |_| {
            tracing::info!("logout succeeded, reloading");
            self.navigator.reload();
        })
    }

    /// Handles submission of the registration form.
    ///
    /// On success the server's message is shown; the page is not reloaded.
    ///
    /// # Errors
    /// Returns `AuthFormError::Config` if no register URL was configured,
    /// otherwise the same errors as [`Self::on_login_submit`].
    pub async fn on_register_submit<E>(&self, event: &mut E) -> AuthFormResult<SubmitOutcome>
    where
        E: SubmitEvent + ?Sized,
    {
        event.prevent_default();
        let url = self
            .config
            .register_url
            .as_ref()
            .ok_or_else(|| AuthFormError::Config("No register URL configured".to_string()))?;
        let registration = Registration::read(self.form.as_ref(), self.config.field_locator)?;
        tracing::debug!(
            username = registration.credentials().username(),
            url = %url,
            "submitting registration form"
        );

        let result = {
            let _pending = PendingRequest::start(&self.in_flight);
            RegisterService::new(&self.api_client)
                .execute(url, &registration)
                .await
        };
        self.settle(result, |response| {
            tracing::info!(messages = ?response.all_messages(), "registration accepted");
            self.display.set_text(response.first_message().unwrap_or_default());
        })
    }

    /// Handles submission of the "resend confirmation email" form.
    ///
    /// Posts the form's `email` input; the server's message is shown either way.
    ///
    /// # Errors
    /// Returns `AuthFormError::Config` if no confirmation URL was configured,
    /// otherwise the same errors as [`Self::on_login_submit`].
    pub async fn on_confirmation_submit<E>(&self, event: &mut E) -> AuthFormResult<SubmitOutcome>
    where
        E: SubmitEvent + ?Sized,
    {
        event.prevent_default();
        let url = self.config.confirmation_url.as_ref().ok_or_else(|| {
            AuthFormError::Config("No confirmation URL configured".to_string())
        })?;
        let email = read_confirmation_email(self.form.as_ref(), self.config.field_locator)?;
        tracing::debug!(url = %url, "requesting confirmation email");

        let result = {
            let _pending = PendingRequest::start(&self.in_flight);
            ConfirmationService::new(&self.api_client)
                .execute(url, &email)
                .await
        };
        self.settle(result, |response| {
            tracing::info!(messages = ?response.all_messages(), "confirmation email requested");
            self.display.set_text(response.first_message().unwrap_or_default());
        })
    }

    fn on_login_success(&self, response: &AuthResponse) {
        match self.config.success_action {
            SuccessAction::Reload => {
                tracing::info!("login succeeded, reloading");
                self.navigator.reload();
            }
            SuccessAction::Echo => {
                tracing::info!(messages = ?response.all_messages(), "login succeeded");
                let text = response
                    .username
                    .as_deref()
                    .or_else(|| response.first_message())
                    .unwrap_or_default();
                self.display.set_text(text);
            }
        }
    }

    /// Applies a finished request to the page. The status element is
    /// last-writer-wins across overlapping interactions.
    fn settle<F>(
        &self,
        result: AuthFormResult<SubmitOutcome>,
        on_success: F,
    ) -> AuthFormResult<SubmitOutcome>
    where
        F: FnOnce(&AuthResponse),
    {
        match &result {
            Ok(SubmitOutcome::Succeeded(response)) => on_success(response),
            Ok(SubmitOutcome::Rejected { status, message }) => {
                tracing::warn!(status, %message, "request rejected");
                self.display.set_text(message);
            }
            Err(err) => {
                tracing::warn!(error = %err, "request failed");
                self.display.set_text(&self.config.fallback_message);
            }
        }
        result
    }
}

/// Counts an outstanding request for as long as it lives.
struct PendingRequest<'a>(&'a AtomicUsize);

impl<'a> PendingRequest<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for PendingRequest<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
